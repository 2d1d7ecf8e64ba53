//! Portwatch command-line interface
//!
//! `portwatch ls` lists the attached serial ports; `portwatch watch
//! <PORT>...` monitors the given identifiers until interrupted, alerting
//! audibly while one is missing. Running with no subcommand is the same as
//! `ls --verbose`.

mod clipboard;
mod settings;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use port_monitor::{
    default_player, AlertPlayer, MonitorCommand, NullPlayer, PresenceMonitor, SoundPlayer,
};
use port_scan::{render_details, render_summary, PortScanner, ScannerConfig};
use settings::Settings;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "portwatch")]
#[command(author, version, about = "List serial ports and watch for their disappearance")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the attached serial ports
    Ls {
        /// Also print the full per-port field dump
        #[arg(short, long)]
        verbose: bool,
    },

    /// Watch the given ports until interrupted
    Watch {
        /// Port identifiers to watch (e.g. /dev/cu.usbmodem11101)
        #[arg(required = true)]
        ports: Vec<String>,
    },

    /// Show the active settings
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portwatch=info,port_scan=warn,port_monitor=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load();
    let scanner = PortScanner::with_config(ScannerConfig {
        exclude_patterns: settings.exclude_patterns.clone(),
    });

    match cli.command.unwrap_or(Commands::Ls { verbose: true }) {
        Commands::Ls { verbose } => run_ls(&scanner, verbose).await,
        Commands::Watch { ports } => run_watch(scanner, &settings, ports).await,
        Commands::Config { init } => run_config(&settings, init)?,
    }

    Ok(())
}

async fn run_ls(scanner: &PortScanner, verbose: bool) {
    let ports = scanner.scan();

    if verbose && !ports.is_empty() {
        println!("{}", render_details(&ports));
    }
    println!("{}", render_summary(&ports));

    if let Some(last) = ports.last() {
        clipboard::copy_or_print(&last.port).await;
    }
}

async fn run_watch(scanner: PortScanner, settings: &Settings, ports: Vec<String>) {
    // Initial listing mirrors `ls --verbose` so the watched identifiers can
    // be checked against what is actually attached.
    let listing = scanner.scan();
    if !listing.is_empty() {
        println!("{}", render_details(&listing));
    }
    println!("{}", render_summary(&listing));

    let player: Arc<dyn SoundPlayer> = if settings.sound_enabled {
        default_player()
    } else {
        Arc::new(NullPlayer)
    };
    let alert = AlertPlayer::new(player);
    let monitor =
        PresenceMonitor::new(scanner, alert, ports).with_interval(settings.poll_interval());

    let (cmd_tx, cmd_rx) = mpsc::channel(1);
    let monitor_task = tokio::spawn(monitor.run(cmd_rx));

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, stopping monitor"),
        Err(e) => warn!("Failed to listen for interrupt: {e}"),
    }

    let _ = cmd_tx.send(MonitorCommand::Shutdown).await;
    let _ = monitor_task.await;

    // Clear the in-place progress line before the shell prompt returns.
    print!("\r\x1b[2K");
    let _ = std::io::stdout().flush();
}

fn run_config(settings: &Settings, init: bool) -> Result<()> {
    if init {
        settings.save().map_err(anyhow::Error::msg)?;
        info!("Settings written");
    }

    if let Some(path) = Settings::settings_path() {
        println!("# {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(settings)?);

    Ok(())
}
