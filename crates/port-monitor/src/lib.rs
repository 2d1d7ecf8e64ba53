//! Serial Port Presence Monitor
//!
//! This crate provides the polling loop that watches an expected set of
//! port identifiers, plus the audible alert machinery it drives:
//!
//! - [`PresenceMonitor`] re-scans once a second, diffs the result against
//!   the expected set, and reacts to availability transitions.
//! - [`AlertPlayer`] owns the one-shot transition chimes and the cancellable
//!   background alert loop that runs while ports are missing.
//! - [`SoundPlayer`] abstracts the platform sound command so the monitor
//!   stays platform-agnostic.
//!
//! # Example
//!
//! ```rust,no_run
//! use port_monitor::{default_player, AlertPlayer, MonitorCommand, PresenceMonitor};
//! use port_scan::PortScanner;
//! use tokio::sync::mpsc;
//!
//! # async fn run() {
//! let alert = AlertPlayer::new(default_player());
//! let monitor = PresenceMonitor::new(
//!     PortScanner::new(),
//!     alert,
//!     vec!["/dev/cu.usbmodem11101".to_string()],
//! );
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(1);
//! tokio::spawn(monitor.run(cmd_rx));
//!
//! // ... later: cmd_tx.send(MonitorCommand::Shutdown).await;
//! # let _ = cmd_tx;
//! # }
//! ```

pub mod alert;
pub mod error;
pub mod monitor;
pub mod sound;

pub use alert::AlertPlayer;
pub use error::SoundError;
pub use monitor::{missing_ports, MonitorCommand, PortSource, PresenceMonitor, POLL_INTERVAL};
pub use sound::{default_player, AlertSound, NullPlayer, SoundPlayer};
