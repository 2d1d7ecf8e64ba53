//! Best-effort clipboard copy
//!
//! Pipes text into the platform clipboard command; when no command is
//! usable the value is printed instead, so the port identifier always
//! reaches the user.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Copy `text` to the system clipboard, printing it when copy fails
pub async fn copy_or_print(text: &str) {
    if copy(text).await {
        println!("\n\n# COPIED TO CLIPBOARD\n\n    {text}");
    } else {
        println!("\n\n# LAST PORT: {text}");
    }
}

async fn copy(text: &str) -> bool {
    for command in candidate_commands() {
        match pipe_to(command, text).await {
            Ok(true) => {
                debug!("Copied to clipboard via {}", command[0]);
                return true;
            }
            Ok(false) => debug!("{} exited with failure", command[0]),
            Err(e) => debug!("{} not usable: {e}", command[0]),
        }
    }
    false
}

/// Clipboard commands to try, most specific first
fn candidate_commands() -> &'static [&'static [&'static str]] {
    if cfg!(target_os = "macos") {
        &[&["pbcopy"]]
    } else if cfg!(target_os = "linux") {
        &[&["wl-copy"], &["xclip", "-selection", "clipboard"]]
    } else {
        &[]
    }
}

async fn pipe_to(command: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(command[0])
        .args(&command[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        // Close stdin to signal EOF
        drop(stdin);
    }

    Ok(child.wait().await?.success())
}
