//! Error types for alert playback

use thiserror::Error;

/// Errors that can occur while playing a sound
///
/// These never escape the monitor; playback failures are logged and the
/// alert loop halts itself.
#[derive(Debug, Error)]
pub enum SoundError {
    /// The player command could not be started
    #[error("failed to launch {command}: {source}")]
    Launch {
        /// Player binary name
        command: &'static str,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// The player command ran but reported failure
    #[error("{command} exited with {status}")]
    PlayerFailed {
        /// Player binary name
        command: &'static str,
        /// Exit status reported by the player
        status: std::process::ExitStatus,
    },
}
