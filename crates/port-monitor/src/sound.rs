//! Platform sound capability
//!
//! Each supported platform gets one [`SoundPlayer`] implementation wrapping
//! its native player command; unsupported platforms degrade to a silent
//! no-op. The monitor and alert player only ever see the trait.

use std::io::Write;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::SoundError;

/// Discrete sounds the monitor can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSound {
    /// Transition chime: every expected port is present again
    Restored,
    /// Transition chime: an expected port went missing
    Missing,
    /// One cycle of the continuous alert loop
    Alarm,
}

/// Capability for playing one sound to completion
#[async_trait]
pub trait SoundPlayer: Send + Sync {
    /// Play the sound, returning once the platform command finishes
    async fn play(&self, sound: AlertSound) -> Result<(), SoundError>;

    /// Capability name for logs
    fn name(&self) -> &'static str;
}

/// Pick the sound player for the current platform
pub fn default_player() -> Arc<dyn SoundPlayer> {
    if cfg!(target_os = "macos") {
        Arc::new(AfplayPlayer)
    } else if cfg!(target_os = "linux") {
        Arc::new(AplayPlayer)
    } else {
        Arc::new(NullPlayer)
    }
}

/// macOS player using `afplay` with the stock system sounds
pub struct AfplayPlayer;

impl AfplayPlayer {
    fn sound_path(sound: AlertSound) -> &'static str {
        match sound {
            AlertSound::Restored => "/System/Library/Sounds/Glass.aiff",
            AlertSound::Missing => "/System/Library/Sounds/Basso.aiff",
            AlertSound::Alarm => "/System/Library/Sounds/Morse.aiff",
        }
    }
}

#[async_trait]
impl SoundPlayer for AfplayPlayer {
    async fn play(&self, sound: AlertSound) -> Result<(), SoundError> {
        let path = Self::sound_path(sound);
        debug!("Playing {path} via afplay");

        let status = Command::new("afplay")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| SoundError::Launch {
                command: "afplay",
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SoundError::PlayerFailed {
                command: "afplay",
                status,
            })
        }
    }

    fn name(&self) -> &'static str {
        "afplay"
    }
}

/// Linux player using `aplay`, with a terminal bell as last resort
pub struct AplayPlayer;

const ALERT_WAV: &str = "/usr/share/sounds/sound-icons/alert.wav";

#[async_trait]
impl SoundPlayer for AplayPlayer {
    async fn play(&self, _sound: AlertSound) -> Result<(), SoundError> {
        let result = Command::new("aplay")
            .args(["-q", ALERT_WAV])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => Ok(()),
            _ => {
                debug!("aplay unavailable, falling back to terminal bell");
                let mut stdout = std::io::stdout();
                let _ = stdout.write_all(b"\x07");
                let _ = stdout.flush();
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        "aplay"
    }
}

/// Silent no-op player for unsupported platforms (or muted sessions)
pub struct NullPlayer;

#[async_trait]
impl SoundPlayer for NullPlayer {
    async fn play(&self, _sound: AlertSound) -> Result<(), SoundError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afplay_sound_paths_are_distinct() {
        let restored = AfplayPlayer::sound_path(AlertSound::Restored);
        let missing = AfplayPlayer::sound_path(AlertSound::Missing);
        let alarm = AfplayPlayer::sound_path(AlertSound::Alarm);

        assert_ne!(restored, missing);
        assert_ne!(missing, alarm);
        assert_ne!(restored, alarm);
    }

    #[tokio::test]
    async fn test_null_player_never_fails() {
        let player = NullPlayer;
        assert!(player.play(AlertSound::Alarm).await.is_ok());
        assert!(player.play(AlertSound::Missing).await.is_ok());
        assert_eq!(player.name(), "silent");
    }

    #[test]
    fn test_default_player_matches_platform() {
        let player = default_player();
        if cfg!(target_os = "macos") {
            assert_eq!(player.name(), "afplay");
        } else if cfg!(target_os = "linux") {
            assert_eq!(player.name(), "aplay");
        } else {
            assert_eq!(player.name(), "silent");
        }
    }
}
