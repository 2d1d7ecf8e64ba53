//! Application settings
//!
//! Best-effort JSON settings under the XDG config dir; a missing or
//! unreadable file silently yields the defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Drop ports whose identifier contains any of these substrings
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
    /// Seconds between presence polls
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
    /// Play transition chimes and the missing-port alert loop
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_exclude_patterns() -> Vec<String> {
    port_scan::ScannerConfig::default().exclude_patterns
}

fn default_poll_secs() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude_patterns: default_exclude_patterns(),
            poll_secs: default_poll_secs(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Get the XDG config directory for portwatch
    /// Uses $XDG_CONFIG_HOME/portwatch on Linux/macOS, falls back to ~/.config/portwatch
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("portwatch"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("portwatch"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }

    /// Delay between presence polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert!(settings.sound_enabled);
        assert_eq!(settings.poll_secs, 1);
        assert!(settings
            .exclude_patterns
            .iter()
            .any(|p| p == "Bluetooth"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"poll_secs": 5}"#).unwrap();

        assert_eq!(settings.poll_secs, 5);
        assert!(settings.sound_enabled);
        assert!(!settings.exclude_patterns.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let mut settings = Settings::default();
        settings.sound_enabled = false;
        settings.exclude_patterns = vec!["usbmodem".to_string()];

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_poll_interval_floor_is_one_second() {
        let settings: Settings = serde_json::from_str(r#"{"poll_secs": 0}"#).unwrap();
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
    }
}
