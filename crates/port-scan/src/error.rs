//! Error types for port scanning

use thiserror::Error;

/// Errors that can occur during enumeration
#[derive(Debug, Error)]
pub enum ScanError {
    /// The enumeration backend failed or is unavailable
    #[error("failed to enumerate ports: {0}")]
    EnumerationFailed(String),
}
