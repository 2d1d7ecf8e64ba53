//! Serial Port Scanning Library
//!
//! This crate provides serial port enumeration with a deny-list filter for
//! known-noisy entries, plus the text report renderers used by the CLI.
//!
//! # Example
//!
//! ```rust,no_run
//! use port_scan::PortScanner;
//!
//! let scanner = PortScanner::new();
//! let ports = scanner.scan();
//!
//! for port in ports {
//!     println!("Found port: {}", port.port);
//! }
//! ```

pub mod error;
pub mod fallback;
pub mod report;
pub mod scanner;

pub use error::ScanError;
pub use report::{render_details, render_summary, NO_PORTS_FOUND};
pub use scanner::{PortDetails, PortScanner, ScannerConfig};
