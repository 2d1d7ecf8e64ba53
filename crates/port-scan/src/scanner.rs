//! Serial port scanner
//!
//! This module provides serial port enumeration and the exclusion filter.

use serialport::{available_ports, SerialPortType};
use tracing::{info, warn};

use crate::error::ScanError;
use crate::fallback;

/// Details for one detected serial port
///
/// Every field except the identifier is optional; non-USB ports and
/// fallback-probed candidates carry only what the host reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDetails {
    /// Port identifier (e.g., /dev/ttyUSB0, COM3)
    pub port: String,
    /// Short device name (identifier with the /dev/ prefix stripped)
    pub name: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// Hardware ID string
    pub hwid: Option<String>,
    /// USB Vendor ID (if USB)
    pub vid: Option<u16>,
    /// USB Product ID (if USB)
    pub pid: Option<u16>,
    /// USB serial number (if available)
    pub serial_number: Option<String>,
    /// Physical location string
    pub location: Option<String>,
    /// USB manufacturer string
    pub manufacturer: Option<String>,
    /// USB product string
    pub product: Option<String>,
    /// Interface label
    pub interface: Option<String>,
}

impl PortDetails {
    /// Create a descriptor carrying only the identifier
    ///
    /// Used for fallback-probed candidates where no metadata is available.
    pub fn new(port: impl Into<String>) -> Self {
        let port = port.into();
        Self {
            name: short_name(&port),
            port,
            description: None,
            hwid: None,
            vid: None,
            pid: None,
            serial_number: None,
            location: None,
            manufacturer: None,
            product: None,
            interface: None,
        }
    }

    /// Create from serialport crate's port info
    fn from_serialport(name: String, port_type: &SerialPortType) -> Self {
        let mut details = Self::new(name);
        match port_type {
            SerialPortType::UsbPort(usb) => {
                let mut hwid = format!("USB VID:PID={:04X}:{:04X}", usb.vid, usb.pid);
                if let Some(serial) = &usb.serial_number {
                    hwid.push_str(" SER=");
                    hwid.push_str(serial);
                }
                details.description = usb.product.clone();
                details.hwid = Some(hwid);
                details.vid = Some(usb.vid);
                details.pid = Some(usb.pid);
                details.serial_number = usb.serial_number.clone();
                details.manufacturer = usb.manufacturer.clone();
                details.product = usb.product.clone();
            }
            SerialPortType::PciPort => {
                details.description = Some("PCI serial port".to_string());
            }
            SerialPortType::BluetoothPort => {
                details.description = Some("Bluetooth serial port".to_string());
            }
            SerialPortType::Unknown => {}
        }
        details
    }
}

fn short_name(port: &str) -> Option<String> {
    let trimmed = port.strip_prefix("/dev/").unwrap_or(port);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Serial port scanner configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Drop ports whose identifier contains any of these substrings
    pub exclude_patterns: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![
                // Bluetooth ports on macOS
                "Bluetooth".to_string(),
                // Headset control endpoints
                "Jabra".to_string(),
                // Debug/logging ports
                "debug-console".to_string(),
            ],
        }
    }
}

/// Serial port scanner
pub struct PortScanner {
    config: ScannerConfig,
}

impl PortScanner {
    /// Create a new scanner with the default exclusion list
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
        }
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Enumerate attached ports, filter exclusions, and return the survivors
    ///
    /// When the primary enumeration backend is unavailable this degrades to
    /// a path-convention probe rather than failing; see [`fallback`].
    pub fn scan(&self) -> Vec<PortDetails> {
        let ports = match self.enumerate() {
            Ok(ports) => ports,
            Err(e) => {
                warn!("Port enumeration unavailable ({e}), probing known paths");
                fallback::probe_known_paths()
                    .into_iter()
                    .map(PortDetails::new)
                    .collect()
            }
        };
        self.apply_exclusions(ports)
    }

    /// Enumerate all available serial ports via the host backend
    pub fn enumerate(&self) -> Result<Vec<PortDetails>, ScanError> {
        let ports = available_ports().map_err(|e| ScanError::EnumerationFailed(e.to_string()))?;

        let result: Vec<_> = ports
            .into_iter()
            .map(|p| PortDetails::from_serialport(p.port_name, &p.port_type))
            .collect();

        if result.is_empty() {
            info!("No serial ports found");
        } else {
            info!("Found {} serial port(s)", result.len());
            for port in &result {
                let desc = port.product.as_deref().unwrap_or("Unknown");
                info!("  {} - {}", port.port, desc);
            }
        }

        Ok(result)
    }

    /// Drop descriptors whose identifier matches the exclusion list
    ///
    /// Case-sensitive substring match, first match wins. Order of the
    /// surviving descriptors is preserved.
    pub fn apply_exclusions(&self, ports: Vec<PortDetails>) -> Vec<PortDetails> {
        ports
            .into_iter()
            .filter(|p| !self.should_skip_port(p))
            .collect()
    }

    /// Check if a port should be skipped
    fn should_skip_port(&self, port: &PortDetails) -> bool {
        for pattern in &self.config.exclude_patterns {
            if port.port.contains(pattern) {
                return true;
            }
        }
        false
    }
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new()
    }
}
