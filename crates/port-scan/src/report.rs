//! Text reports for port listings
//!
//! The rendered strings are consumed by downstream scripting, so the exact
//! headers and the 25-column label layout must not drift.

use crate::scanner::PortDetails;

/// Report emitted when a scan finds nothing
pub const NO_PORTS_FOUND: &str = "\n\n# NO SERIAL PORT FOUND";

const LABEL_WIDTH: usize = 25;

/// Render the one-line-per-port summary
pub fn render_summary(ports: &[PortDetails]) -> String {
    if ports.is_empty() {
        return NO_PORTS_FOUND.to_string();
    }

    let mut out = String::from("\n\n# SERIAL PORTS SUMMARY\n");
    for (counter, port) in ports.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("- {}. port.device: {}", counter, port.port));
    }
    out
}

/// Render the full-field dump, one block per port
pub fn render_details(ports: &[PortDetails]) -> String {
    if ports.is_empty() {
        return NO_PORTS_FOUND.to_string();
    }

    let mut out = String::from("\n\n# SERIAL PORTS DETAILS");
    for (counter, port) in ports.iter().enumerate() {
        out.push('\n');
        push_field(&mut out, "- ID:", &counter.to_string());
        push_field(&mut out, "  port.device:", &port.port);
        push_field(&mut out, "  port.name:", &opt(&port.name));
        push_field(&mut out, "  port.description:", &opt(&port.description));
        push_field(&mut out, "  port.hwid:", &opt(&port.hwid));
        push_field(&mut out, "  port.vid:", &opt(&port.vid));
        push_field(&mut out, "  port.pid:", &opt(&port.pid));
        push_field(&mut out, "  port.serial_number:", &opt(&port.serial_number));
        push_field(&mut out, "  port.location:", &opt(&port.location));
        push_field(&mut out, "  port.manufacturer:", &opt(&port.manufacturer));
        push_field(&mut out, "  port.product:", &opt(&port.product));
        push_field(&mut out, "  port.interface:", &opt(&port.interface));
    }
    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push('\n');
    out.push_str(&format!("{:<width$}{}", label, value, width = LABEL_WIDTH));
}

fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}
