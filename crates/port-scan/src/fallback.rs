//! Degraded-mode port discovery
//!
//! Used when the primary enumeration backend is unavailable. Candidates are
//! produced by probing well-known OS naming conventions; there is no
//! guarantee they correspond to attached hardware.

/// Probe the host for port identifiers by naming convention
///
/// The result is sorted so repeated probes of an unchanged host are
/// identical.
pub fn probe_known_paths() -> Vec<String> {
    let mut found = probe_os();
    found.sort();
    found
}

/// macOS call-up and terminal device nodes under /dev
#[cfg(target_os = "macos")]
fn probe_os() -> Vec<String> {
    scan_dev(|name| name.starts_with("cu.") || name.starts_with("tty."))
}

/// Linux tty nodes with a driver suffix (ttyUSB0, ttyACM0, ttyS0, ...)
#[cfg(target_os = "linux")]
fn probe_os() -> Vec<String> {
    scan_dev(|name| {
        name.strip_prefix("tty")
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

/// Windows has no probe-able namespace; offer the conventional COM range
#[cfg(windows)]
fn probe_os() -> Vec<String> {
    (1..=32).map(|n| format!("COM{n}")).collect()
}

#[cfg(not(any(target_os = "macos", target_os = "linux", windows)))]
fn probe_os() -> Vec<String> {
    Vec::new()
}

#[cfg(any(target_os = "macos", target_os = "linux"))]
fn scan_dev(keep: impl Fn(&str) -> bool) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir("/dev") else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| keep(name))
        .map(|name| format!("/dev/{name}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_is_deterministic() {
        assert_eq!(probe_known_paths(), probe_known_paths());
    }

    #[test]
    fn test_probe_results_are_sorted() {
        let probed = probe_known_paths();
        let mut sorted = probed.clone();
        sorted.sort();
        assert_eq!(probed, sorted);
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    #[test]
    fn test_candidates_are_dev_paths() {
        for candidate in probe_known_paths() {
            assert!(candidate.starts_with("/dev/"), "unexpected: {candidate}");
        }
    }

    #[cfg(windows)]
    #[test]
    fn test_candidates_are_com_ports() {
        let probed = probe_known_paths();
        assert!(!probed.is_empty());
        for candidate in &probed {
            assert!(candidate.starts_with("COM"), "unexpected: {candidate}");
        }
    }
}
