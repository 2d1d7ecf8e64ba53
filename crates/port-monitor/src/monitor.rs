//! Presence polling loop
//!
//! The monitor re-scans once a second, diffs the surviving ports against
//! the expected set, and drives the alert player and status output:
//!
//! - a transition (availability flipped since the previous tick) plays a
//!   one-shot chime,
//! - the continuous alert loop is re-evaluated from the *current* state on
//!   every tick, so it persists for as long as a port stays missing and is
//!   stopped as soon as everything is back,
//! - all-present ticks overwrite a single progress line; missing ticks
//!   print the missing identifiers and a fresh detailed report.

use std::io::Write;
use std::time::Duration;

use port_scan::{render_details, PortDetails, PortScanner};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::alert::AlertPlayer;
use crate::sound::AlertSound;

/// Fixed delay between polling ticks
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Commands that can be sent to a running monitor
#[derive(Debug)]
pub enum MonitorCommand {
    /// Stop the polling loop and shut the alert task down
    Shutdown,
}

/// Source of the current port snapshot
///
/// The monitor only needs "what is attached right now"; the scanner is the
/// production implementation, tests substitute a scripted source.
pub trait PortSource: Send {
    /// Return the ports attached at this instant, already filtered
    fn current_ports(&mut self) -> Vec<PortDetails>;
}

impl PortSource for PortScanner {
    fn current_ports(&mut self) -> Vec<PortDetails> {
        self.scan()
    }
}

/// Identifiers from `expected` that are absent from `present`
///
/// Preserves the order of `expected`.
pub fn missing_ports(expected: &[String], present: &[String]) -> Vec<String> {
    expected
        .iter()
        .filter(|port| !present.contains(port))
        .cloned()
        .collect()
}

/// Watches an expected set of port identifiers until shut down
pub struct PresenceMonitor<S> {
    source: S,
    alert: AlertPlayer,
    expected: Vec<String>,
    poll_interval: Duration,
    /// Availability observed on the previous tick; optimistic before the
    /// first scan, which always runs before any transition judgment.
    all_present: bool,
    iterations: u64,
}

impl<S: PortSource> PresenceMonitor<S> {
    /// Create a monitor for the given expected identifiers
    pub fn new(source: S, alert: AlertPlayer, expected: Vec<String>) -> Self {
        Self {
            source,
            alert,
            expected,
            poll_interval: POLL_INTERVAL,
            all_present: true,
            iterations: 0,
        }
    }

    /// Override the polling interval
    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Number of completed polling ticks
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Whether the most recent tick saw every expected port
    pub fn all_present(&self) -> bool {
        self.all_present
    }

    /// Whether the continuous alert loop is currently active
    pub fn is_alerting(&self) -> bool {
        self.alert.is_looping()
    }

    /// Run the polling loop until a shutdown command arrives
    ///
    /// The loop has no terminal state of its own; the caller wires an
    /// interrupt signal to the command channel. The alert task is stopped
    /// before this returns.
    pub async fn run(mut self, mut cmd_rx: mpsc::Receiver<MonitorCommand>) {
        info!(
            "Monitoring {} expected port(s): {:?}",
            self.expected.len(),
            self.expected
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(MonitorCommand::Shutdown) | None => {
                            info!("Shutdown requested for presence monitor");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        self.alert.shutdown().await;
        info!("Presence monitor stopped after {} tick(s)", self.iterations);
    }

    /// Stop the alert task without running the polling loop
    ///
    /// Callers driving [`tick`](Self::tick) directly use this in place of
    /// the shutdown path at the end of [`run`](Self::run).
    pub async fn stop(&mut self) {
        self.alert.shutdown().await;
    }

    /// Run one polling tick: scan, diff, react, report
    pub async fn tick(&mut self) {
        let ports = self.source.current_ports();
        let present: Vec<String> = ports.iter().map(|p| p.port.clone()).collect();
        let missing = missing_ports(&self.expected, &present);
        let all_present = missing.is_empty();

        if all_present != self.all_present {
            debug!("Availability transition, all_present={all_present}");
            let chime = if all_present {
                AlertSound::Restored
            } else {
                AlertSound::Missing
            };
            self.alert.play_once(chime).await;
            self.all_present = all_present;
        }

        // Re-evaluated every tick from current state, not just on the
        // transition tick: the loop must persist while ports stay missing.
        if all_present {
            self.alert.stop_loop();
        } else {
            self.alert.start_loop();
        }

        self.iterations += 1;
        if all_present {
            print!("iterations = {}\r", self.iterations);
            let _ = std::io::stdout().flush();
        } else {
            println!("{}", render_details(&ports));
            println!("\n\n# MISSING: {missing:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_is_expected_minus_present() {
        let expected = ids(&["A", "B", "C"]);
        let present = ids(&["C", "A"]);

        assert_eq!(missing_ports(&expected, &present), ids(&["B"]));
    }

    #[test]
    fn test_missing_preserves_expected_order() {
        let expected = ids(&["C", "A", "B"]);
        let present = ids(&[]);

        assert_eq!(missing_ports(&expected, &present), ids(&["C", "A", "B"]));
    }

    #[test]
    fn test_all_present_iff_missing_empty() {
        let expected = ids(&["A", "B"]);

        assert!(missing_ports(&expected, &ids(&["A", "B", "X"])).is_empty());
        assert!(!missing_ports(&expected, &ids(&["A"])).is_empty());
    }

    proptest! {
        #[test]
        fn missing_never_contains_a_present_port(
            expected in proptest::collection::vec("[A-Z]{1,4}", 0..8),
            present in proptest::collection::vec("[A-Z]{1,4}", 0..8),
        ) {
            let missing = missing_ports(&expected, &present);
            for port in &missing {
                prop_assert!(!present.contains(port));
                prop_assert!(expected.contains(port));
            }
        }

        #[test]
        fn missing_is_empty_iff_expected_subset_of_present(
            expected in proptest::collection::vec("[A-Z]{1,4}", 0..8),
            present in proptest::collection::vec("[A-Z]{1,4}", 0..8),
        ) {
            let missing = missing_ports(&expected, &present);
            let subset = expected.iter().all(|p| present.contains(p));
            prop_assert_eq!(missing.is_empty(), subset);
        }
    }
}
