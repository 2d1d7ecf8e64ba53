//! Audible alerts
//!
//! One-shot transition chimes plus the continuous background alert loop.
//! The loop runs in its own spawned task; the only state shared with the
//! foreground is a cancellation flag, polled between plays at 10 ms
//! granularity so a stop is observed within roughly 100 ms.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::sound::{AlertSound, SoundPlayer};

/// How long `shutdown` waits for the loop task to observe the stop flag
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Cancellation poll cadence inside the loop task
const CANCEL_POLL: Duration = Duration::from_millis(10);
const CANCEL_POLLS_PER_CYCLE: u32 = 10;

struct AlertTask {
    playing: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Owns the transition chimes and the background alert loop
///
/// At most one loop task exists at a time; `start_loop` and `stop_loop`
/// are idempotent and non-blocking.
pub struct AlertPlayer {
    player: Arc<dyn SoundPlayer>,
    active: Option<AlertTask>,
}

impl AlertPlayer {
    /// Create an alert player on top of a platform sound capability
    pub fn new(player: Arc<dyn SoundPlayer>) -> Self {
        Self {
            player,
            active: None,
        }
    }

    /// Play one discrete sound, swallowing playback failures
    pub async fn play_once(&self, sound: AlertSound) {
        if let Err(e) = self.player.play(sound).await {
            warn!("Sound playback failed ({}): {e}", self.player.name());
        }
    }

    /// Whether the background alert loop is currently running
    pub fn is_looping(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|task| task.playing.load(Ordering::SeqCst))
    }

    /// Start the background alert loop
    ///
    /// No-op if a loop is already running. Returns whether a new task was
    /// spawned.
    pub fn start_loop(&mut self) -> bool {
        if self.is_looping() {
            return false;
        }

        let playing = Arc::new(AtomicBool::new(true));
        let handle = tokio::spawn(run_alert_loop(self.player.clone(), playing.clone()));
        self.active = Some(AlertTask { playing, handle });
        true
    }

    /// Signal the background loop to stop and return immediately
    ///
    /// The task observes the flag on its next poll; no-op when no loop is
    /// running.
    pub fn stop_loop(&mut self) {
        if let Some(task) = &self.active {
            task.playing.store(false, Ordering::SeqCst);
        }
    }

    /// Stop the loop and wait briefly for the task to exit
    ///
    /// Used on the interrupt path so no audio process outlives the monitor.
    pub async fn shutdown(&mut self) {
        self.stop_loop();
        if let Some(task) = self.active.take() {
            if timeout(SHUTDOWN_GRACE, task.handle).await.is_err() {
                warn!("Alert task did not stop within {:?}", SHUTDOWN_GRACE);
            }
        }
    }
}

async fn run_alert_loop(player: Arc<dyn SoundPlayer>, playing: Arc<AtomicBool>) {
    debug!("Alert loop started ({})", player.name());

    while playing.load(Ordering::SeqCst) {
        if let Err(e) = player.play(AlertSound::Alarm).await {
            warn!("Alert playback failed, stopping loop: {e}");
            playing.store(false, Ordering::SeqCst);
            break;
        }

        // Short poll intervals keep stop_loop responsive between plays.
        for _ in 0..CANCEL_POLLS_PER_CYCLE {
            if !playing.load(Ordering::SeqCst) {
                break;
            }
            sleep(CANCEL_POLL).await;
        }
    }

    debug!("Alert loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SoundError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingPlayer {
        plays: Mutex<Vec<AlertSound>>,
        fail: bool,
    }

    impl RecordingPlayer {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                plays: Mutex::new(Vec::new()),
                fail,
            })
        }

        fn plays(&self) -> Vec<AlertSound> {
            self.plays.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SoundPlayer for RecordingPlayer {
        async fn play(&self, sound: AlertSound) -> Result<(), SoundError> {
            self.plays.lock().unwrap().push(sound);
            if self.fail {
                Err(SoundError::Launch {
                    command: "test-player",
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                })
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_start_loop_is_idempotent() {
        let recording = RecordingPlayer::new(false);
        let mut alert = AlertPlayer::new(recording.clone());

        assert!(alert.start_loop());
        assert!(!alert.start_loop());
        assert!(alert.is_looping());

        alert.shutdown().await;
        assert!(!alert.is_looping());
    }

    #[tokio::test]
    async fn test_stop_without_loop_is_noop() {
        let recording = RecordingPlayer::new(false);
        let mut alert = AlertPlayer::new(recording.clone());

        alert.stop_loop();
        assert!(!alert.is_looping());
        assert!(recording.plays().is_empty());

        alert.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_is_observed_promptly() {
        let recording = RecordingPlayer::new(false);
        let mut alert = AlertPlayer::new(recording.clone());

        alert.start_loop();
        sleep(Duration::from_millis(30)).await;
        alert.stop_loop();

        // shutdown's bounded wait must succeed well within the grace period
        alert.shutdown().await;

        let plays = recording.plays();
        assert!(!plays.is_empty());
        assert!(plays.iter().all(|s| *s == AlertSound::Alarm));
    }

    #[tokio::test]
    async fn test_playback_failure_halts_loop() {
        let recording = RecordingPlayer::new(true);
        let mut alert = AlertPlayer::new(recording.clone());

        alert.start_loop();

        // The first failed play clears the flag and exits the task.
        for _ in 0..50 {
            if !alert.is_looping() {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }

        assert!(!alert.is_looping());
        assert_eq!(recording.plays().len(), 1);
        alert.shutdown().await;
    }

    #[tokio::test]
    async fn test_restart_after_stop_spawns_fresh_loop() {
        let recording = RecordingPlayer::new(false);
        let mut alert = AlertPlayer::new(recording.clone());

        alert.start_loop();
        alert.stop_loop();
        assert!(!alert.is_looping());

        assert!(alert.start_loop());
        assert!(alert.is_looping());
        alert.shutdown().await;
    }

    #[tokio::test]
    async fn test_play_once_swallows_failures() {
        let recording = RecordingPlayer::new(true);
        let alert = AlertPlayer::new(recording.clone());

        alert.play_once(AlertSound::Missing).await;
        assert_eq!(recording.plays(), vec![AlertSound::Missing]);
    }
}
