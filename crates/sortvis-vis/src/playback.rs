//! Timed playback of a step sequence.
//!
//! The driver owns the only piece of shared playback state: a watch channel
//! holding [`PlaybackStatus`]. Starting a run is a test-and-set on that
//! channel, so at most one run is ever active per driver. Subscribers see the
//! transition back to [`PlaybackState::Idle`] as the completion signal.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortvis_trace::Step;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No run in flight
    Idle,
    /// A run is replaying steps
    Playing,
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    /// Steps handed to the callback so far in the current or last run
    pub current_step: usize,
    pub total_steps: usize,
    pub progress: f64,
    /// Runs that reached their last step
    pub runs_completed: u64,
}

impl PlaybackStatus {
    fn idle() -> Self {
        Self {
            state: PlaybackState::Idle,
            current_step: 0,
            total_steps: 0,
            progress: 0.0,
            runs_completed: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

/// How a call to [`PlaybackDriver::play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every step was delivered.
    Completed { steps: usize },
    /// Another run was already active; nothing was delivered.
    Rejected,
}

/// Replays steps through a callback with a fixed pause between them.
#[derive(Debug)]
pub struct PlaybackDriver {
    status: watch::Sender<PlaybackStatus>,
}

impl Default for PlaybackDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackDriver {
    /// Create an idle driver.
    pub fn new() -> Self {
        let (status, _) = watch::channel(PlaybackStatus::idle());
        Self { status }
    }

    /// Whether a run is in flight.
    pub fn is_active(&self) -> bool {
        self.status.borrow().is_playing()
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> PlaybackStatus {
        self.status.borrow().clone()
    }

    /// Watch status changes, including the return to idle.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.subscribe()
    }

    /// Claim the driver for a run.
    ///
    /// Returns `None` when a run is already active. The driver goes back to
    /// idle when the returned handle is dropped, whether or not it was used.
    pub fn try_start(&self) -> Option<ActivePlayback<'_>> {
        let claimed = self.status.send_if_modified(|status| {
            if status.is_playing() {
                return false;
            }
            status.state = PlaybackState::Playing;
            status.current_step = 0;
            status.total_steps = 0;
            status.progress = 0.0;
            true
        });

        if !claimed {
            return None;
        }
        debug!("Playback claimed");
        Some(ActivePlayback {
            status: &self.status,
            finished: false,
        })
    }

    /// Deliver `steps` to `on_step` in order, sleeping `interval` after each.
    ///
    /// A call made while another run is active returns
    /// [`PlayOutcome::Rejected`] without touching the callback.
    pub async fn play<F>(&self, steps: &[Step], on_step: F, interval: Duration) -> PlayOutcome
    where
        F: FnMut(&Step),
    {
        match self.try_start() {
            Some(active) => active.run(steps, on_step, interval).await,
            None => {
                warn!("Playback already active, ignoring play request");
                PlayOutcome::Rejected
            }
        }
    }
}

/// Exclusive handle on a driver for the duration of one run.
pub struct ActivePlayback<'a> {
    status: &'a watch::Sender<PlaybackStatus>,
    finished: bool,
}

impl ActivePlayback<'_> {
    /// Replay `steps`, consuming the claim.
    pub async fn run<F>(mut self, steps: &[Step], mut on_step: F, interval: Duration) -> PlayOutcome
    where
        F: FnMut(&Step),
    {
        let total = steps.len();
        self.status.send_modify(|status| status.total_steps = total);
        info!("Playback started: {} steps every {:?}", total, interval);

        for (index, step) in steps.iter().enumerate() {
            on_step(step);
            self.status.send_modify(|status| {
                status.current_step = index + 1;
                status.progress = (index + 1) as f64 / total as f64;
            });
            tokio::time::sleep(interval).await;
        }

        self.finished = true;
        info!("Playback finished");
        PlayOutcome::Completed { steps: total }
    }
}

impl Drop for ActivePlayback<'_> {
    fn drop(&mut self) {
        let finished = self.finished;
        self.status.send_modify(|status| {
            status.state = PlaybackState::Idle;
            if finished {
                status.runs_completed += 1;
            }
        });
    }
}
