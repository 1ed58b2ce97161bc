//! The visualizer: immutable config, one mutable session, one driver.
//!
//! [`Visualizer`] exposes the controls surface as plain methods:
//! [`run`](Visualizer::run), [`reset`](Visualizer::reset) and
//! [`clear_log`](Visualizer::clear_log). Run and reset are refused while a
//! playback is in flight; there is no way to interrupt a run once started.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use sortvis_trace::{generate, random_array, Frame, Step, TraceSummary, Verbosity};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::log::{ActivityLog, LogEntry};
use crate::playback::{PlaybackDriver, PlaybackStatus};
use crate::renderer::Renderer;

const READY_MESSAGE: &str = "New array generated. Ready to sort!";
const DONE_MESSAGE: &str = "Done! The array is sorted.";

/// Mutable state owned by a visualizer.
struct Session {
    array: Vec<f64>,
    steps: Vec<Step>,
    log: ActivityLog,
    status: String,
    /// Last frame handed to the renderer
    frame: Frame,
    rng: StdRng,
}

/// How a call to [`Visualizer::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The full trace was replayed.
    Completed(TraceSummary),
    /// A playback was already active.
    Busy,
}

/// Selection sort visualizer driving a [`Renderer`].
pub struct Visualizer<R> {
    config: VisConfig,
    session: Mutex<Session>,
    driver: PlaybackDriver,
    renderer: Mutex<R>,
}

/// Re-enables the controls when a run ends, however it ends.
struct ControlsRelease<'a, R: Renderer> {
    renderer: &'a Mutex<R>,
}

impl<R: Renderer> Drop for ControlsRelease<'_, R> {
    fn drop(&mut self) {
        lock(self.renderer).controls(true);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R: Renderer> Visualizer<R> {
    /// Create a visualizer and draw its first random array.
    pub fn new(config: VisConfig, renderer: R) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let array = random_array(&config.array, &mut rng)?;
        let frame = Frame::idle(&array);

        let vis = Self {
            config,
            session: Mutex::new(Session {
                array,
                steps: Vec::new(),
                log: ActivityLog::new(),
                status: READY_MESSAGE.to_string(),
                frame,
                rng,
            }),
            driver: PlaybackDriver::new(),
            renderer: Mutex::new(renderer),
        };
        vis.present_idle();
        Ok(vis)
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    /// Current array values.
    pub fn array(&self) -> Vec<f64> {
        lock(&self.session).array.clone()
    }

    /// Steps of the current or last run; empty after a reset.
    pub fn steps(&self) -> Vec<Step> {
        lock(&self.session).steps.clone()
    }

    /// Current status line.
    pub fn status_text(&self) -> String {
        lock(&self.session).status.clone()
    }

    /// Log entries since the last clear.
    pub fn log(&self) -> Vec<LogEntry> {
        lock(&self.session).log.entries().to_vec()
    }

    /// Idle view of the current array.
    pub fn idle_frame(&self) -> Frame {
        Frame::idle(&lock(&self.session).array)
    }

    /// Frame currently on screen: the step being played, or the idle array.
    pub fn current_frame(&self) -> Frame {
        lock(&self.session).frame.clone()
    }

    pub fn playback(&self) -> PlaybackStatus {
        self.driver.status()
    }

    pub fn is_playing(&self) -> bool {
        self.driver.is_active()
    }

    /// Watch playback state; the return to idle re-enables the controls.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.driver.subscribe()
    }

    /// Access the renderer.
    pub fn renderer(&self) -> MutexGuard<'_, R> {
        lock(&self.renderer)
    }

    /// Trace the current array and replay it through the renderer.
    ///
    /// Returns [`RunOutcome::Busy`] without side effects if another run is
    /// active.
    pub async fn run(&self) -> Result<RunOutcome> {
        self.run_reporting(|_| {}).await
    }

    /// Same as [`run`](Self::run), calling `on_claim` as soon as it is known
    /// whether this call owns playback.
    pub async fn run_reporting<F>(&self, on_claim: F) -> Result<RunOutcome>
    where
        F: FnOnce(bool),
    {
        let Some(active) = self.driver.try_start() else {
            debug!("Run requested while playback active");
            on_claim(false);
            return Ok(RunOutcome::Busy);
        };
        on_claim(true);

        let steps = {
            let mut session = lock(&self.session);
            let steps = generate(&session.array, self.config.verbosity)?;
            session.steps = steps.clone();
            session.log.clear();
            steps
        };
        let summary = TraceSummary::of(&steps);
        info!(
            "Running selection sort on {} elements ({} steps, {} comparisons, {} swaps)",
            steps.first().map_or(0, Step::len),
            summary.steps,
            summary.comparisons,
            summary.swaps
        );

        {
            let mut renderer = lock(&self.renderer);
            renderer.controls(false);
            renderer.clear_log();
        }
        let release = ControlsRelease {
            renderer: &self.renderer,
        };

        let outcome = active
            .run(&steps, |step| self.present_step(step), self.config.interval)
            .await;
        debug!("Playback outcome: {:?}", outcome);

        self.set_status(DONE_MESSAGE);
        drop(release);

        Ok(RunOutcome::Completed(summary))
    }

    /// Replace the array with a fresh random one and clear the log.
    pub fn reset(&self) -> Result<()> {
        if self.driver.is_active() {
            return Err(Error::PlaybackActive);
        }

        {
            let mut session = lock(&self.session);
            let session = &mut *session;
            session.array = random_array(&self.config.array, &mut session.rng)?;
            session.steps.clear();
            session.log.clear();
            session.status = READY_MESSAGE.to_string();
        }
        info!("Array reset");

        self.renderer().clear_log();
        self.present_idle();
        Ok(())
    }

    /// Empty the log. Allowed at any time.
    pub fn clear_log(&self) {
        lock(&self.session).log.clear();
        self.renderer().clear_log();
    }

    fn set_status(&self, text: &str) {
        lock(&self.session).status = text.to_string();
        self.renderer().status(text);
    }

    fn present_idle(&self) {
        let (frame, status) = {
            let mut session = lock(&self.session);
            session.frame = Frame::idle(&session.array);
            (session.frame.clone(), session.status.clone())
        };
        let mut renderer = self.renderer();
        renderer.render(&frame);
        renderer.status(&status);
        renderer.controls(true);
    }

    fn present_step(&self, step: &Step) {
        debug!("Presenting {} step (line {})", step.kind, step.code_line);
        let frame = Frame::from_step(step);
        let entry = {
            let mut session = lock(&self.session);
            session.status = step.narration.clone();
            session.frame = frame.clone();
            match (self.config.verbosity, &step.group) {
                (Verbosity::Fine, _) => Some(session.log.push_line(step.narration.as_str())),
                (Verbosity::Grouped, Some(group)) => Some(session.log.push_group(group)),
                (Verbosity::Grouped, None) => None,
            }
        };

        let mut renderer = self.renderer();
        renderer.render(&frame);
        renderer.status(&step.narration);
        if let Some(entry) = entry {
            renderer.append_log(&entry);
        }
    }
}
