//! Selection Sort Visualization
//!
//! Timed playback of selection sort traces with a browser viewer.
//!
//! # Architecture
//!
//! - **Trace**: [`sortvis_trace`] turns an array into an ordered step sequence
//! - **Playback**: [`PlaybackDriver`] replays steps, one at a time, with a
//!   fixed pause and a single-run guard
//! - **Visualizer**: immutable [`VisConfig`] plus a mutable session, exposed
//!   as `run` / `reset` / `clear_log`
//! - **Renderer**: the seam to whatever draws the bars and the log
//! - **WebSocket**: [`VisServer`] streams [`ViewEvent`]s to the viewer page
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let server = VisServer::new(config)?;
//! server.serve().await?;
//! ```

mod config;
mod error;
mod events;
mod log;
mod playback;
mod renderer;
mod server;
mod session;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use events::{Command, ViewEvent};
pub use log::{ActivityLog, LogBody, LogEntry};
pub use playback::{ActivePlayback, PlayOutcome, PlaybackDriver, PlaybackState, PlaybackStatus};
pub use renderer::{bar_line, ChannelRenderer, ConsoleRenderer, RecordingRenderer, Renderer};
pub use server::VisServer;
pub use session::{RunOutcome, Visualizer};
