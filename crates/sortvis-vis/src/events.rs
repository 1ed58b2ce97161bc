//! Messages exchanged with the viewer.

use serde::{Deserialize, Serialize};
use sortvis_trace::Frame;

use crate::log::LogEntry;
use crate::playback::PlaybackStatus;

/// Updates pushed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// Redraw the bars and code highlight
    Frame { frame: Frame },
    /// Replace the status line
    Status { text: String },
    /// Append to the log
    Log { entry: LogEntry },
    /// Empty the log
    ClearLog,
    /// Enable or disable the run and reset controls
    Controls { enabled: bool },
    /// Playback progress
    Playback { status: PlaybackStatus },
}

/// No-argument triggers accepted from the controls surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Run,
    Reset,
    ClearLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parsing() {
        let cmd: Command = serde_json::from_str(r#"{"type":"clear_log"}"#).unwrap();
        assert_eq!(cmd, Command::ClearLog);
        let cmd: Command = serde_json::from_str(r#"{"type":"run"}"#).unwrap();
        assert_eq!(cmd, Command::Run);
        assert!(serde_json::from_str::<Command>(r#"{"type":"pause"}"#).is_err());
    }

    #[test]
    fn event_serialization() {
        let event = ViewEvent::Frame {
            frame: Frame::idle(&[10.0, 20.0]),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"frame""#));
        assert!(json.contains(r#""highlight":"default""#));

        let parsed: ViewEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn unit_variants_carry_only_tag() {
        let json = serde_json::to_string(&ViewEvent::ClearLog).unwrap();
        assert_eq!(json, r#"{"type":"clear_log"}"#);
    }
}
