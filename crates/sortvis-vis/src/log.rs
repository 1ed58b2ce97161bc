//! Append-only activity log shown beside the animation.

use serde::{Deserialize, Serialize};
use sortvis_trace::NarrationGroup;

/// Body of a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogBody {
    /// A single narration line
    Line { text: String },
    /// A titled block summarizing a pass
    Group {
        icon: String,
        title: String,
        lines: Vec<String>,
    },
}

/// One entry of the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position since the last clear, starting at 0
    pub seq: u64,
    #[serde(flatten)]
    pub body: LogBody,
}

/// Entries in the order they were appended.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    next_seq: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a narration line.
    pub fn push_line(&mut self, text: impl Into<String>) -> LogEntry {
        self.push(LogBody::Line { text: text.into() })
    }

    /// Append a narration block.
    pub fn push_group(&mut self, group: &NarrationGroup) -> LogEntry {
        self.push(LogBody::Group {
            icon: group.icon.clone(),
            title: group.title.clone(),
            lines: group.lines.clone(),
        })
    }

    fn push(&mut self, body: LogBody) -> LogEntry {
        let entry = LogEntry {
            seq: self.next_seq,
            body,
        };
        self.next_seq += 1;
        self.entries.push(entry.clone());
        entry
    }

    /// Drop every entry and restart numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
