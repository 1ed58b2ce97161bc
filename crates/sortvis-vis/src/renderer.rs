//! Rendering seam between the visualizer and whatever draws it.

use sortvis_trace::{Frame, Highlight};
use tokio::sync::broadcast;

use crate::events::ViewEvent;
use crate::log::{LogBody, LogEntry};

/// Receives view updates from a [`Visualizer`](crate::Visualizer).
///
/// Calls are made synchronously from the playback loop and must not block.
pub trait Renderer: Send {
    fn render(&mut self, frame: &Frame);
    fn status(&mut self, text: &str);
    fn append_log(&mut self, entry: &LogEntry);
    fn clear_log(&mut self);
    fn controls(&mut self, enabled: bool);
}

/// Fans view updates out to WebSocket clients.
#[derive(Debug, Clone)]
pub struct ChannelRenderer {
    tx: broadcast::Sender<ViewEvent>,
}

impl ChannelRenderer {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.tx.subscribe()
    }

    pub fn sender(&self) -> broadcast::Sender<ViewEvent> {
        self.tx.clone()
    }

    fn emit(&self, event: ViewEvent) {
        // No connected viewers is fine.
        let _ = self.tx.send(event);
    }
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, frame: &Frame) {
        self.emit(ViewEvent::Frame {
            frame: frame.clone(),
        });
    }

    fn status(&mut self, text: &str) {
        self.emit(ViewEvent::Status {
            text: text.to_string(),
        });
    }

    fn append_log(&mut self, entry: &LogEntry) {
        self.emit(ViewEvent::Log {
            entry: entry.clone(),
        });
    }

    fn clear_log(&mut self) {
        self.emit(ViewEvent::ClearLog);
    }

    fn controls(&mut self, enabled: bool) {
        self.emit(ViewEvent::Controls { enabled });
    }
}

/// Prints the log and bars to stdout for headless runs.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    show_bars: bool,
}

impl ConsoleRenderer {
    pub fn new(show_bars: bool) -> Self {
        Self { show_bars }
    }
}

/// One-line text rendering of a frame: `[ 12 <34> *56* =78= ]`.
pub fn bar_line(frame: &Frame) -> String {
    let cells: Vec<String> = frame
        .bars
        .iter()
        .map(|bar| match bar.highlight {
            Highlight::Default => format!(" {} ", bar.value),
            Highlight::Comparing => format!("<{}>", bar.value),
            Highlight::Minimum => format!("*{}*", bar.value),
            Highlight::Sorted => format!("={}=", bar.value),
        })
        .collect();
    format!("[{}]", cells.join(" "))
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, frame: &Frame) {
        if self.show_bars {
            println!("    {}", bar_line(frame));
        }
    }

    fn status(&mut self, _text: &str) {}

    fn append_log(&mut self, entry: &LogEntry) {
        match &entry.body {
            LogBody::Line { text } => println!("{:>4}  {}", entry.seq, text),
            LogBody::Group { icon, title, lines } => {
                if title.is_empty() {
                    println!("{:>4}  {}", entry.seq, icon);
                } else {
                    println!("{:>4}  {} {}", entry.seq, icon, title);
                }
                for line in lines {
                    println!("        {}", line);
                }
            }
        }
    }

    fn clear_log(&mut self) {}

    fn controls(&mut self, _enabled: bool) {}
}

/// Keeps every update, for inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub events: Vec<ViewEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> Vec<&Frame> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Frame { frame } => Some(frame),
                _ => None,
            })
            .collect()
    }

    /// The most recent status text.
    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Status { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) {
        self.events.push(ViewEvent::Frame {
            frame: frame.clone(),
        });
    }

    fn status(&mut self, text: &str) {
        self.events.push(ViewEvent::Status {
            text: text.to_string(),
        });
    }

    fn append_log(&mut self, entry: &LogEntry) {
        self.events.push(ViewEvent::Log {
            entry: entry.clone(),
        });
    }

    fn clear_log(&mut self) {
        self.events.push(ViewEvent::ClearLog);
    }

    fn controls(&mut self, enabled: bool) {
        self.events.push(ViewEvent::Controls { enabled });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortvis_trace::{generate, StepKind, Verbosity};

    #[test]
    fn bar_line_marks_highlights() {
        let steps = generate(&[5.0, 3.0, 1.0], Verbosity::Grouped).unwrap();
        let compare = steps.iter().find(|s| s.kind == StepKind::Compare).unwrap();
        assert_eq!(bar_line(&Frame::from_step(compare)), "[*5* <3>  1 ]");
    }

    #[test]
    fn channel_renderer_without_viewers_does_not_fail() {
        let mut renderer = ChannelRenderer::new(8);
        renderer.status("nobody listening");
        renderer.clear_log();
    }

    #[tokio::test]
    async fn channel_renderer_delivers_in_order() {
        let mut renderer = ChannelRenderer::new(8);
        let mut rx = renderer.subscribe();

        renderer.status("ready");
        renderer.controls(false);

        assert_eq!(
            rx.recv().await.unwrap(),
            ViewEvent::Status { text: "ready".into() }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            ViewEvent::Controls { enabled: false }
        );
    }
}
