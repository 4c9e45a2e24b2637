//! JSON-lines event protocol emitted on standard output.
//!
//! The consuming process (the API server that pipes audio into voxpipe)
//! parses one JSON object per line, discriminated by the `event` tag.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Events emitted by the transcriber process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Startup diagnostic, emitted before model initialization begins.
    LoadingModel {
        model: String,
        device: String,
        compute_type: String,
    },
    /// Initialization complete, the input stream is being consumed.
    Ready { message: String },
    /// An utterance boundary was finalized; transcription is starting.
    Processing,
    /// Completed utterance text. Only emitted for non-empty text;
    /// `final` is always true — no partial results are produced.
    Transcription {
        text: String,
        #[serde(rename = "final")]
        is_final: bool,
    },
    /// A transcription call failed; the read loop continues.
    Error { message: String },
    /// Interrupt received, process exiting.
    Stopping,
}

impl Event {
    /// Serialize to a compact single-line JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Convenience constructor for a final transcription event.
    pub fn transcription(text: impl Into<String>) -> Self {
        Event::Transcription {
            text: text.into(),
            is_final: true,
        }
    }
}

/// Writes events as JSON lines, flushing after every event.
///
/// The consumer reads line-by-line from a pipe, so each event must hit the
/// pipe immediately rather than sit in a BufWriter.
pub struct EventSink<W: Write> {
    writer: W,
}

impl<W: Write> EventSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one event as a JSON line and flush.
    pub fn emit(&mut self, event: &Event) -> Result<()> {
        let json = event.to_json()?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl EventSink<std::io::Stdout> {
    /// Event sink on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}
