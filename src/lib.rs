//! voxpipe - streaming speech-to-text driver for a voice backend
//!
//! Reads raw PCM audio from stdin, segments it into utterances with
//! energy-based voice activity detection, and emits JSON-lines transcription
//! events on stdout. A `fetch` subcommand downloads the model assets.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
#[cfg(feature = "fetch")]
pub mod assets;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod event;
pub mod stt;

// Core seams (decode → segment → transcribe → emit)
pub use audio::segmenter::{Segmenter, SegmenterConfig};
pub use event::{Event, EventSink};
pub use stt::transcriber::Transcriber;

// Error handling
pub use error::{Result, VoxpipeError};

// Config
pub use config::Config;
