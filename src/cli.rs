//! Command-line interface for voxpipe
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Streaming speech-to-text driver for a voice backend
#[derive(Parser, Debug)]
#[command(
    name = "voxpipe",
    version,
    about = "Streaming speech-to-text driver and model asset fetcher"
)]
pub struct Cli {
    /// Subcommand to execute (default: transcribe stdin)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Whisper model name or path to a ggml .bin file
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Language code for transcription. Examples: en, de, es, auto
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the backend's model assets (skips anything already present)
    Fetch {
        /// Directory to install assets into (default: from config)
        #[arg(long, value_name = "DIR")]
        model_dir: Option<PathBuf>,
    },
}
