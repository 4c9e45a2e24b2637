//! Transcriber entry point: the stdin read loop.
//!
//! Reads fixed-size PCM frames from standard input, feeds them through the
//! utterance segmenter, and runs finished utterances through the transcriber,
//! emitting events on standard output. Transcription is a blocking call made
//! inline in the loop — audio arriving meanwhile accumulates in the OS pipe
//! buffer and is consumed once the call returns.

use crate::audio::frame::decode_pcm16;
use crate::audio::segmenter::{Segmenter, SegmenterConfig};
use crate::config::Config;
use crate::defaults;
use crate::error::{Result, VoxpipeError};
use crate::event::{Event, EventSink};
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Run the streaming transcriber until stdin closes or Ctrl+C.
///
/// Model load happens once, before any audio is consumed; the `loading_model`
/// event precedes it and `ready` follows it.
pub async fn run_transcribe(config: Config) -> Result<()> {
    let mut sink = EventSink::stdout();
    sink.emit(&Event::LoadingModel {
        model: config.stt.model.clone(),
        device: defaults::device_name().to_string(),
        compute_type: defaults::compute_type().to_string(),
    })?;

    let model_path = resolve_model_path(&config.stt.model, &config.assets.model_dir);
    let transcriber = WhisperTranscriber::new(WhisperConfig {
        model_path,
        language: config.stt.language.clone(),
        threads: None,
    })?;

    sink.emit(&Event::Ready {
        message: "Listening...".to_string(),
    })?;

    let segmenter_config = SegmenterConfig {
        vad_threshold: config.audio.vad_threshold,
        silence_frames: config.audio.silence_frames,
    };

    let read_loop = tokio::task::spawn_blocking(move || {
        let mut reader = std::io::stdin().lock();
        let mut sink = EventSink::stdout();
        run_loop(&mut reader, &mut sink, &transcriber, segmenter_config)
    });

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    match race_shutdown(read_loop, shutdown, &mut sink).await? {
        LoopEnd::Interrupted => {
            // The read loop is still blocked on stdin and cannot be
            // cancelled; returning would leave runtime shutdown joining it
            // until the pipe closes, and the loop could then emit events
            // after `stopping`. stdout was flushed when the event was
            // emitted, so leave right here.
            std::process::exit(0);
        }
        LoopEnd::StreamClosed => Ok(()),
    }
}

/// How a transcriber session ended.
#[derive(Debug, PartialEq)]
enum LoopEnd {
    /// The shutdown signal arrived while the read loop was still running.
    Interrupted,
    /// Stdin reached end of stream and the loop drained normally.
    StreamClosed,
}

/// Race the blocking read loop against a shutdown signal.
///
/// On interrupt a final `stopping` event is emitted and the read loop is
/// abandoned mid-read; the caller must exit without waiting for it.
async fn race_shutdown<W, S>(
    read_loop: tokio::task::JoinHandle<Result<()>>,
    shutdown: S,
    sink: &mut EventSink<W>,
) -> Result<LoopEnd>
where
    W: std::io::Write,
    S: Future<Output = ()>,
{
    tokio::select! {
        _ = shutdown => {
            sink.emit(&Event::Stopping)?;
            Ok(LoopEnd::Interrupted)
        }
        result = read_loop => {
            result.map_err(|e| VoxpipeError::Other(format!("read loop panicked: {e}")))??;
            Ok(LoopEnd::StreamClosed)
        }
    }
}

/// The synchronous frame loop, parameterized for testing.
///
/// Consumes `reader` until EOF. Frame boundaries are imposed solely by
/// reading a fixed byte count; trailing bytes short of one frame are dropped.
/// At EOF a still-open utterance buffer is flushed and transcribed.
pub fn run_loop<R: Read, W: std::io::Write>(
    reader: &mut R,
    sink: &mut EventSink<W>,
    transcriber: &dyn Transcriber,
    config: SegmenterConfig,
) -> Result<()> {
    let mut segmenter = Segmenter::new(config);
    let mut frame_bytes = vec![0u8; defaults::FRAME_BYTES];

    while read_frame(reader, &mut frame_bytes)? {
        let frame = decode_pcm16(&frame_bytes);
        if let Some(utterance) = segmenter.push(&frame) {
            handle_utterance(&utterance, sink, transcriber)?;
        }
    }

    if let Some(utterance) = segmenter.flush() {
        handle_utterance(&utterance, sink, transcriber)?;
    }

    Ok(())
}

/// Emit `processing`, transcribe, and emit the outcome.
///
/// A transcription failure is reported as an `error` event and the loop
/// continues; the failed utterance's audio is discarded.
fn handle_utterance<W: std::io::Write>(
    audio: &[f32],
    sink: &mut EventSink<W>,
    transcriber: &dyn Transcriber,
) -> Result<()> {
    sink.emit(&Event::Processing)?;

    match transcriber.transcribe(audio) {
        Ok(text) if !text.is_empty() => {
            sink.emit(&Event::transcription(text))?;
        }
        Ok(_) => {
            // Empty decode: suppress the event, state is already reset
        }
        Err(e) => {
            sink.emit(&Event::Error {
                message: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Fill `buf` with exactly one frame of bytes.
///
/// Returns false at end of stream; a partial trailing read below one frame
/// is dropped.
fn read_frame<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

/// Resolve a model name to a file path under the model directory.
///
/// Names containing a path separator (or absolute paths) are used verbatim;
/// bare names map to `<model_dir>/ggml-<name>.bin`.
fn resolve_model_path(model: &str, model_dir: &Path) -> PathBuf {
    let path = PathBuf::from(model);
    if path.is_absolute() || model.contains('/') {
        return path;
    }

    let filename = if model.ends_with(".bin") {
        model.to_string()
    } else {
        format!("ggml-{model}.bin")
    };
    model_dir.join(filename)
}
