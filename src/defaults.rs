//! Default configuration constants for voxpipe.
//!
//! Shared constants used across the segmentation loop, the transcriber, and
//! the configuration types, kept in one place for consistency.

/// Audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and the format the upstream
/// audio producer pipes into this process.
pub const SAMPLE_RATE: u32 = 16000;

/// Number of samples per input frame (~0.2s of audio at 16kHz).
pub const FRAME_SAMPLES: usize = 3200;

/// Number of bytes per input frame (16-bit samples).
pub const FRAME_BYTES: usize = FRAME_SAMPLES * 2;

/// RMS threshold above which a frame is considered voiced.
///
/// Measured on the [-1, 1] normalized scale. 0.01 is tuned for typical
/// line-level input; background hum sits well below it.
pub const VAD_THRESHOLD: f32 = 0.01;

/// Number of consecutive silent frames after voice before an utterance is
/// finalized (~1.6s at the configured frame size).
///
/// Requiring a sustained run of silence, not a single quiet frame, bounds
/// false cutoffs on natural pauses in speech.
pub const SILENCE_FRAMES: u32 = 8;

/// Default Whisper model name.
pub const DEFAULT_MODEL: &str = "small";

/// Default language code for transcription.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Report the inference device compiled into this build.
///
/// Returns a name based on the compile-time feature flags. Only one GPU
/// backend can be active at a time; if none is enabled, returns "cpu".
pub fn device_name() -> &'static str {
    if cfg!(feature = "cuda") {
        "cuda"
    } else if cfg!(feature = "vulkan") {
        "vulkan"
    } else {
        "cpu"
    }
}

/// Compute type reported in the `loading_model` event.
pub fn compute_type() -> &'static str {
    if cfg!(any(feature = "cuda", feature = "vulkan")) {
        "float16"
    } else {
        "int8"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_bytes_matches_sample_count() {
        assert_eq!(FRAME_BYTES, FRAME_SAMPLES * 2);
    }

    #[test]
    fn frame_is_about_200ms() {
        let ms = FRAME_SAMPLES as f64 / SAMPLE_RATE as f64 * 1000.0;
        assert!((ms - 200.0).abs() < 1.0, "frame should be ~200ms, got {ms}");
    }

    #[test]
    fn hangover_is_about_1600ms() {
        let ms = SILENCE_FRAMES as f64 * FRAME_SAMPLES as f64 / SAMPLE_RATE as f64 * 1000.0;
        assert!((ms - 1600.0).abs() < 1.0);
    }

    #[test]
    fn device_name_matches_compiled_feature() {
        let expected = if cfg!(feature = "cuda") {
            "cuda"
        } else if cfg!(feature = "vulkan") {
            "vulkan"
        } else {
            "cpu"
        };
        assert_eq!(device_name(), expected);
    }
}
