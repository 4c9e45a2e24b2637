//! Utterance segmentation over a continuous frame stream.
//!
//! Converts incoming audio frames into discrete utterances using only
//! short-term RMS energy: frames are buffered while voice is active, and a
//! sustained run of silent frames finalizes the buffered audio as one
//! utterance ready for transcription.

use crate::audio::frame::rms;
use crate::defaults;

/// Configuration for the segmenter.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterConfig {
    /// RMS threshold above which a frame counts as voiced ([-1,1] scale).
    pub vad_threshold: f32,
    /// Consecutive silent frames after voice before an utterance finalizes.
    pub silence_frames: u32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            vad_threshold: defaults::VAD_THRESHOLD,
            silence_frames: defaults::SILENCE_FRAMES,
        }
    }
}

/// Energy-based utterance segmenter.
///
/// Two logical states, tracked implicitly via buffer occupancy:
/// - **Idle** (empty buffer): silent frames are discarded; a voiced frame
///   starts buffering.
/// - **Voiced/trailing-silence** (non-empty buffer): every frame is appended.
///   A voiced frame resets the silence run; once the run reaches
///   `silence_frames`, the buffer is returned as a finished utterance and
///   the segmenter returns to Idle.
///
/// Invariant: the buffer is non-empty iff voice has been detected since the
/// last finalize-or-startup boundary; the silence counter is meaningful only
/// while the buffer is non-empty.
#[derive(Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    buffer: Vec<f32>,
    silence_run: u32,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
            silence_run: 0,
        }
    }

    /// Feed one frame of normalized samples.
    ///
    /// Returns the concatenated utterance audio when the trailing-silence
    /// hangover completes, `None` otherwise. After a `Some` return the
    /// segmenter is back in Idle with an empty buffer.
    pub fn push(&mut self, frame: &[f32]) -> Option<Vec<f32>> {
        let voiced = rms(frame) > self.config.vad_threshold;

        if voiced {
            self.buffer.extend_from_slice(frame);
            self.silence_run = 0;
            return None;
        }

        // Silent frame: ignored while idle, appended while an utterance is open.
        if self.buffer.is_empty() {
            return None;
        }

        self.buffer.extend_from_slice(frame);
        self.silence_run += 1;

        if self.silence_run >= self.config.silence_frames {
            self.silence_run = 0;
            return Some(std::mem::take(&mut self.buffer));
        }

        None
    }

    /// Whether an utterance is currently being buffered.
    pub fn is_active(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Return any buffered audio without waiting for the silence hangover.
    ///
    /// Used at end-of-stream so a voiced buffer that never reaches the
    /// hangover is still transcribed instead of silently dropped.
    pub fn flush(&mut self) -> Option<Vec<f32>> {
        self.silence_run = 0;
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    /// Discard buffered audio and return to Idle.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.silence_run = 0;
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: usize = 3200;

    fn silent_frame() -> Vec<f32> {
        vec![0.0; FRAME]
    }

    fn voiced_frame() -> Vec<f32> {
        // Constant 0.1 amplitude: RMS = 0.1, well above the 0.01 threshold
        vec![0.1; FRAME]
    }

    fn test_config() -> SegmenterConfig {
        SegmenterConfig {
            vad_threshold: 0.01,
            silence_frames: 8,
        }
    }

    #[test]
    fn test_starts_idle() {
        let seg = Segmenter::new(test_config());
        assert!(!seg.is_active());
    }

    #[test]
    fn test_silence_from_idle_never_buffers() {
        let mut seg = Segmenter::new(test_config());
        for _ in 0..100 {
            assert_eq!(seg.push(&silent_frame()), None);
            assert!(!seg.is_active());
        }
    }

    #[test]
    fn test_voiced_frame_starts_buffering() {
        let mut seg = Segmenter::new(test_config());
        assert_eq!(seg.push(&voiced_frame()), None);
        assert!(seg.is_active());
    }

    #[test]
    fn test_finalizes_after_exact_hangover() {
        let mut seg = Segmenter::new(test_config());
        seg.push(&voiced_frame());

        for i in 0..7 {
            assert_eq!(seg.push(&silent_frame()), None, "finalized early at {i}");
        }
        let utterance = seg.push(&silent_frame()).expect("8th silent frame finalizes");

        // 1 voiced + 8 silent frames of audio, trailing silence included
        assert_eq!(utterance.len(), FRAME * 9);
        assert!(!seg.is_active(), "segmenter should be idle after finalize");
    }

    #[test]
    fn test_voice_resets_silence_run() {
        let mut seg = Segmenter::new(test_config());
        seg.push(&voiced_frame());

        // 7 silent frames — one short of the hangover
        for _ in 0..7 {
            assert_eq!(seg.push(&silent_frame()), None);
        }
        // Voice resumes: counter resets, buffer keeps accumulating
        assert_eq!(seg.push(&voiced_frame()), None);
        assert!(seg.is_active());

        // A fresh full hangover is required now
        for _ in 0..7 {
            assert_eq!(seg.push(&silent_frame()), None);
        }
        let utterance = seg.push(&silent_frame()).expect("should finalize");
        // 1 voiced + 7 silent + 1 voiced + 8 silent
        assert_eq!(utterance.len(), FRAME * 17);
    }

    #[test]
    fn test_fresh_buffer_after_finalize() {
        let mut seg = Segmenter::new(test_config());

        seg.push(&voiced_frame());
        for _ in 0..8 {
            seg.push(&silent_frame());
        }
        assert!(!seg.is_active());

        // The next voiced frame starts a fresh, empty buffer
        seg.push(&voiced_frame());
        for _ in 0..7 {
            seg.push(&silent_frame());
        }
        let second = seg.push(&silent_frame()).expect("second utterance");
        assert_eq!(second.len(), FRAME * 9);
    }

    #[test]
    fn test_utterance_preserves_sample_order() {
        let mut seg = Segmenter::new(test_config());
        let mut first = vec![0.2; FRAME];
        first[0] = 0.5;
        seg.push(&first);
        let mut utterance = None;
        for _ in 0..8 {
            utterance = seg.push(&silent_frame());
        }
        let utterance = utterance.expect("finalized");
        assert_eq!(utterance[0], 0.5);
        assert_eq!(utterance[1], 0.2);
        assert_eq!(utterance[FRAME], 0.0);
    }

    #[test]
    fn test_flush_returns_open_buffer() {
        let mut seg = Segmenter::new(test_config());
        seg.push(&voiced_frame());
        seg.push(&silent_frame());

        let flushed = seg.flush().expect("buffer was non-empty");
        assert_eq!(flushed.len(), FRAME * 2);
        assert!(!seg.is_active());
    }

    #[test]
    fn test_flush_idle_is_none() {
        let mut seg = Segmenter::new(test_config());
        assert_eq!(seg.flush(), None);
    }

    #[test]
    fn test_reset_discards_buffer() {
        let mut seg = Segmenter::new(test_config());
        seg.push(&voiced_frame());
        seg.reset();
        assert!(!seg.is_active());
        assert_eq!(seg.flush(), None);
    }

    #[test]
    fn test_borderline_energy_is_silent() {
        let mut seg = Segmenter::new(test_config());
        // RMS exactly at the threshold does not count as voiced (strict >)
        assert_eq!(seg.push(&vec![0.01; FRAME]), None);
        assert!(!seg.is_active());
    }

    #[test]
    fn test_custom_hangover_length() {
        let mut seg = Segmenter::new(SegmenterConfig {
            vad_threshold: 0.01,
            silence_frames: 2,
        });
        seg.push(&voiced_frame());
        assert_eq!(seg.push(&silent_frame()), None);
        assert!(seg.push(&silent_frame()).is_some());
    }
}
