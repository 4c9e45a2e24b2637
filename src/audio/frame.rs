//! PCM frame decoding and energy measurement.
//!
//! Input is headerless little-endian 16-bit signed PCM, mono, 16kHz. Frame
//! boundaries are imposed solely by the reader consuming a fixed byte count
//! per loop iteration.

/// Decode a little-endian PCM16 byte buffer into normalized f32 samples.
///
/// Samples are rescaled to [-1.0, 1.0] by dividing by 32768. A trailing odd
/// byte, if any, is ignored.
pub fn decode_pcm16(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect()
}

/// Root-mean-square amplitude of normalized samples.
///
/// Returns 0.0 for an empty slice. This is the sole voice-activity signal:
/// - 0.0 is silence
/// - ~0.707 is a full-scale sine wave
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}
