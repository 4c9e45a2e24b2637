//! Audio input handling: PCM frame decoding and utterance segmentation.

pub mod frame;
pub mod segmenter;

pub use frame::{decode_pcm16, rms};
pub use segmenter::{Segmenter, SegmenterConfig};
