//! Static manifest of the model assets the voice backend needs.
//!
//! The speech-recognition model ships as a zip archive that is extracted in
//! place; the synthesis voice is a single onnx file with a JSON sidecar
//! configuration. URLs and destination names are fixed.

/// How an asset is materialized on disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetKind {
    /// Download a zip archive, extract it into the model directory, then
    /// delete the archive.
    ZipArchive,
    /// Download the file itself plus a sidecar configuration next to it.
    VoiceModel {
        config_url: &'static str,
        /// Sidecar destination, relative to the model directory.
        config_target: &'static str,
    },
}

/// One fetchable asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetSpec {
    /// Short name for operator-facing messages.
    pub name: &'static str,
    /// Source URL.
    pub url: &'static str,
    /// Destination relative to the model directory. Its existence means the
    /// asset is already installed (for archives this is the extracted folder).
    pub target: &'static str,
    pub kind: AssetKind,
}

/// All backend assets, fetched strictly in this order.
pub const ASSETS: &[AssetSpec] = &[
    AssetSpec {
        name: "vosk model (en-in)",
        url: "https://alphacephei.com/vosk/models/vosk-model-en-in-0.5.zip",
        target: "vosk-model-en-in-0.5",
        kind: AssetKind::ZipArchive,
    },
    AssetSpec {
        name: "piper voice (en_US-amy-medium)",
        url: "https://huggingface.co/rhasspy/piper-voices/resolve/main/en/en_US/amy/medium/en_US-amy-medium.onnx",
        target: "piper-voice/voice.onnx",
        kind: AssetKind::VoiceModel {
            config_url: "https://huggingface.co/rhasspy/piper-voices/resolve/main/en/en_US/amy/medium/en_US-amy-medium.onnx.json",
            config_target: "piper-voice/voice.onnx.json",
        },
    },
];

/// Find an asset by name.
#[cfg(test)]
fn get_asset(name: &str) -> Option<&'static AssetSpec> {
    ASSETS.iter().find(|a| a.name == name)
}
