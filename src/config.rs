use crate::defaults;
use crate::error::VoxpipeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub stt: SttConfig,
    pub assets: AssetsConfig,
}

/// Segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub vad_threshold: f32,
    pub silence_frames: u32,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
}

/// Asset fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    pub model_dir: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            vad_threshold: defaults::VAD_THRESHOLD,
            silence_frames: defaults::SILENCE_FRAMES,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VoxpipeError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only falls back to defaults when the file is missing; invalid TOML is
    /// a hard error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => match e.downcast_ref::<VoxpipeError>() {
                Some(VoxpipeError::ConfigFileNotFound { .. }) => Ok(Self::default()),
                _ => Err(e),
            },
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOXPIPE_MODEL → stt.model
    /// - VOXPIPE_LANGUAGE → stt.language
    /// - VOXPIPE_MODEL_DIR → assets.model_dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VOXPIPE_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(language) = std::env::var("VOXPIPE_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(dir) = std::env::var("VOXPIPE_MODEL_DIR")
            && !dir.is_empty()
        {
            self.assets.model_dir = PathBuf::from(dir);
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/voxpipe/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("voxpipe")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_voxpipe_env() {
        remove_env("VOXPIPE_MODEL");
        remove_env("VOXPIPE_LANGUAGE");
        remove_env("VOXPIPE_MODEL_DIR");
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.audio.vad_threshold, 0.01);
        assert_eq!(config.audio.silence_frames, 8);

        assert_eq!(config.stt.model, "small");
        assert_eq!(config.stt.language, "en");

        assert_eq!(config.assets.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            [audio]
            vad_threshold = 0.05
            silence_frames = 4

            [stt]
            model = "large-v3"
            language = "es"

            [assets]
            model_dir = "/srv/models"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.audio.vad_threshold, 0.05);
        assert_eq!(config.audio.silence_frames, 4);
        assert_eq!(config.stt.model, "large-v3");
        assert_eq!(config.stt.language, "es");
        assert_eq!(config.assets.model_dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let toml_content = r#"
            [stt]
            model = "base.en"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.stt.model, "base.en");
        assert_eq!(config.stt.language, "en");
        assert_eq!(config.audio.vad_threshold, 0.01);
        assert_eq!(config.audio.silence_frames, 8);
    }

    #[test]
    fn test_env_override_model() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voxpipe_env();

        set_env("VOXPIPE_MODEL", "tiny.en");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.stt.model, "tiny.en");
        assert_eq!(config.stt.language, "en"); // Not overridden

        clear_voxpipe_env();
    }

    #[test]
    fn test_env_override_all() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voxpipe_env();

        set_env("VOXPIPE_MODEL", "medium");
        set_env("VOXPIPE_LANGUAGE", "fr");
        set_env("VOXPIPE_MODEL_DIR", "/opt/voxpipe/models");

        let config = Config::default().with_env_overrides();

        assert_eq!(config.stt.model, "medium");
        assert_eq!(config.stt.language, "fr");
        assert_eq!(
            config.assets.model_dir,
            PathBuf::from("/opt/voxpipe/models")
        );

        clear_voxpipe_env();
    }

    #[test]
    fn test_env_override_empty_string_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_voxpipe_env();

        set_env("VOXPIPE_MODEL", "");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.stt.model, "small");

        clear_voxpipe_env();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = r#"
            [audio
            vad_threshold = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_file_not_found() {
        let missing = Path::new("/tmp/nonexistent_voxpipe_config_67890.toml");
        let err = Config::load(missing).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VoxpipeError>(),
            Some(VoxpipeError::ConfigFileNotFound { .. })
        ));
        assert!(err.to_string().contains(missing.to_str().unwrap()));
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing_path = Path::new("/tmp/nonexistent_voxpipe_config_12345.toml");
        let config = Config::load_or_default(missing_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_errors_on_invalid_toml() {
        let invalid_toml = r#"
            [audio
            vad_threshold = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_default_path_is_xdg_compliant() {
        let path = Config::default_path();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains("voxpipe"));
        assert!(path_str.ends_with("config.toml"));
    }
}
