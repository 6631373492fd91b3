//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VERITY_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_MATTE_TOLERANCE;
use crate::embedding::EmbedderConfig;
use crate::imaging::MattingConfig;
use crate::sentiment::SentimentConfig;

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERITY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// CLIP ViT-B/32 checkpoint (directory or safetensors file). `None` runs the stub embedder.
    pub clip_model_path: Option<PathBuf>,

    /// BERT sentiment model directory. `None` runs the lexicon stub.
    pub sentiment_model_path: Option<PathBuf>,

    /// Strip image backgrounds before comparison. Default: `true`.
    pub remove_background: bool,

    /// Per-channel colour tolerance for background keying. Default: `40`.
    pub matte_tolerance: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clip_model_path: None,
            sentiment_model_path: None,
            remove_background: true,
            matte_tolerance: DEFAULT_MATTE_TOLERANCE,
        }
    }
}

impl Config {
    const ENV_REMOVE_BACKGROUND: &'static str = "VERITY_REMOVE_BACKGROUND";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Model paths and the matte tolerance are read by the component configs
    /// ([`EmbedderConfig::from_env`], [`SentimentConfig::from_env`],
    /// [`MattingConfig::from_env`]), so both entry points agree on every variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let embedder = EmbedderConfig::from_env();
        let clip_model_path = (!embedder.testing_stub).then_some(embedder.model_path);
        let sentiment_model_path = SentimentConfig::from_env().model_path;
        let remove_background =
            Self::parse_bool_from_env(Self::ENV_REMOVE_BACKGROUND, defaults.remove_background)?;
        let matte_tolerance = MattingConfig::from_env()?.tolerance;

        Ok(Self {
            clip_model_path,
            sentiment_model_path,
            remove_background,
            matte_tolerance,
        })
    }

    /// Checks that configured model paths exist (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.clip_model_path
            && !path.exists()
        {
            return Err(ConfigError::PathNotFound { path: path.clone() });
        }

        if let Some(ref path) = self.sentiment_model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    pub fn embedder_config(&self) -> EmbedderConfig {
        self.clip_model_path
            .clone()
            .map(EmbedderConfig::new)
            .unwrap_or_else(EmbedderConfig::stub)
    }

    pub fn sentiment_config(&self) -> SentimentConfig {
        self.sentiment_model_path
            .clone()
            .map(SentimentConfig::new)
            .unwrap_or_else(SentimentConfig::stub)
    }

    pub fn matting_config(&self) -> MattingConfig {
        MattingConfig::default().with_tolerance(self.matte_tolerance)
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        let Ok(value) = env::var(var_name) else {
            return Ok(default);
        };

        match value.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                name: var_name,
                value,
            }),
        }
    }
}
