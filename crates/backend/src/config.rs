// =============================================================================
// Jarvis Backend - Configuration
// =============================================================================

use jarvis_scene::KeywordProfile;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_VAR: &str = "JARVIS_CONFIG";

const DEFAULT_CAPTION_PROMPT: &str =
    "Describe the main object in this image in one short sentence.";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:5000")
    pub bind_address: String,

    /// Shape table used for text requests
    pub keyword_profile: KeywordProfile,

    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,

    /// Image captioning service
    pub vision: VisionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".into(),
            keyword_profile: KeywordProfile::default(),
            max_upload_bytes: 10 * 1024 * 1024,
            vision: VisionConfig::default(),
        }
    }
}

impl Config {
    /// Load from the file named by `JARVIS_CONFIG`, or from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => Self::from_env(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            keyword_profile: match env::var("KEYWORD_PROFILE") {
                Ok(name) => name
                    .parse()
                    .map_err(|e| ConfigError::Invalid("KEYWORD_PROFILE", format!("{e}")))?,
                Err(_) => defaults.keyword_profile,
            },
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
            vision: VisionConfig::from_env()?,
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Captioning service settings. Captioning is enabled only when both the
/// endpoint and the key are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// OpenAI-compatible chat completions URL
    pub endpoint: Option<String>,

    /// Bearer token
    pub api_key: Option<String>,

    /// Vision-capable model name
    pub model: String,

    /// Instruction sent alongside the image
    pub prompt: String,

    /// Token cap for the caption
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: "gpt-4o-mini".into(),
            prompt: DEFAULT_CAPTION_PROMPT.into(),
            max_tokens: 60,
            timeout_secs: 30,
        }
    }
}

impl VisionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            endpoint: env::var("VISION_API_ENDPOINT").ok().filter(|v| !v.is_empty()),
            api_key: env::var("VISION_API_KEY").ok().filter(|v| !v.is_empty()),
            model: env::var("VISION_MODEL").unwrap_or(defaults.model),
            prompt: env::var("VISION_PROMPT").unwrap_or(defaults.prompt),
            max_tokens: parse_var("VISION_MAX_TOKENS")?.unwrap_or(defaults.max_tokens),
            timeout_secs: parse_var("VISION_TIMEOUT_SECS")?.unwrap_or(defaults.timeout_secs),
        })
    }

    /// Whether a captioner can be built from these settings
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),

    #[error("Failed to read config {0}: {1}")]
    Read(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
