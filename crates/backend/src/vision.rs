// =============================================================================
// Jarvis Backend - Vision Captioning Client
// =============================================================================
// Table of Contents:
// 1. Captioner trait
// 2. RemoteCaptioner (OpenAI-compatible chat API)
// 3. MIME sniffing
// =============================================================================

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::time::Duration;

use crate::config::VisionConfig;

/// Errors from the captioning service. Never shown to API callers; a failed
/// caption is handled as a missing one.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Captioning service returned an empty caption")]
    EmptyCaption,
}

impl From<reqwest::Error> for VisionError {
    fn from(err: reqwest::Error) -> Self {
        VisionError::Api(err.to_string())
    }
}

// -----------------------------------------------------------------------------
// 1. Captioner trait
// -----------------------------------------------------------------------------

/// Produces a short text caption for an image.
#[async_trait]
pub trait Captioner: Send + Sync {
    /// Name for logs and health output
    fn name(&self) -> &str;

    /// Caption raw image bytes of the given MIME type
    async fn caption(&self, image: &[u8], mime: &str) -> Result<String, VisionError>;
}

// -----------------------------------------------------------------------------
// 2. RemoteCaptioner
// -----------------------------------------------------------------------------

/// Captioner backed by an OpenAI-compatible chat completions endpoint.
pub struct RemoteCaptioner {
    config: VisionConfig,
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl RemoteCaptioner {
    /// Build from config; fails if endpoint or key is missing.
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| VisionError::Config("No vision endpoint configured".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| VisionError::Config("No vision API key configured".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        Ok(Self {
            config,
            endpoint,
            api_key,
            client,
        })
    }

    fn request_body(&self, image: &[u8], mime: &str) -> serde_json::Value {
        let data_url = format!("data:{};base64,{}", mime, BASE64.encode(image));

        serde_json::json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": self.config.prompt},
                    {"type": "image_url", "image_url": {"url": data_url}}
                ]
            }],
            "max_tokens": self.config.max_tokens
        })
    }
}

#[async_trait]
impl Captioner for RemoteCaptioner {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn caption(&self, image: &[u8], mime: &str) -> Result<String, VisionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.request_body(image, mime))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::Api(format!("{}: {}", status, error_text)));
        }

        let response_json: serde_json::Value = response.json().await?;
        extract_caption(&response_json)
    }
}

/// Pull the caption out of an OpenAI-style chat response
fn extract_caption(response: &serde_json::Value) -> Result<String, VisionError> {
    let caption = response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim();

    if caption.is_empty() {
        Err(VisionError::EmptyCaption)
    } else {
        Ok(caption.to_string())
    }
}

// -----------------------------------------------------------------------------
// 3. MIME sniffing
// -----------------------------------------------------------------------------

/// Image MIME type from magic bytes, then the declared type, then PNG.
pub fn detect_mime(bytes: &[u8], declared: Option<&str>) -> String {
    let sniffed = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    };

    sniffed
        .or(declared.filter(|d| d.starts_with("image/")))
        .unwrap_or("image/png")
        .to_string()
}
