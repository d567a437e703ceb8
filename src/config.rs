//! Configuration types for the img2alt service.
//!
//! All behaviour is controlled through [`AppConfig`], built via its
//! [`AppConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share the config across the server state, serialise it for logging,
//! and diff two deployments to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A dozen-field constructor is unreadable and breaks on every new field.
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::Img2AltError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OpenRouter chat-completions endpoint used by default.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Vision model used when the upload request does not name one.
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-3.2-11b-vision-instruct";

/// Text model used for English → French translation.
pub const TRANSLATION_MODEL: &str = "mistralai/mixtral-8x7b-instruct";

/// Configuration for the img2alt service.
///
/// Built via [`AppConfig::builder()`] or [`AppConfig::from_env()`].
///
/// # Example
/// ```rust
/// use img2alt::AppConfig;
///
/// let config = AppConfig::builder()
///     .port(8000)
///     .api_key("sk-or-...")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen address. Default: "0.0.0.0".
    pub host: String,

    /// Listen port. Default: 8000.
    pub port: u16,

    /// Chat-completions endpoint URL. Default: [`OPENROUTER_API_URL`].
    pub api_url: String,

    /// API credential sent as a bearer token. `None` is not fatal: vision
    /// calls fail per-unit and translations silently degrade to an empty
    /// string, so the service still starts (with a one-time warning).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Vision model used when the request does not choose one.
    pub default_vision_model: String,

    /// Model used for English → French translation.
    pub translation_model: String,

    /// Sampling temperature for description requests. Default: 0.7.
    ///
    /// Descriptions benefit from some variety of phrasing; 0.7 keeps the
    /// wording natural without drifting from what is actually in the image.
    /// Stored as `f64` so the JSON request carries the value exactly.
    pub vision_temperature: f64,

    /// Nucleus-sampling parameter for description requests. Default: 0.90.
    pub vision_top_p: f64,

    /// Sampling temperature for translation requests. Default: 0.3.
    ///
    /// Translation is a fidelity task: low temperature keeps the model
    /// close to the source text and stops it paraphrasing markup away.
    pub translation_temperature: f64,

    /// Output-token budget for translations. Default: 1500.
    ///
    /// Long PDF-page descriptions carry HTML tags that inflate token
    /// counts; 1500 leaves headroom so translations are not truncated.
    pub translation_max_tokens: u32,

    /// Maximum rendered page dimension (width or height) in pixels. Default: 2000.
    ///
    /// A safety cap on pdfium output: an A0 poster page could otherwise
    /// rasterise to tens of thousands of pixels per side and exhaust
    /// memory. Either dimension is capped, scaling the other to match.
    pub max_rendered_pixels: u32,

    /// Per-remote-call timeout in seconds. Default: 120.
    pub request_timeout_secs: u64,

    /// CSV ledger file path. Default: "image_descriptions.csv".
    pub ledger_path: PathBuf,

    /// Temp-asset directory for display copies. Default: "static/temp".
    pub asset_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_url: OPENROUTER_API_URL.to_string(),
            api_key: None,
            default_vision_model: DEFAULT_VISION_MODEL.to_string(),
            translation_model: TRANSLATION_MODEL.to_string(),
            vision_temperature: 0.7,
            vision_top_p: 0.90,
            translation_temperature: 0.3,
            translation_max_tokens: 1500,
            max_rendered_pixels: 2000,
            request_timeout_secs: 120,
            ledger_path: PathBuf::from("image_descriptions.csv"),
            asset_dir: PathBuf::from("static/temp"),
        }
    }
}

impl AppConfig {
    /// Create a new builder for `AppConfig`.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build a config from environment variables.
    ///
    /// Reads `OPENROUTER_API_KEY`, and optionally `IMG2ALT_API_URL`,
    /// `IMG2ALT_HOST`, and `IMG2ALT_PORT`. Unset variables keep their
    /// defaults; a malformed `IMG2ALT_PORT` fails validation rather than
    /// being silently ignored.
    pub fn from_env() -> Result<Self, Img2AltError> {
        let mut builder = Self::builder();

        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                builder = builder.api_key(key);
            }
        }
        if let Ok(url) = std::env::var("IMG2ALT_API_URL") {
            if !url.is_empty() {
                builder = builder.api_url(url);
            }
        }
        if let Ok(host) = std::env::var("IMG2ALT_HOST") {
            if !host.is_empty() {
                builder = builder.host(host);
            }
        }
        if let Ok(port) = std::env::var("IMG2ALT_PORT") {
            let port: u16 = port.parse().map_err(|_| {
                Img2AltError::InvalidConfig(format!("IMG2ALT_PORT is not a port number: '{port}'"))
            })?;
            builder = builder.port(port);
        }

        builder.build()
    }

    /// Listen address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn default_vision_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_vision_model = model.into();
        self
    }

    pub fn translation_model(mut self, model: impl Into<String>) -> Self {
        self.config.translation_model = model.into();
        self
    }

    pub fn vision_temperature(mut self, t: f64) -> Self {
        self.config.vision_temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn vision_top_p(mut self, p: f64) -> Self {
        self.config.vision_top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn translation_temperature(mut self, t: f64) -> Self {
        self.config.translation_temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn translation_max_tokens(mut self, n: u32) -> Self {
        self.config.translation_max_tokens = n.max(1);
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ledger_path = path.into();
        self
    }

    pub fn asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.asset_dir = dir.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AppConfig, Img2AltError> {
        let c = &self.config;
        if c.port == 0 {
            return Err(Img2AltError::InvalidConfig("Port must be non-zero".into()));
        }
        if !c.api_url.starts_with("http://") && !c.api_url.starts_with("https://") {
            return Err(Img2AltError::InvalidConfig(format!(
                "API URL must be HTTP(S), got '{}'",
                c.api_url
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_remote_contract() {
        let c = AppConfig::default();
        assert_eq!(c.api_url, OPENROUTER_API_URL);
        assert_eq!(c.default_vision_model, DEFAULT_VISION_MODEL);
        assert_eq!(c.translation_model, TRANSLATION_MODEL);
        assert_eq!(c.vision_temperature, 0.7);
        assert_eq!(c.vision_top_p, 0.90);
        assert_eq!(c.translation_temperature, 0.3);
        assert_eq!(c.translation_max_tokens, 1500);
    }

    #[test]
    fn sampling_params_serialise_exactly() {
        let json = serde_json::to_value(AppConfig::default()).unwrap();
        assert_eq!(json["vision_temperature"], 0.7);
        assert_eq!(json["vision_top_p"], 0.9);
        assert_eq!(json["translation_temperature"], 0.3);
    }

    #[test]
    fn builder_clamps_sampling_params() {
        let c = AppConfig::builder()
            .vision_temperature(5.0)
            .vision_top_p(2.0)
            .build()
            .unwrap();
        assert_eq!(c.vision_temperature, 2.0);
        assert_eq!(c.vision_top_p, 1.0);
    }

    #[test]
    fn build_rejects_zero_port() {
        assert!(AppConfig::builder().port(0).build().is_err());
    }

    #[test]
    fn build_rejects_non_http_url() {
        assert!(AppConfig::builder().api_url("ftp://nope").build().is_err());
    }

    #[test]
    fn listen_addr_joins_host_and_port() {
        let c = AppConfig::builder().host("127.0.0.1").port(9000).build().unwrap();
        assert_eq!(c.listen_addr(), "127.0.0.1:9000");
    }
}
