//! Vision description client: one raster in, one text description out.
//!
//! This module converts a raster into a chat-completions call and returns
//! the model's description. It is intentionally thin — all prompt text
//! lives in [`crate::prompts`] so it can be changed without touching
//! request building here.
//!
//! There is no retry: a failed call surfaces as [`UnitError::RemoteCall`]
//! and the orchestrator substitutes a human-readable placeholder, so one
//! failed description never blocks the rest of the batch.

use crate::config::AppConfig;
use crate::error::UnitError;
use crate::pipeline::openrouter::{ChatApi, ChatMessage, ChatRequest};
use crate::pipeline::{encode, postprocess};
use crate::prompts::{ALT_TEXT_PROMPT, PDF_PAGE_PROMPT};
use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

/// What kind of description is requested, and at what output budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionMode {
    /// Short website alt text for a plain image (~15–20 words).
    AltText,
    /// Long HTML-structured description of one PDF page.
    PdfPage,
}

impl DescriptionMode {
    /// The prompt sent alongside the image.
    pub fn prompt(&self) -> &'static str {
        match self {
            DescriptionMode::AltText => ALT_TEXT_PROMPT,
            DescriptionMode::PdfPage => PDF_PAGE_PROMPT,
        }
    }

    /// Output-token budget. Short mode needs a couple of dozen tokens;
    /// long mode needs room for formatting tags on a dense page.
    pub fn max_tokens(&self) -> u32 {
        match self {
            DescriptionMode::AltText => 50,
            DescriptionMode::PdfPage => 800,
        }
    }
}

/// Build the request body for one description call.
///
/// Split out from [`describe`] so tests can assert on the exact wire shape
/// (token budget, sampling parameters, message layout) without a backend.
pub fn build_request(
    data_url: String,
    mode: DescriptionMode,
    model: &str,
    config: &AppConfig,
) -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user_with_image(data_url, mode.prompt())],
        model: model.to_string(),
        temperature: config.vision_temperature,
        max_tokens: mode.max_tokens(),
        top_p: Some(config.vision_top_p),
    }
}

/// Describe one raster via the vision model.
///
/// Long-mode responses that ignored the HTML formatting instructions are
/// re-wrapped by [`postprocess::ensure_html_markup`] before being returned.
pub async fn describe(
    api: &Arc<dyn ChatApi>,
    image: &DynamicImage,
    mode: DescriptionMode,
    model: &str,
    config: &AppConfig,
) -> Result<String, UnitError> {
    let data_url = encode::to_png_data_url(image)?;
    let request = build_request(data_url, mode, model, config);

    debug!(
        "Requesting {:?} description from '{}' (max_tokens={})",
        mode,
        model,
        mode.max_tokens()
    );

    let content = api.chat(&request).await?;

    Ok(match mode {
        DescriptionMode::AltText => content,
        DescriptionMode::PdfPage => postprocess::ensure_html_markup(&content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_mode_budget_is_50() {
        assert_eq!(DescriptionMode::AltText.max_tokens(), 50);
    }

    #[test]
    fn long_mode_budget_is_800() {
        assert_eq!(DescriptionMode::PdfPage.max_tokens(), 800);
    }

    #[test]
    fn request_uses_mode_budget_and_fixed_sampling() {
        let config = AppConfig::default();
        let req = build_request(
            "data:image/png;base64,AAAA".into(),
            DescriptionMode::AltText,
            "meta-llama/llama-3.2-11b-vision-instruct",
            &config,
        );
        assert_eq!(req.max_tokens, 50);
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.top_p, Some(0.90));
        assert_eq!(req.messages.len(), 1);

        let req = build_request(
            "data:image/png;base64,AAAA".into(),
            DescriptionMode::PdfPage,
            "meta-llama/llama-3.2-11b-vision-instruct",
            &config,
        );
        assert_eq!(req.max_tokens, 800);
    }

    #[test]
    fn mode_selects_prompt() {
        assert!(DescriptionMode::AltText.prompt().contains("alt text"));
        assert!(DescriptionMode::PdfPage.prompt().contains("HTML tags"));
    }
}
