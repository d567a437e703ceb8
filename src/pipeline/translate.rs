//! Translation client: English text in, French text out, markup intact.
//!
//! The translation model is driven by a fixed system persona
//! ([`crate::prompts::TRANSLATOR_SYSTEM_PROMPT`]) that demands verbatim
//! tag preservation and forbids explanatory wrapper text.
//!
//! ## Credential pre-check
//!
//! When no API credential is configured the client returns
//! [`UnitError::MissingCredential`] immediately, without building or
//! sending a request. The orchestrator maps this to an empty string so the
//! pipeline still produces English-only rows instead of failing.

use crate::config::AppConfig;
use crate::error::UnitError;
use crate::pipeline::openrouter::{ChatApi, ChatMessage, ChatRequest};
use crate::prompts::TRANSLATOR_SYSTEM_PROMPT;
use std::sync::Arc;
use tracing::debug;

/// Build the request body for one translation call.
///
/// No `top_p`: translation runs at a low fixed temperature only, and the
/// remote contract omits the nucleus parameter for text-only requests.
pub fn build_request(text: &str, config: &AppConfig) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::text("system", TRANSLATOR_SYSTEM_PROMPT),
            ChatMessage::text("user", text),
        ],
        model: config.translation_model.clone(),
        temperature: config.translation_temperature,
        max_tokens: config.translation_max_tokens,
        top_p: None,
    }
}

/// Translate an English text blob (possibly containing HTML) to French.
pub async fn translate_to_french(
    api: &Arc<dyn ChatApi>,
    text: &str,
    config: &AppConfig,
) -> Result<String, UnitError> {
    if !api.is_configured() {
        return Err(UnitError::MissingCredential);
    }

    debug!(
        "Translating {} chars with '{}'",
        text.len(),
        config.translation_model
    );

    let request = build_request(text, config);
    api.chat(&request)
        .await
        .map_err(|e| UnitError::Translation {
            detail: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_persona_and_fixed_sampling() {
        let config = AppConfig::default();
        let req = build_request("<p>Hello</p>", &config);

        assert_eq!(req.model, "mistralai/mixtral-8x7b-instruct");
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.max_tokens, 1500);
        assert!(req.top_p.is_none());
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[1].role, "user");
    }
}
