//! Prompts for the vision and translation models.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the requested description style
//!    (e.g. loosening the word limit or adding a tag to preserve) requires
//!    editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without a
//!    live model, making prompt regressions easy to catch.

/// Prompt for short-mode requests: website alt text for a plain image.
///
/// The "do not start with…" rule matters for accessibility: screen readers
/// already announce "image", so openers like "The image shows" are noise.
pub const ALT_TEXT_PROMPT: &str = "Create a short, concise alt text for this image suitable for a website. \
     DO NOT start with phrases like 'The image depicts', 'The image shows', or similar. \
     Instead, directly describe the main subject in 15-20 words maximum. \
     Focus only on the key elements necessary for accessibility. \
     Use simple, direct language without unnecessary words.";

/// Prompt for long-mode requests: a structured description of one PDF page.
///
/// The model is asked for HTML rather than plain text because the result is
/// rendered directly in the results view and persisted verbatim in the
/// ledger; [`crate::pipeline::postprocess`] repairs responses that ignore
/// the formatting instructions.
pub const PDF_PAGE_PROMPT: &str = "Analyze and describe the text content in this page. \
     Format your response with HTML tags for better readability: \
     <p> for paragraphs, <ul><li> for bullet points, <ol><li> for numbered lists, \
     <h3> for section headings, and <br> for line breaks. \
     Maintain any hierarchical structure present in the text. \
     Use clear section breaks if multiple topics are covered. \
     Be thorough but concise, and ensure the formatting enhances readability.";

/// System persona for the translation model.
///
/// Tag preservation is the hard requirement: translated descriptions are
/// rendered as HTML, so a dropped `<li>` or an added explanatory sentence
/// would corrupt the results page.
pub const TRANSLATOR_SYSTEM_PROMPT: &str = "You are a professional translator specializing in English to French translation. \
     Your task is to translate the following text while preserving:\
     \n1. All HTML tags and formatting (<p>, <br>, <ul>, <li>, <ol>, <h3>, etc.)\
     \n2. The original text's structure and hierarchy\
     \n3. Any special characters or markup\
     \nProvide ONLY the direct translation without any explanations or notes.\
     \nDO NOT modify, remove, or add any HTML tags that are in the original text.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_text_prompt_forbids_openers() {
        assert!(ALT_TEXT_PROMPT.contains("DO NOT start"));
        assert!(ALT_TEXT_PROMPT.contains("15-20 words"));
    }

    #[test]
    fn pdf_prompt_requests_html_tags() {
        for tag in ["<p>", "<ul><li>", "<ol><li>", "<h3>", "<br>"] {
            assert!(PDF_PAGE_PROMPT.contains(tag), "missing {tag}");
        }
    }

    #[test]
    fn translator_prompt_demands_tag_preservation() {
        assert!(TRANSLATOR_SYSTEM_PROMPT.contains("HTML tags"));
        assert!(TRANSLATOR_SYSTEM_PROMPT.contains("ONLY the direct translation"));
    }
}
