//! Post-processing: deterministic HTML re-wrap of long-mode descriptions.
//!
//! ## Why is post-processing necessary?
//!
//! Even well-prompted vision models occasionally ignore the formatting
//! instructions and return plain prose with newlines and bullet markers
//! instead of the requested HTML tags. The results page renders
//! descriptions as HTML, so an untagged response would collapse into one
//! unreadable run-on line.
//!
//! The fix is a best-effort rewrite, not a guarantee of valid markup: if
//! the text already begins with a tag it is left untouched; otherwise a
//! fixed sequence of string rewrites turns the plain-text structure into
//! paragraph and line breaks.
//!
//! ## Rule order
//!
//! The rewrites must run in this exact order: paragraph breaks before line
//! breaks (or `\n\n` would be consumed as two `<br>`s), and bullet-marker
//! prefixes last, operating on the already-converted text.

/// Re-wrap an untagged long-mode description in basic HTML.
///
/// Rules (applied in order, only when the text does not start with `<`):
/// 1. Double newlines become paragraph breaks (`</p><p>`)
/// 2. Remaining single newlines become `<br>`
/// 3. Bullet markers (`• `, `- `) get a `<br>` prefix
/// 4. The whole result is wrapped in a single `<p>…</p>`
pub fn ensure_html_markup(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with('<') {
        return trimmed.to_string();
    }

    let s = trimmed.replace("\n\n", "</p><p>");
    let s = s.replace('\n', "<br>");
    let s = s.replace("• ", "<br>• ");
    let s = s.replace("- ", "<br>- ");
    format!("<p>{s}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_text_passes_through() {
        let input = "<p>Already formatted.</p><ul><li>item</li></ul>";
        assert_eq!(ensure_html_markup(input), input);
    }

    #[test]
    fn tagged_text_is_trimmed() {
        assert_eq!(ensure_html_markup("  <h3>Title</h3>\n"), "<h3>Title</h3>");
    }

    #[test]
    fn paragraphs_become_p_breaks() {
        let input = "First paragraph.\n\nSecond paragraph.";
        assert_eq!(
            ensure_html_markup(input),
            "<p>First paragraph.</p><p>Second paragraph.</p>"
        );
    }

    #[test]
    fn single_newlines_become_br() {
        assert_eq!(ensure_html_markup("line one\nline two"), "<p>line one<br>line two</p>");
    }

    #[test]
    fn bullet_markers_get_br_prefix() {
        let result = ensure_html_markup("items:\n• first\n• second");
        assert_eq!(
            result,
            "<p>items:<br><br>• first<br><br>• second</p>"
        );
    }

    #[test]
    fn dash_markers_get_br_prefix() {
        // The dash rule runs after newline conversion, so a dash that began
        // a line picks up both the converted and the prefixed break.
        let result = ensure_html_markup("items:\n- first");
        assert_eq!(result, "<p>items:<br><br>- first</p>");
    }

    #[test]
    fn whole_result_is_wrapped_once() {
        let result = ensure_html_markup("plain sentence");
        assert_eq!(result, "<p>plain sentence</p>");
    }
}
