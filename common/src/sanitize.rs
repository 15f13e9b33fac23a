//! Plain-text sanitization for user supplied values.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[a-zA-Z/!?][^>]*(?:>|$)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t ]+").unwrap());
static PERCENT_OCTET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").unwrap());

/// Reduces a value to a single line of plain text.
///
/// Script and style elements are dropped with their content, other tags are
/// stripped, a `<` that does not open a tag is escaped, whitespace runs
/// collapse to one space and percent-encoded octets are removed.
pub fn sanitize_text_field(raw: &str) -> String {
    let text = SCRIPT_ELEMENT.replace_all(raw, "");
    let text = STYLE_ELEMENT.replace_all(&text, "");
    let text = TAG.replace_all(&text, "");
    let text = text.replace('<', "&lt;");
    let text = WHITESPACE.replace_all(&text, " ");
    let mut text = text.trim().to_string();

    while PERCENT_OCTET.is_match(&text) {
        text = PERCENT_OCTET.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}

/// Sanitizes and drops values that end up empty.
pub fn sanitize_non_empty(raw: &str) -> Option<String> {
    let value = sanitize_text_field(raw);
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_elements_are_removed_with_content() {
        assert_eq!(sanitize_text_field("Studio<script>alert('x')</script>"), "Studio");
        assert_eq!(sanitize_text_field("<SCRIPT type=\"text/javascript\">\nbad()\n</SCRIPT>"), "");
    }

    #[test]
    fn tags_are_stripped_and_text_kept() {
        assert_eq!(sanitize_text_field("<b>Jardin</b> <i>potager</i>"), "Jardin potager");
        assert_eq!(sanitize_text_field("Loft<img src=x onerror=alert(1)"), "Loft");
    }

    #[test]
    fn stray_less_than_is_escaped() {
        assert_eq!(sanitize_text_field("a < b"), "a &lt; b");
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(sanitize_text_field("  Salle \n\t de   bain  "), "Salle de bain");
    }

    #[test]
    fn percent_octets_are_removed() {
        assert_eq!(sanitize_text_field("Paris%20%3C15e"), "Paris15e");
        assert_eq!(sanitize_text_field("%2%200"), "");
    }

    #[test]
    fn non_empty_filter() {
        assert_eq!(sanitize_non_empty("<p></p>"), None);
        assert_eq!(sanitize_non_empty(" 0001 "), Some("0001".to_string()));
    }

    #[test]
    fn accented_text_is_untouched() {
        assert_eq!(sanitize_text_field("Château"), "Château");
    }
}
