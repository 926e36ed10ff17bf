//! Plain-text normalization of raw feed fields.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("markup tag pattern is valid"));

/// Strip markup tags, decode HTML entities, and trim surrounding
/// whitespace. Never fails; empty input yields an empty string.
pub fn strip_markup(text: &str) -> String {
    let stripped = MARKUP_TAG.replace_all(text, "");
    html_escape::decode_html_entities(stripped.as_ref())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_trims() {
        assert_eq!(
            strip_markup("  <p>Court rules on <b>abortion</b> access</p>\n"),
            "Court rules on abortion access"
        );
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(strip_markup("Women&#8217;s rights &amp; health"), "Women’s rights & health");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(strip_markup(""), "");
        assert_eq!(strip_markup("   "), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("no markup here"), "no markup here");
    }
}
