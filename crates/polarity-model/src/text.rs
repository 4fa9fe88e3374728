//! Deterministic text normalization applied before vectorization
//!
//! The fitted vectorizer was trained on cleaned tweets, so the exact same
//! cleaning must run on every input at inference time. The steps are
//! order-sensitive: each removal operates on the output of the previous one.

use regex::Regex;
use std::sync::OnceLock;

static URL_RE: OnceLock<Regex> = OnceLock::new();
static MENTION_RE: OnceLock<Regex> = OnceLock::new();

fn url_re() -> &'static Regex {
    // http covers https; www catches scheme-less links
    URL_RE.get_or_init(|| Regex::new(r"http\S+|www\S+").expect("valid url regex"))
}

fn mention_re() -> &'static Regex {
    // hashtag marker is stripped but the trailing word is kept
    MENTION_RE.get_or_init(|| Regex::new(r"@\w+|#").expect("valid mention regex"))
}

/// Normalize raw input text into the form the vectorizer expects.
///
/// Total over any string input: removes URL-like tokens and `@mentions`,
/// strips `#` markers, lowercases, drops ASCII punctuation and digits, and
/// trims surrounding whitespace. Non-ASCII content (emoji, accented letters)
/// passes through untouched except by lowercasing.
pub fn normalize(text: &str) -> String {
    let text = url_re().replace_all(text, "");
    let text = mention_re().replace_all(&text, "");
    let text = text.to_lowercase();
    let text: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
        .collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_strips_urls() {
        assert_eq!(
            normalize("check this out https://example.com/a?b=1 now"),
            "check this out  now"
        );
        assert_eq!(normalize("see www.example.com please"), "see  please");
    }

    #[test]
    fn test_strips_mentions_and_hashtag_marker() {
        assert_eq!(normalize("@alice loved it"), "loved it");
        // hashtag word survives, the marker does not
        assert_eq!(normalize("so #happy today"), "so happy today");
    }

    #[test]
    fn test_lowercases_and_strips_punctuation_and_digits() {
        assert_eq!(normalize("GREAT!!! 10/10 stars."), "great  stars");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(normalize("très déçu 😞"), "très déçu 😞");
    }

    #[test]
    fn test_french_apostrophe_collapses() {
        // ASCII apostrophe is punctuation, so the contraction fuses
        assert_eq!(normalize("J'adore ce produit !"), "jadore ce produit");
    }

    proptest! {
        #[test]
        fn normalize_is_total(s in ".*") {
            let _ = normalize(&s);
        }

        #[test]
        fn normalize_is_idempotent(s in ".*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
