//! Small text helpers shared by the session and scaffolding code.

use once_cell::sync::Lazy;
use regex::Regex;

/// Words kept by [`summarize_short`].
pub const SHORT_SUMMARY_WORDS: usize = 12;

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("emphasis pattern is valid"));

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Trimmed text if it has at most twelve words, else the first twelve
/// words followed by `...`.
pub fn summarize_short(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= SHORT_SUMMARY_WORDS {
        return text.trim().to_string();
    }
    format!("{}...", words[..SHORT_SUMMARY_WORDS].join(" "))
}

/// Removes `**bold**` emphasis markup, keeping the inner text.
pub fn strip_markup(text: &str) -> String {
    EMPHASIS.replace_all(text, "$1").into_owned()
}

/// Text up to the first `.`, trimmed.
pub fn first_sentence(text: &str) -> &str {
    text.split('.').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_text_is_kept_trimmed() {
        assert_eq!(summarize_short("  flooding in Accra  "), "flooding in Accra");
    }

    #[test]
    fn long_text_is_cut_at_twelve_words() {
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen";
        assert_eq!(
            summarize_short(text),
            "one two three four five six seven eight nine ten eleven twelve..."
        );
    }

    #[test]
    fn strip_markup_removes_bold() {
        assert_eq!(
            strip_markup("type **'hint'** or **'approve'**"),
            "type 'hint' or 'approve'"
        );
    }

    #[test]
    fn first_sentence_stops_at_period() {
        assert_eq!(first_sentence("Water is scarce. It is bad."), "Water is scarce");
        assert_eq!(first_sentence("no period"), "no period");
    }

    proptest! {
        #[test]
        fn summary_never_exceeds_twelve_words(text in "[a-z ]{0,200}") {
            let summary = summarize_short(&text);
            prop_assert!(word_count(&summary) <= SHORT_SUMMARY_WORDS);
        }

        #[test]
        fn strip_markup_unwraps_bold_words(word in "[a-z]{1,12}", tail in "[a-z ]{0,20}") {
            let raw = format!("**{}** {}", word, tail);
            prop_assert_eq!(strip_markup(&raw), format!("{} {}", word, tail));
        }
    }
}
