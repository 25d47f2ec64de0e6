//! Conversion of selected raw text into clean, sentence-filtered prose.
//!
//! The steps run in a fixed order:
//!
//! 1. drop residual `<...>` markup,
//! 2. drop every character that is not an ASCII letter, whitespace or a period,
//! 3. collapse whitespace runs to one space,
//! 4. split on periods and keep only trimmed, non-empty pieces starting with an
//!    uppercase letter, each terminated by exactly one period,
//! 5. join the kept sentences with single spaces.
//!
//! No qualifying sentence yields an empty string, which is a valid result.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());
static NON_PROSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s.]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes raw selector text into clean text.
///
/// ```rust
/// use lexiscope_core::normalize::normalize;
///
/// let clean = normalize("<b>Prices</b> rose 4% in 2023. then fell. It's   over.");
/// assert_eq!(clean, "Prices rose in. Its over.");
/// ```
pub fn normalize(raw: &str) -> String {
    let text = MARKUP.replace_all(raw, "");
    let text = NON_PROSE.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");

    let kept: Vec<String> = text
        .split('.')
        .map(str::trim)
        .filter(|sentence| starts_uppercase(sentence))
        .map(|sentence| format!("{}.", sentence))
        .collect();

    kept.join(" ").trim().to_string()
}

fn starts_uppercase(sentence: &str) -> bool {
    sentence.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("   ", "")]
    #[case("all lowercase. nothing kept.", "")]
    #[case("Valid sentence.", "Valid sentence.")]
    #[case("A. lowercase fails. Valid sentence.", "A. Valid sentence.")]
    #[case("No trailing period", "No trailing period.")]
    #[case("Dots... everywhere.. Here.", "Dots. Here.")]
    #[case("Tabs\tand\nnewlines   collapse.", "Tabs and newlines collapse.")]
    #[case("Caf\u{e9} society.", "Caf society.")]
    #[case("<span>Tagged</span> text stays.", "Tagged text stays.")]
    fn test_normalize_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[test]
    fn test_digits_and_punctuation_removed() {
        assert_eq!(normalize("Revenue was $4,200 (up 12%)!"), "Revenue was up.");
    }

    #[test]
    fn test_markup_removed_before_filtering() {
        assert_eq!(normalize("<p class=\"x\">lower</p>Upper start."), "");
        assert_eq!(normalize("<p>Upper</p> start."), "Upper start.");
    }

    #[test]
    fn test_sentence_invariant() {
        let clean = normalize("First one. second one. Third: with, punctuation! Fourth\n\nline.");
        for sentence in clean.split_inclusive('.').map(str::trim) {
            assert!(sentence.chars().next().unwrap().is_uppercase());
            assert!(sentence.ends_with('.'));
            assert!(!sentence.ends_with(".."));
            assert!(sentence.len() > 1);
        }
        assert_eq!(clean, "First one. Third with punctuation Fourth line.");
    }
}
