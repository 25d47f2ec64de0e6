//! English word and sentence tokenization.
//!
//! Word tokens follow Penn Treebank conventions closely enough for tagging:
//! punctuation marks are tokens of their own and clitics (`n't`, `'s`, `'re`,
//! ...) are split from their host word. Sentence segmentation breaks after
//! terminal punctuation followed by whitespace, except after common
//! abbreviations and single-letter initials.

use std::sync::LazyLock;

use regex::Regex;

static WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+(?:[-'’]\w+)*|\.\.\.|\S").unwrap());
static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[.!?]+["'’”)\]]*\s+"#).unwrap());

const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd", "co", "corp", "jan",
    "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "no", "fig", "gen",
    "gov", "sen", "rep", "approx", "dept", "est", "mt", "ft", "lt", "col", "capt", "rev",
];

/// Splits text into word and punctuation tokens.
///
/// ```rust
/// use lexiscope_core::tokenize::word_tokenize;
///
/// assert_eq!(word_tokenize("They don't stop."), vec!["They", "do", "n't", "stop", "."]);
/// ```
pub fn word_tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();

    for m in WORD_TOKEN.find_iter(text) {
        let token = m.as_str();
        match split_clitic(token) {
            Some((host, clitic)) => {
                tokens.push(host);
                tokens.push(clitic);
            }
            None => tokens.push(token),
        }
    }

    tokens
}

/// Splits text into sentences.
///
/// ```rust
/// use lexiscope_core::tokenize::sent_tokenize;
///
/// let sentences = sent_tokenize("Mr. Smith arrived. He sat down! Was it late?");
/// assert_eq!(sentences, vec!["Mr. Smith arrived.", "He sat down!", "Was it late?"]);
/// ```
pub fn sent_tokenize(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in BOUNDARY.find_iter(text) {
        let terminator = m.as_str().trim_end();
        let before = &text[start..m.start()];
        let after = &text[m.end()..];

        if !is_break(before, terminator, after) {
            continue;
        }

        let sentence = text[start..m.start() + terminator.len()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Number of words in `text`, counting punctuation tokens as the tagger sees them.
pub fn count_tokens(text: &str) -> usize {
    word_tokenize(text).len()
}

fn split_clitic(token: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let width = clitic.chars().count();
        let (at, _) = token.char_indices().rev().nth(width - 1)?;
        let (host, tail) = token.split_at(at);
        (!host.is_empty() && tail.replace('’', "'").eq_ignore_ascii_case(clitic)).then_some((host, tail))
    })
}

fn is_break(before: &str, terminator: &str, after: &str) -> bool {
    let next_upper = after.chars().next().is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());

    if terminator.starts_with("..") {
        return next_upper;
    }

    if !terminator.starts_with('.') {
        return true;
    }

    let word = before.rsplit(char::is_whitespace).next().unwrap_or("");
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric()).to_lowercase();

    if ABBREVIATIONS.contains(&word.as_str()) {
        return false;
    }

    let is_initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
    !is_initial
}
