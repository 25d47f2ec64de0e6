//! Part-of-speech tagging.
//!
//! [`PosTagger`] assigns Penn Treebank tags using a closed-class lexicon,
//! morphological suffix rules and a handful of contextual corrections.
//! [`PosBucket::from_tag`] folds those fine-grained tags into the six coarse
//! buckets reported in an analysis.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Coarse grammatical category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosBucket {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl PosBucket {
    pub const ALL: [PosBucket; 6] = [
        PosBucket::Noun,
        PosBucket::Pronoun,
        PosBucket::Verb,
        PosBucket::Adjective,
        PosBucket::Adverb,
        PosBucket::Other,
    ];

    /// Buckets a Penn Treebank tag by prefix, checked in the order N, PR, V, J, RB.
    ///
    /// ```rust
    /// use lexiscope_core::pos::PosBucket;
    ///
    /// assert_eq!(PosBucket::from_tag("NNS"), PosBucket::Noun);
    /// assert_eq!(PosBucket::from_tag("PRP$"), PosBucket::Pronoun);
    /// assert_eq!(PosBucket::from_tag("RBR"), PosBucket::Adverb);
    /// assert_eq!(PosBucket::from_tag("RP"), PosBucket::Other);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with('N') {
            PosBucket::Noun
        } else if tag.starts_with("PR") {
            PosBucket::Pronoun
        } else if tag.starts_with('V') {
            PosBucket::Verb
        } else if tag.starts_with('J') {
            PosBucket::Adjective
        } else if tag.starts_with("RB") {
            PosBucket::Adverb
        } else {
            PosBucket::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PosBucket::Noun => "NOUN",
            PosBucket::Pronoun => "PRONOUN",
            PosBucket::Verb => "VERB",
            PosBucket::Adjective => "ADJECTIVE",
            PosBucket::Adverb => "ADVERB",
            PosBucket::Other => "OTHER",
        }
    }
}

const LEXICON_GROUPS: &[(&str, &[&str])] = &[
    (
        "PRP",
        &[
            "i", "me", "you", "he", "she", "it", "we", "they", "him", "us", "them", "myself", "yourself", "himself",
            "herself", "itself", "ourselves", "themselves", "yourselves",
        ],
    ),
    ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
    (
        "DT",
        &["the", "a", "an", "this", "that", "these", "those", "all", "some", "any", "each", "every", "no", "another", "both", "either", "neither"],
    ),
    (
        "IN",
        &[
            "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
            "before", "after", "above", "below", "from", "out", "off", "over", "under", "since", "until", "upon",
            "within", "without", "among", "across", "along", "around", "toward", "towards", "like", "than", "because",
            "although", "though", "while", "whereas", "if", "unless", "whether", "per", "via", "onto", "despite",
            "beyond", "behind", "beneath", "beside", "near",
        ],
    ),
    ("CC", &["and", "but", "or", "nor", "yet", "so", "plus"]),
    ("TO", &["to"]),
    ("MD", &["can", "could", "will", "would", "shall", "should", "may", "might", "must", "cannot"]),
    ("WDT", &["which", "whatever", "whichever"]),
    ("WP", &["who", "whom", "what", "whoever"]),
    ("WP$", &["whose"]),
    ("WRB", &["when", "where", "why", "how", "whenever", "wherever"]),
    ("EX", &["there"]),
    ("RP", &["up", "down"]),
    ("VBZ", &["is", "has", "does", "says", "seems", "means", "makes", "takes", "goes", "gets"]),
    ("VBP", &["am", "are"]),
    (
        "VBD",
        &[
            "was", "were", "had", "did", "said", "made", "took", "went", "came", "gave", "found", "told", "became",
            "began", "left", "felt", "kept", "held", "brought", "thought", "saw", "knew", "got", "ran", "rose", "fell",
            "grew", "led", "met", "paid", "sent", "spent", "stood", "won", "wrote", "built", "chose", "drove", "spoke",
            "sold", "lost", "hit", "cut", "set", "put",
        ],
    ),
    (
        "VB",
        &[
            "be", "do", "have", "make", "take", "go", "come", "give", "find", "tell", "become", "begin", "keep", "hold",
            "bring", "think", "see", "know", "get", "run", "say", "use", "want", "need", "help", "show", "try", "call",
            "ask", "work", "seem", "feel", "provide", "allow", "include", "continue", "change", "lead", "understand",
            "create", "remain", "consider", "expect", "build", "stay", "reach", "pay", "meet", "improve", "reduce",
            "increase", "support", "protect", "announce", "address",
        ],
    ),
    (
        "VBN",
        &["been", "done", "gone", "taken", "given", "known", "seen", "shown", "written", "chosen", "spoken", "driven", "grown", "begun", "broken", "fallen", "risen", "born"],
    ),
    ("VBG", &["being", "having", "doing", "according"]),
    (
        "RB",
        &[
            "not", "very", "too", "also", "just", "only", "now", "then", "here", "again", "still", "already", "never",
            "always", "often", "soon", "even", "almost", "quite", "rather", "really", "perhaps", "however", "instead",
            "thus", "therefore", "ever", "once", "twice", "today", "tomorrow", "yesterday", "away", "back", "ago",
            "else", "further", "together", "indeed", "meanwhile", "moreover", "otherwise", "sometimes", "maybe", "n't",
        ],
    ),
    ("RBR", &["more", "less"]),
    ("RBS", &["most", "least"]),
    (
        "JJ",
        &[
            "new", "good", "great", "big", "small", "large", "long", "short", "high", "low", "old", "young", "other",
            "same", "different", "important", "major", "public", "political", "economic", "social", "national",
            "international", "local", "last", "first", "next", "early", "late", "little", "own", "much", "many", "few",
            "several", "whole", "recent", "possible", "able", "free", "full", "special", "real", "clear", "certain",
            "strong", "hard", "easy", "true", "sure", "main", "key", "global", "human", "federal", "current", "open",
            "available", "likely", "single", "due", "top", "bad", "such", "valid", "private", "foreign", "common",
        ],
    ),
    ("JJR", &["better", "worse", "larger", "smaller", "higher", "lower", "greater", "bigger", "older", "younger"]),
    ("JJS", &["best", "worst", "largest", "smallest", "highest", "lowest", "greatest", "biggest", "oldest"]),
    (
        "CD",
        &["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred", "thousand", "million", "billion", "trillion", "dozen"],
    ),
    ("UH", &["yes", "oh", "ok", "okay", "hello", "wow"]),
    ("POS", &["'s"]),
];

const NOUN_SUFFIXES: &[&str] = &[
    "ness", "ment", "tion", "sion", "ity", "ism", "ance", "ence", "ship", "hood", "dom", "ist", "ure", "age", "ery",
];
const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "ive", "ical", "ic", "less", "ish", "ary", "ial", "al"];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ate"];

static LEXICON: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut lexicon = HashMap::new();
    for (tag, words) in LEXICON_GROUPS {
        for word in *words {
            lexicon.entry(*word).or_insert(*tag);
        }
    }
    lexicon
});

/// Rule-based Penn Treebank tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosTagger;

impl PosTagger {
    pub fn new() -> Self {
        Self
    }

    /// Tags a token sequence, returning one tag per token.
    ///
    /// ```rust
    /// use lexiscope_core::pos::PosTagger;
    ///
    /// let tags = PosTagger::new().tag(&["Researchers", "quickly", "published", "detailed", "reports", "."]);
    /// assert_eq!(tags, vec!["NNS", "RB", "VBD", "VBD", "NNS", "."]);
    /// ```
    pub fn tag(&self, tokens: &[&str]) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let sentence_start = i == 0 || tags.last().is_some_and(|t| *t == ".");
            tags.push(initial_tag(token, sentence_start));
        }

        for i in 1..tokens.len() {
            tags[i] = contextual_tag(tokens[i], tags[i], tokens[i - 1], tags[i - 1]);
        }

        tags
    }
}

fn initial_tag(token: &str, sentence_start: bool) -> &'static str {
    if let Some(tag) = punctuation_tag(token) {
        return tag;
    }

    if token.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') && token.chars().any(|c| c.is_ascii_digit()) {
        return "CD";
    }

    let lower = token.to_lowercase();
    if let Some(tag) = LEXICON.get(lower.as_str()) {
        return tag;
    }

    let capitalized = token.chars().next().is_some_and(char::is_uppercase);
    let letters = token.chars().filter(|c| c.is_alphabetic()).count();

    if letters > 1 && token.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase) {
        return "NNP";
    }

    if capitalized && !sentence_start {
        return "NNP";
    }

    match suffix_tag(&lower) {
        Some(tag) => tag,
        None if capitalized => "NNP",
        None => "NN",
    }
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "..." | "-" | "--" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "“" | "``" => "``",
        "”" | "''" => "''",
        "$" => "$",
        "#" => "#",
        _ if token.chars().all(|c| !c.is_alphanumeric()) => "SYM",
        _ => return None,
    };
    Some(tag)
}

fn suffix_tag(lower: &str) -> Option<&'static str> {
    let len = lower.chars().count();

    if len > 4 && lower.ends_with("ly") {
        return Some("RB");
    }
    if len > 4 && lower.ends_with("ing") {
        return Some("VBG");
    }
    if len > 3 && lower.ends_with("ed") {
        return Some("VBD");
    }
    if len > 5 && lower.ends_with("est") {
        return Some("JJS");
    }
    if NOUN_SUFFIXES.iter().any(|s| len > s.len() + 1 && lower.ends_with(s)) {
        return Some("NN");
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return Some("JJ");
    }
    if VERB_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return Some("VB");
    }
    if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && !lower.ends_with("is") {
        return Some("NNS");
    }

    None
}

fn contextual_tag(token: &str, tag: &'static str, prev_token: &str, prev_tag: &'static str) -> &'static str {
    let prev_lower = prev_token.to_lowercase();

    match (prev_tag, tag) {
        ("TO" | "MD", "NN" | "VBP") => "VB",
        ("PRP", "NNS") => "VBZ",
        ("PRP", "NN") if !token.chars().next().is_some_and(char::is_uppercase) => "VBP",
        (_, "VBD") if matches!(prev_lower.as_str(), "has" | "have" | "had" | "having") => "VBN",
        (_, "VBD") if matches!(prev_lower.as_str(), "is" | "are" | "was" | "were" | "be" | "been" | "being") => "VBN",
        ("DT" | "PRP$", "VB") => "NN",
        _ => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("NN", PosBucket::Noun)]
    #[case("NNP", PosBucket::Noun)]
    #[case("NNPS", PosBucket::Noun)]
    #[case("PRP", PosBucket::Pronoun)]
    #[case("PRP$", PosBucket::Pronoun)]
    #[case("VB", PosBucket::Verb)]
    #[case("VBZ", PosBucket::Verb)]
    #[case("JJ", PosBucket::Adjective)]
    #[case("JJS", PosBucket::Adjective)]
    #[case("RB", PosBucket::Adverb)]
    #[case("RBS", PosBucket::Adverb)]
    #[case("RP", PosBucket::Other)]
    #[case("POS", PosBucket::Other)]
    #[case("DT", PosBucket::Other)]
    #[case("CD", PosBucket::Other)]
    #[case(".", PosBucket::Other)]
    #[case("", PosBucket::Other)]
    fn test_bucket_prefix_rule(#[case] tag: &str, #[case] bucket: PosBucket) {
        assert_eq!(PosBucket::from_tag(tag), bucket);
    }

    #[rstest]
    #[case("government", "NN")]
    #[case("policies", "NNS")]
    #[case("dangerous", "JJ")]
    #[case("rapidly", "RB")]
    #[case("running", "VBG")]
    #[case("announced", "VBD")]
    #[case("modernize", "VB")]
    #[case("42", "CD")]
    #[case(".", ".")]
    #[case(",", ",")]
    #[case("NASA", "NNP")]
    fn test_single_token_tags(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(PosTagger::new().tag(&[token]), vec![expected]);
    }

    #[test]
    fn test_capitalized_mid_sentence_is_proper_noun() {
        let tags = PosTagger::new().tag(&["Officials", "visited", "Paris", "."]);
        assert_eq!(tags, vec!["NNS", "VBD", "NNP", "."]);
    }

    #[test]
    fn test_context_after_modal() {
        let tags = PosTagger::new().tag(&["will", "plan"]);
        assert_eq!(tags, vec!["MD", "VB"]);
    }

    #[test]
    fn test_context_perfect_participle() {
        let tags = PosTagger::new().tag(&["has", "finished"]);
        assert_eq!(tags, vec!["VBZ", "VBN"]);
    }

    #[test]
    fn test_tag_count_matches_tokens() {
        let tokens = ["Climate", "change", "policy", "matters", ".", "Leaders", "agree", "."];
        assert_eq!(PosTagger::new().tag(&tokens).len(), tokens.len());
    }

    #[test]
    fn test_bucket_labels() {
        let labels: Vec<&str> = PosBucket::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["NOUN", "PRONOUN", "VERB", "ADJECTIVE", "ADVERB", "OTHER"]);
    }
}
