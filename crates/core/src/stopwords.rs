//! English stopword sets.
//!
//! Two fixed sets are used: [`StopwordSet::english`] filters tokens before
//! part-of-speech tagging, and the larger [`StopwordSet::keywords`] marks
//! function words for the keyword extractor (phrases may not start or end
//! with one).

use std::collections::HashSet;
use std::sync::LazyLock;

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've", "you'll", "you'd", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it",
    "it's", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve",
    "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't",
    "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn",
    "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const KEYWORD_EXTRA: &[&str] = &[
    "also", "would", "could", "may", "might", "must", "shall", "said", "says", "say", "us", "however", "yet", "via",
    "within", "without", "upon", "among", "across", "along", "around", "per", "since", "though", "although",
    "whether", "either", "neither", "every", "many", "much", "several", "another", "else", "ever", "even", "still",
    "already", "almost", "always", "never", "often", "perhaps", "quite", "rather", "really", "thus", "therefore",
    "hence", "whose", "whoever", "whatever", "wherever", "whenever", "onto", "towards", "toward", "beside", "besides",
    "beyond", "behind", "beneath", "near", "like", "get", "gets", "got", "let", "lets", "put", "one", "ones", "yes",
    "oh", "ok", "okay", "etc", "mr", "mrs", "ms", "dr", "st", "ie", "eg", "vs", "cannot", "unless", "whereas",
    "wherein", "whereby", "thereby", "therein", "herein", "hereby", "anyone", "anything", "anyway", "everyone",
    "everything", "someone", "something", "somewhere", "nothing", "nobody", "none", "least", "less", "lot", "lots",
    "seem", "seems", "seemed", "mostly", "usually", "indeed",
];

static ENGLISH_SET: LazyLock<StopwordSet> = LazyLock::new(|| StopwordSet::from_words(ENGLISH.iter().copied()));
static KEYWORD_SET: LazyLock<StopwordSet> =
    LazyLock::new(|| StopwordSet::from_words(ENGLISH.iter().chain(KEYWORD_EXTRA).copied()));

/// An immutable, case-insensitive set of stopwords.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self { words: words.into_iter().map(str::to_lowercase).collect() }
    }

    /// The standard English set used before tagging.
    pub fn english() -> &'static StopwordSet {
        &ENGLISH_SET
    }

    /// The extended English set used for keyword extraction.
    pub fn keywords() -> &'static StopwordSet {
        &KEYWORD_SET
    }

    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_set() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), 179);
        assert!(set.contains("the"));
        assert!(set.contains("The"));
        assert!(set.contains("THEY"));
        assert!(!set.contains("climate"));
        assert!(!set.contains("."));
    }

    #[test]
    fn test_keyword_set_extends_english() {
        let english = StopwordSet::english();
        let keywords = StopwordSet::keywords();
        assert!(keywords.len() > english.len());
        assert!(ENGLISH.iter().all(|w| keywords.contains(w)));
        assert!(keywords.contains("however"));
        assert!(!english.contains("however"));
    }
}
