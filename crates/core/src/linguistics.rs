//! Word, sentence and part-of-speech statistics.

use crate::analysis::PosCounts;
use crate::pos::{PosBucket, PosTagger};
use crate::stopwords::StopwordSet;
use crate::tokenize::{count_tokens, sent_tokenize, word_tokenize};

/// Counts gathered from one article's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinguisticStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub pos_counts: PosCounts,
}

/// Computes statistics for an article.
///
/// `clean` is the normalized text and drives the word and part-of-speech
/// counts. `raw` is the selector text before normalization, which keeps the
/// sentence boundaries normalization would have merged or dropped.
///
/// ```rust
/// use lexiscope_core::linguistics::analyze;
///
/// let stats = analyze("The river flooded.", "The river flooded. 2 homes were lost.");
/// assert_eq!(stats.word_count, 4);
/// assert_eq!(stats.sentence_count, 2);
/// assert_eq!(stats.pos_counts.total(), 3);
/// ```
pub fn analyze(clean: &str, raw: &str) -> LinguisticStats {
    let word_count = count_tokens(clean);
    let sentence_count = sent_tokenize(raw).len();
    let pos_counts = pos_counts(clean, StopwordSet::english());

    LinguisticStats { word_count, sentence_count, pos_counts }
}

/// Tags every non-stopword token of `text` and tallies the coarse buckets.
pub fn pos_counts(text: &str, stopwords: &StopwordSet) -> PosCounts {
    let tokens: Vec<&str> = word_tokenize(text)
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect();

    PosTagger::new()
        .tag(&tokens)
        .into_iter()
        .map(PosBucket::from_tag)
        .collect()
}
