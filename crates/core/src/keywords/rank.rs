use tracing::debug;

use super::yake::YakeExtractor;
use crate::analysis::KeywordFrequencies;
use crate::config::{KeywordCollision, KeywordConfig};

/// Merges keyword extraction at several phrase widths into one list ranked
/// by how often each phrase occurs in the text.
#[derive(Debug, Clone, Default)]
pub struct KeywordRanker {
    config: KeywordConfig,
}

impl KeywordRanker {
    pub fn new(config: KeywordConfig) -> Self {
        Self { config }
    }

    /// Extracts keywords at each configured width and ranks them by frequency.
    ///
    /// ```rust
    /// use lexiscope_core::keywords::KeywordRanker;
    ///
    /// let ranked = KeywordRanker::default().rank("Rivers flood towns. Rivers carry silt.");
    /// assert_eq!(ranked.as_slice()[0], ("Rivers".to_string(), 2));
    /// ```
    pub fn rank(&self, clean: &str) -> KeywordFrequencies {
        if clean.is_empty() {
            return KeywordFrequencies::new();
        }

        let phrases = self.config.widths.iter().flat_map(|&width| {
            let keywords = YakeExtractor::from_config(&self.config, width).extract(clean);
            debug!(width, found = keywords.len(), "Extracted keywords");
            keywords.into_iter().map(|k| k.phrase)
        });

        self.tally(clean, phrases)
    }

    /// Counts each phrase in `clean` and orders the phrases by descending
    /// frequency, ties keeping their merge order.
    ///
    /// A phrase produced more than once is resolved by the configured
    /// [`KeywordCollision`] policy.
    pub fn tally(&self, clean: &str, phrases: impl IntoIterator<Item = String>) -> KeywordFrequencies {
        let lowered = clean.to_lowercase();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for phrase in phrases {
            let frequency = count_occurrences(&lowered, &phrase.to_lowercase());
            match entries.iter().position(|(p, _)| *p == phrase) {
                None => entries.push((phrase, frequency)),
                Some(index) => match self.config.collision {
                    KeywordCollision::LastWrite => entries[index].1 = frequency,
                    KeywordCollision::FirstWrite => {}
                },
            }
        }

        entries.sort_by(|a, b| b.1.cmp(&a.1));
        KeywordFrequencies::from(entries)
    }
}

/// Non-overlapping occurrences of `needle` in `haystack`, both already lowercased.
///
/// Matching is plain substring search, so a phrase also counts where it sits
/// inside a longer word.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
