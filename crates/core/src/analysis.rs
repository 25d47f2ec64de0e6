//! The analysis record produced for one URL.
//!
//! An [`AnalysisResult`] is assembled once by the orchestrator, never mutated
//! afterwards, handed to the persistence sink at most once and returned to
//! the caller.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::pos::PosBucket;

/// Requester identity recorded for anonymous submissions.
pub const ANONYMOUS_REQUESTER: &str = "nologinuser";

/// Token counts per coarse part-of-speech bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosCounts {
    #[serde(rename = "NOUN")]
    pub noun: usize,
    #[serde(rename = "PRONOUN")]
    pub pronoun: usize,
    #[serde(rename = "VERB")]
    pub verb: usize,
    #[serde(rename = "ADJECTIVE")]
    pub adjective: usize,
    #[serde(rename = "ADVERB")]
    pub adverb: usize,
    #[serde(rename = "OTHER")]
    pub other: usize,
}

impl PosCounts {
    pub fn increment(&mut self, bucket: PosBucket) {
        *self.slot(bucket) += 1;
    }

    pub fn get(&self, bucket: PosBucket) -> usize {
        match bucket {
            PosBucket::Noun => self.noun,
            PosBucket::Pronoun => self.pronoun,
            PosBucket::Verb => self.verb,
            PosBucket::Adjective => self.adjective,
            PosBucket::Adverb => self.adverb,
            PosBucket::Other => self.other,
        }
    }

    /// Sum over all buckets; equals the number of tagged tokens.
    pub fn total(&self) -> usize {
        PosBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }

    fn slot(&mut self, bucket: PosBucket) -> &mut usize {
        match bucket {
            PosBucket::Noun => &mut self.noun,
            PosBucket::Pronoun => &mut self.pronoun,
            PosBucket::Verb => &mut self.verb,
            PosBucket::Adjective => &mut self.adjective,
            PosBucket::Adverb => &mut self.adverb,
            PosBucket::Other => &mut self.other,
        }
    }
}

impl FromIterator<PosBucket> for PosCounts {
    fn from_iter<I: IntoIterator<Item = PosBucket>>(iter: I) -> Self {
        let mut counts = PosCounts::default();
        for bucket in iter {
            counts.increment(bucket);
        }
        counts
    }
}

/// Heading text per level, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    pub const TAGS: [&'static str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

    /// Headings of a level, `1..=6`.
    pub fn level(&self, level: usize) -> Option<&[String]> {
        match level {
            1 => Some(&self.h1),
            2 => Some(&self.h2),
            3 => Some(&self.h3),
            4 => Some(&self.h4),
            5 => Some(&self.h5),
            6 => Some(&self.h6),
            _ => None,
        }
    }

    pub fn level_mut(&mut self, level: usize) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }

    /// Iterates `(tag, headings)` pairs from h1 to h6.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        Self::TAGS
            .iter()
            .enumerate()
            .map(|(i, tag)| (*tag, self.level(i + 1).unwrap_or_default()))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, h)| h.len()).sum()
    }
}

/// Keyword phrases with their in-text frequency, in rank order.
///
/// Serialized as a JSON object whose key order is the rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFrequencies(Vec<(String, usize)>);

impl KeywordFrequencies {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(phrase, freq)| (phrase.as_str(), *freq))
    }

    pub fn get(&self, phrase: &str) -> Option<usize> {
        self.0.iter().find(|(p, _)| p == phrase).map(|(_, f)| *f)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(String, usize)] {
        &self.0
    }
}

impl From<Vec<(String, usize)>> for KeywordFrequencies {
    fn from(entries: Vec<(String, usize)>) -> Self {
        Self(entries)
    }
}

impl Serialize for KeywordFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (phrase, freq) in &self.0 {
            map.serialize_entry(phrase, freq)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeywordFrequencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = KeywordFrequencies;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of keyword phrases to frequencies")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((phrase, freq)) = access.next_entry::<String, usize>()? {
                    entries.push((phrase, freq));
                }
                Ok(KeywordFrequencies(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// The complete analysis of one article URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Source URL as submitted.
    pub url: String,

    /// Normalized, sentence-filtered prose; empty when nothing qualified.
    pub clean_text: String,

    /// Word tokens in the clean text.
    pub word_count: usize,

    /// Sentences in the raw selected text (before normalization).
    pub sentence_count: usize,

    /// Coarse part-of-speech distribution over non-stopword tokens.
    pub pos_counts: PosCounts,

    /// Ranked keyword phrases, most frequent first.
    pub keyword_frequency: KeywordFrequencies,

    /// Image elements in the whole document.
    pub image_count: usize,

    /// Heading text per level across the whole document.
    pub headings: Headings,

    /// Stripped text of the first h1, if any.
    pub main_heading: Option<String>,

    /// Identity of the submitting user, or [`ANONYMOUS_REQUESTER`].
    pub requester: String,
}

impl AnalysisResult {
    /// A soft-empty result: every count zero and every collection empty.
    pub fn empty(url: impl Into<String>, requester: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            clean_text: String::new(),
            word_count: 0,
            sentence_count: 0,
            pos_counts: PosCounts::default(),
            keyword_frequency: KeywordFrequencies::new(),
            image_count: 0,
            headings: Headings::default(),
            main_heading: None,
            requester: requester.into(),
        }
    }

    /// Whether the result carries clean text, and so qualifies for storage.
    pub fn has_content(&self) -> bool {
        !self.clean_text.is_empty()
    }
}
