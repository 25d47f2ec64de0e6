//! Keyword extraction and frequency ranking.

pub mod rank;
pub mod yake;

pub use rank::{KeywordRanker, count_occurrences};
pub use yake::{Keyword, YakeExtractor, similarity};
