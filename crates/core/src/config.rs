//! Analyzer configuration.
//!
//! Every heuristic constant the pipeline relies on (the selector class
//! allow-list, keyword extraction parameters, fetch behaviour) lives here and
//! is fixed once an [`Analyzer`](crate::Analyzer) is constructed.
//!
//! # Example
//!
//! ```rust
//! use lexiscope_core::{AnalyzerConfig, KeywordCollision};
//!
//! let config = AnalyzerConfig::builder()
//!     .content_classes(["article-body", "story"])
//!     .keyword_top(10)
//!     .keyword_collision(KeywordCollision::FirstWrite)
//!     .build();
//! assert_eq!(config.keywords.top, 10);
//! ```

use crate::fetch::FetchConfig;
use crate::{LexiscopeError, Result};

/// Class tokens that mark an element as article body.
pub const DEFAULT_CONTENT_CLASSES: &[&str] = &[
    "news-content",
    "story-highlights",
    "description",
    "story-kicker",
    "container",
    "at_row",
    "_next",
    "clearfix",
];

/// Tag the content selector inspects.
pub const DEFAULT_CONTENT_TAG: &str = "div";

/// What happens when the same phrase is produced by more than one n-gram width.
///
/// A repeated phrase never moves: it keeps the position of its first
/// insertion, which decides its tie-break order in the ranking. Frequencies
/// are recounted from the same text on every insertion, so both policies
/// currently produce the same mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordCollision {
    /// The latest insertion overwrites the stored frequency in place, like a map assignment.
    #[default]
    LastWrite,
    /// The first insertion's frequency is kept; later duplicates are ignored.
    FirstWrite,
}

/// Parameters of the statistical keyword extractor and the ranker.
#[derive(Debug, Clone)]
pub struct KeywordConfig {
    /// N-gram widths, in the order their results are concatenated.
    pub widths: Vec<usize>,
    /// Maximum phrases kept per width.
    pub top: usize,
    /// Similarity above which a candidate counts as a near-duplicate.
    pub dedup_threshold: f64,
    /// Co-occurrence window, in words.
    pub window_size: usize,
    /// Duplicate-phrase policy across widths.
    pub collision: KeywordCollision,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self { widths: vec![3, 2, 1], top: 20, dedup_threshold: 0.9, window_size: 1, collision: KeywordCollision::default() }
    }
}

/// Configuration for the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Class tokens marking article-body elements (exact token match).
    pub content_classes: Vec<String>,
    /// Tag name the selector restricts itself to.
    pub content_tag: String,
    /// Keyword extraction and ranking parameters.
    pub keywords: KeywordConfig,
    /// HTTP fetch parameters.
    pub fetch: FetchConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            content_classes: DEFAULT_CONTENT_CLASSES.iter().map(|c| c.to_string()).collect(),
            content_tag: DEFAULT_CONTENT_TAG.to_string(),
            keywords: KeywordConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// Rejects settings the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`LexiscopeError::ConfigError`] naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        let keywords = &self.keywords;
        if keywords.widths.is_empty() || keywords.widths.contains(&0) {
            return Err(LexiscopeError::ConfigError("keyword widths must be non-empty and positive".to_string()));
        }
        if keywords.top == 0 {
            return Err(LexiscopeError::ConfigError("keyword top must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&keywords.dedup_threshold) {
            return Err(LexiscopeError::ConfigError(format!(
                "dedup threshold {} is outside 0..=1",
                keywords.dedup_threshold
            )));
        }
        if self.fetch.timeout == 0 {
            return Err(LexiscopeError::ConfigError("timeout must be at least one second".to_string()));
        }
        Ok(())
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Replaces the class allow-list.
    pub fn content_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.content_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tag the selector inspects.
    pub fn content_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.content_tag = tag.into();
        self
    }

    /// Sets the n-gram widths, in concatenation order.
    pub fn keyword_widths(mut self, widths: Vec<usize>) -> Self {
        self.config.keywords.widths = widths;
        self
    }

    /// Sets how many phrases each width contributes at most.
    pub fn keyword_top(mut self, value: usize) -> Self {
        self.config.keywords.top = value;
        self
    }

    /// Sets the near-duplicate similarity threshold.
    pub fn dedup_threshold(mut self, value: f64) -> Self {
        self.config.keywords.dedup_threshold = value;
        self
    }

    /// Sets the duplicate-phrase policy.
    pub fn keyword_collision(mut self, value: KeywordCollision) -> Self {
        self.config.keywords.collision = value;
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the number of retries after a transient fetch failure.
    pub fn retries(mut self, value: u32) -> Self {
        self.config.fetch.retries = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.content_tag, "div");
        assert_eq!(config.content_classes.len(), 8);
        assert!(config.content_classes.iter().any(|c| c == "news-content"));
        assert_eq!(config.keywords.widths, vec![3, 2, 1]);
        assert_eq!(config.keywords.top, 20);
        assert_eq!(config.keywords.dedup_threshold, 0.9);
        assert_eq!(config.keywords.collision, KeywordCollision::LastWrite);
        assert_eq!(config.fetch.timeout, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::builder()
            .content_classes(["body"])
            .content_tag("section")
            .keyword_widths(vec![1])
            .keyword_top(5)
            .dedup_threshold(0.8)
            .keyword_collision(KeywordCollision::FirstWrite)
            .timeout(10)
            .user_agent("test-agent")
            .retries(0)
            .build();

        assert_eq!(config.content_classes, vec!["body".to_string()]);
        assert_eq!(config.content_tag, "section");
        assert_eq!(config.keywords.widths, vec![1]);
        assert_eq!(config.keywords.top, 5);
        assert_eq!(config.keywords.dedup_threshold, 0.8);
        assert_eq!(config.keywords.collision, KeywordCollision::FirstWrite);
        assert_eq!(config.fetch.timeout, 10);
        assert_eq!(config.fetch.user_agent, "test-agent");
        assert_eq!(config.fetch.retries, 0);
    }

    #[test]
    fn test_config_validation() {
        assert!(AnalyzerConfig::default().validate().is_ok());

        let invalid = [
            AnalyzerConfig::builder().keyword_widths(vec![]).build(),
            AnalyzerConfig::builder().keyword_widths(vec![2, 0]).build(),
            AnalyzerConfig::builder().keyword_top(0).build(),
            AnalyzerConfig::builder().dedup_threshold(1.5).build(),
            AnalyzerConfig::builder().timeout(0).build(),
        ];
        for config in invalid {
            assert!(matches!(config.validate(), Err(LexiscopeError::ConfigError(_))));
        }
    }
}
