//! The analysis orchestrator.
//!
//! [`Analyzer`] wires the pipeline together: fetch once, parse once, select
//! and normalize the article text, compute statistics and keywords, inventory
//! the page structure, and hand non-empty results to a [`PersistenceSink`].
//!
//! Every failure degrades to a well-formed result. [`Analyzer::analyze`] has
//! no error path; fetch and storage problems are logged and the caller gets a
//! soft-empty (or already computed) [`AnalysisResult`].
//!
//! # Example
//!
//! ```rust
//! use lexiscope_core::{Analyzer, AnalyzerConfig, MemorySink};
//!
//! let analyzer = Analyzer::offline(MemorySink::new(), AnalyzerConfig::default()).unwrap();
//! let html = r#"<div class="news-content"><p>Rain fell. Rivers rose.</p></div>"#;
//! let result = analyzer.analyze_html("https://example.com/rain", html, "nologinuser");
//! assert_eq!(result.clean_text, "Rain fell. Rivers rose.");
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::analysis::AnalysisResult;
use crate::config::AnalyzerConfig;
use crate::fetch::{FetchedPage, HtmlFetcher};
use crate::keywords::KeywordRanker;
use crate::linguistics;
use crate::normalize::normalize;
use crate::parse::Document;
use crate::select::ContentSelector;
use crate::structure::inventory;
use crate::tokenize::sent_tokenize;
use crate::{LexiscopeError, Result};

/// Pipeline phase of one analysis, traced at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Extracting,
    Analyzing,
    Ranking,
    Assembling,
    Done,
    /// Clean text came out empty; nothing is stored.
    Skipped,
    /// The page could not be retrieved.
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Skipped | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Extracting => "extracting",
            Phase::Analyzing => "analyzing",
            Phase::Ranking => "ranking",
            Phase::Assembling => "assembling",
            Phase::Done => "done",
            Phase::Skipped => "skipped",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Stores completed analyses.
///
/// Called at most once per analysis and only when the clean text is
/// non-empty. A returned error is logged and never reaches the caller of
/// [`Analyzer::analyze`].
pub trait PersistenceSink {
    fn persist(&self, result: &AnalysisResult) -> impl Future<Output = Result<()>> + Send;
}

/// Discards every result.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PersistenceSink for NullSink {
    async fn persist(&self, _result: &AnalysisResult) -> Result<()> {
        Ok(())
    }
}

/// Keeps results in memory, in the order they were stored.
#[derive(Debug, Default)]
pub struct MemorySink {
    results: Mutex<Vec<AnalysisResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far.
    pub fn results(&self) -> Vec<AnalysisResult> {
        self.results.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.results.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistenceSink for MemorySink {
    async fn persist(&self, result: &AnalysisResult) -> Result<()> {
        let mut results = self
            .results
            .lock()
            .map_err(|_| LexiscopeError::Persistence("memory sink lock poisoned".to_string()))?;
        results.push(result.clone());
        Ok(())
    }
}

/// Fetcher for analyzers that only ever see HTML handed to them directly.
///
/// Every fetch fails, so [`Analyzer::analyze`] on an offline analyzer always
/// yields a soft-empty result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl HtmlFetcher for OfflineFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        Err(LexiscopeError::InvalidUrl(format!("{} cannot be fetched offline", url)))
    }
}

/// Runs the analysis pipeline for URLs or raw HTML.
pub struct Analyzer<F, S> {
    fetcher: F,
    sink: S,
    config: AnalyzerConfig,
    selector: ContentSelector,
    ranker: KeywordRanker,
}

impl<S: PersistenceSink> Analyzer<OfflineFetcher, S> {
    /// An analyzer for local HTML (files, stdin) that never touches the network.
    pub fn offline(sink: S, config: AnalyzerConfig) -> Result<Self> {
        Self::new(OfflineFetcher, sink, config)
    }
}

impl<F: HtmlFetcher, S: PersistenceSink> Analyzer<F, S> {
    /// Creates an analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`LexiscopeError::ConfigError`] for unusable keyword or fetch
    /// settings and [`LexiscopeError::HtmlParseError`] if the configured
    /// content tag is not a valid selector.
    pub fn new(fetcher: F, sink: S, config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let selector = ContentSelector::from_config(&config)?;
        let ranker = KeywordRanker::new(config.keywords.clone());
        Ok(Self { fetcher, sink, config, selector, ranker })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Fetches `url` and analyzes it on behalf of `requester`.
    ///
    /// Fetch failures and non-2xx responses produce a soft-empty result. A
    /// result with clean text is handed to the sink before it is returned.
    pub async fn analyze(&self, url: &str, requester: &str) -> AnalysisResult {
        trace_phase(url, Phase::Idle);
        trace_phase(url, Phase::Fetching);

        let page = match self.fetcher.fetch(url).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                warn!(url, status = page.status, "Page returned a non-success status");
                trace_phase(url, Phase::Failed);
                return AnalysisResult::empty(url, requester);
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to fetch page");
                trace_phase(url, Phase::Failed);
                return AnalysisResult::empty(url, requester);
            }
        };

        let result = self.analyze_html(url, &page.body, requester);
        if !result.has_content() {
            info!(url, "No article text found, analysis not stored");
            return result;
        }

        match self.sink.persist(&result).await {
            Ok(()) => info!(url, requester, words = result.word_count, "Stored analysis"),
            Err(e) => warn!(url, error = %e, "Failed to store analysis"),
        }

        result
    }

    /// Analyzes HTML that has already been retrieved. Nothing is stored.
    pub fn analyze_html(&self, url: &str, html: &str, requester: &str) -> AnalysisResult {
        trace_phase(url, Phase::Extracting);
        let doc = Document::parse(html);
        let selected = self.selector.extract(&doc);
        let clean_text = normalize(&selected.raw_text);
        let structure = inventory(&doc);
        debug!(url, nodes = selected.node_count, chars = clean_text.len(), "Selected article text");

        let mut result = AnalysisResult::empty(url, requester);
        result.image_count = structure.image_count;
        result.headings = structure.headings;
        result.main_heading = structure.main_heading;

        if clean_text.is_empty() {
            // sentences are counted on the raw selection, which may still hold text
            result.sentence_count = sent_tokenize(&selected.raw_text).len();
            trace_phase(url, Phase::Skipped);
            return result;
        }

        trace_phase(url, Phase::Analyzing);
        let stats = linguistics::analyze(&clean_text, &selected.raw_text);

        trace_phase(url, Phase::Ranking);
        let keyword_frequency = self.ranker.rank(&clean_text);

        trace_phase(url, Phase::Assembling);
        result.word_count = stats.word_count;
        result.sentence_count = stats.sentence_count;
        result.pos_counts = stats.pos_counts;
        result.keyword_frequency = keyword_frequency;
        result.clean_text = clean_text;

        trace_phase(url, Phase::Done);
        result
    }
}

fn trace_phase(url: &str, phase: Phase) {
    debug!(url, %phase, terminal = phase.is_terminal(), "Analysis phase");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ANONYMOUS_REQUESTER;

    struct StaticFetcher {
        page: Option<FetchedPage>,
    }

    impl HtmlFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            self.page.clone().ok_or_else(|| LexiscopeError::InvalidUrl(url.to_string()))
        }
    }

    struct FailingSink;

    impl PersistenceSink for FailingSink {
        async fn persist(&self, _result: &AnalysisResult) -> Result<()> {
            Err(LexiscopeError::Persistence("database offline".to_string()))
        }
    }

    const ARTICLE: &str = r#"
        <html><body>
            <h1>Flood warning</h1>
            <img src="river.jpg">
            <div class="news-content"><p>Heavy rain fell overnight. Rivers rose quickly.</p></div>
        </body></html>
    "#;

    fn run<T: Send + 'static>(fut: impl Future<Output = T> + Send + 'static) -> T {
        std::thread::spawn(move || tokio::runtime::Runtime::new().unwrap().block_on(fut))
            .join()
            .unwrap()
    }

    fn analyzer_with(page: Option<FetchedPage>) -> Analyzer<StaticFetcher, MemorySink> {
        Analyzer::new(StaticFetcher { page }, MemorySink::new(), AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_analyze_stores_non_empty_result() {
        let result = run(async {
            let analyzer = analyzer_with(Some(FetchedPage::new(200, ARTICLE)));
            let result = analyzer.analyze("https://example.com/a", "reader@example.com").await;
            assert_eq!(analyzer.sink().len(), 1);
            assert_eq!(analyzer.sink().results()[0], result);
            result
        });

        assert_eq!(result.clean_text, "Heavy rain fell overnight. Rivers rose quickly.");
        assert_eq!(result.word_count, 9);
        assert_eq!(result.sentence_count, 2);
        assert_eq!(result.image_count, 1);
        assert_eq!(result.main_heading.as_deref(), Some("Flood warning"));
        assert_eq!(result.requester, "reader@example.com");
        assert!(!result.keyword_frequency.is_empty());
    }

    #[test]
    fn test_non_success_status_is_soft_empty() {
        let (result, stored) = run(async {
            let analyzer = analyzer_with(Some(FetchedPage::new(404, ARTICLE)));
            let result = analyzer.analyze("https://example.com/missing", ANONYMOUS_REQUESTER).await;
            (result, analyzer.sink().len())
        });

        assert_eq!(result, AnalysisResult::empty("https://example.com/missing", ANONYMOUS_REQUESTER));
        assert_eq!(stored, 0);
    }

    #[test]
    fn test_fetch_error_is_soft_empty() {
        let (result, stored) = run(async {
            let analyzer = analyzer_with(None);
            let result = analyzer.analyze("not a url", ANONYMOUS_REQUESTER).await;
            (result, analyzer.sink().len())
        });

        assert!(!result.has_content());
        assert_eq!(result.url, "not a url");
        assert_eq!(stored, 0);
    }

    #[test]
    fn test_empty_content_skips_storage() {
        let html = r#"<h1>Headline only</h1><div class="sidebar">Not article text.</div>"#;
        let (result, stored) = run(async move {
            let analyzer = analyzer_with(Some(FetchedPage::new(200, html)));
            let result = analyzer.analyze("https://example.com/empty", ANONYMOUS_REQUESTER).await;
            (result, analyzer.sink().len())
        });

        assert_eq!(result.clean_text, "");
        assert_eq!(result.word_count, 0);
        assert_eq!(result.pos_counts.total(), 0);
        assert_eq!(result.headings.h1, vec!["Headline only"]);
        assert_eq!(stored, 0);
    }

    #[test]
    fn test_persist_failure_keeps_result() {
        let result = run(async {
            let analyzer =
                Analyzer::new(StaticFetcher { page: Some(FetchedPage::new(200, ARTICLE)) }, FailingSink, AnalyzerConfig::default())
                    .unwrap();
            analyzer.analyze("https://example.com/a", ANONYMOUS_REQUESTER).await
        });

        assert!(result.has_content());
        assert_eq!(result.sentence_count, 2);
    }

    #[test]
    fn test_offline_analyzer_never_fetches() {
        let result = run(async {
            let analyzer = Analyzer::offline(NullSink, AnalyzerConfig::default()).unwrap();
            analyzer.analyze("https://example.com/a", ANONYMOUS_REQUESTER).await
        });

        assert!(!result.has_content());
    }

    #[test]
    fn test_analyze_html_is_deterministic() {
        let analyzer = Analyzer::offline(NullSink, AnalyzerConfig::default()).unwrap();
        let first = analyzer.analyze_html("https://example.com/a", ARTICLE, ANONYMOUS_REQUESTER);
        let second = analyzer.analyze_html("https://example.com/a", ARTICLE, ANONYMOUS_REQUESTER);
        assert_eq!(first, second);
    }

    #[test]
    fn test_phase_terminal_states() {
        assert!(Phase::Done.is_terminal());
        assert!(Phase::Skipped.is_terminal());
        assert!(Phase::Failed.is_terminal());
        assert!(!Phase::Ranking.is_terminal());
        assert_eq!(Phase::Assembling.to_string(), "assembling");
    }
}
