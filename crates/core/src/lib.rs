pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod keywords;
pub mod linguistics;
pub mod normalize;
pub mod parse;
pub mod pos;
pub mod select;
pub mod stopwords;
pub mod structure;
pub mod tokenize;

pub use analysis::{ANONYMOUS_REQUESTER, AnalysisResult, Headings, KeywordFrequencies, PosCounts};
pub use analyzer::{Analyzer, MemorySink, NullSink, OfflineFetcher, PersistenceSink, Phase};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, KeywordCollision, KeywordConfig};
pub use error::{LexiscopeError, Result};
pub use fetch::{FetchConfig, FetchedPage, HtmlFetcher, validate_url};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{JsonConfig, TextConfig, convert_to_json, convert_to_text};
pub use keywords::{KeywordRanker, YakeExtractor};
pub use linguistics::LinguisticStats;
pub use normalize::normalize;
pub use parse::Document;
pub use pos::{PosBucket, PosTagger};
pub use select::{ContentSelector, SelectedContent};
pub use stopwords::StopwordSet;
pub use structure::DocumentStructure;
