use crate::analysis::AnalysisResult;
use crate::{LexiscopeError, Result};
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
    /// Leave the clean text out of the document
    pub omit_clean_text: bool,
}

/// Borrowed view of a result with the clean text left out.
#[derive(Serialize)]
struct Summary<'a> {
    url: &'a str,
    word_count: usize,
    sentence_count: usize,
    pos_counts: &'a crate::analysis::PosCounts,
    keyword_frequency: &'a crate::analysis::KeywordFrequencies,
    image_count: usize,
    headings: &'a crate::analysis::Headings,
    main_heading: Option<&'a str>,
    requester: &'a str,
}

impl<'a> From<&'a AnalysisResult> for Summary<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        Self {
            url: &result.url,
            word_count: result.word_count,
            sentence_count: result.sentence_count,
            pos_counts: &result.pos_counts,
            keyword_frequency: &result.keyword_frequency,
            image_count: result.image_count,
            headings: &result.headings,
            main_heading: result.main_heading.as_deref(),
            requester: &result.requester,
        }
    }
}

fn to_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    json.map_err(LexiscopeError::from)
}

/// Convert an analysis to JSON
pub fn convert_to_json(result: &AnalysisResult, config: &JsonConfig) -> Result<String> {
    if config.omit_clean_text {
        to_string(&Summary::from(result), config.pretty)
    } else {
        to_string(result, config.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::KeywordFrequencies;

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult::empty("https://example.com/story", "reader@example.com");
        result.clean_text = "Storms hit the coast.".to_string();
        result.word_count = 5;
        result.sentence_count = 1;
        result.keyword_frequency =
            KeywordFrequencies::from(vec![("Storms".to_string(), 1), ("coast".to_string(), 1)]);
        result.main_heading = Some("Storm report".to_string());
        result
    }

    #[test]
    fn test_convert_to_json_compact() {
        let json = convert_to_json(&sample(), &JsonConfig::default()).unwrap();

        assert!(json.contains(r#""url":"https://example.com/story""#));
        assert!(json.contains(r#""clean_text":"Storms hit the coast.""#));
        assert!(json.contains(r#""keyword_frequency":{"Storms":1,"coast":1}"#));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_convert_to_json_pretty() {
        let config = JsonConfig { pretty: true, ..Default::default() };
        let json = convert_to_json(&sample(), &config).unwrap();

        assert!(json.starts_with("{\n"));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_omit_clean_text() {
        let config = JsonConfig { omit_clean_text: true, ..Default::default() };
        let json = convert_to_json(&sample(), &config).unwrap();

        assert!(!json.contains("clean_text"));
        assert!(json.contains(r#""main_heading":"Storm report""#));
    }

    #[test]
    fn test_json_round_trips_to_result() {
        let result = sample();
        let json = convert_to_json(&result, &JsonConfig::default()).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
