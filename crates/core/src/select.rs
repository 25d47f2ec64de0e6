//! Article body selection.
//!
//! Article content is located with a fixed class allow-list rather than by
//! scoring: every element of the configured tag carrying at least one
//! allow-listed class token is selected. Pages that match nothing produce an
//! empty selection, which flows downstream as empty content.

use scraper::Selector;

use crate::config::AnalyzerConfig;
use crate::parse::{Document, Element, compile_selector};
use crate::Result;

/// Selects candidate article-body elements from a parsed document.
#[derive(Debug, Clone)]
pub struct ContentSelector {
    tag: Selector,
    classes: Vec<String>,
}

/// Text gathered from the selected elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedContent {
    /// Visible text of every matched element, in document order, joined by a single space.
    pub raw_text: String,
    /// Number of matched elements.
    pub node_count: usize,
}

impl ContentSelector {
    /// # Errors
    ///
    /// Returns [`LexiscopeError::HtmlParseError`](crate::LexiscopeError::HtmlParseError)
    /// if `tag` is not a valid selector.
    pub fn new(tag: &str, classes: Vec<String>) -> Result<Self> {
        Ok(Self { tag: compile_selector(tag)?, classes })
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        Self::new(&config.content_tag, config.content_classes.clone())
    }

    /// Returns every element whose class attribute contains an allow-listed token.
    ///
    /// Nested matches are all returned, so text inside two matching ancestors
    /// appears twice in [`SelectedContent::raw_text`].
    pub fn select_article_nodes<'a>(&self, doc: &'a Document) -> Vec<Element<'a>> {
        doc.select_with(&self.tag)
            .into_iter()
            .filter(|el| self.matches(el))
            .collect()
    }

    /// Selects the article nodes and concatenates their text.
    pub fn extract(&self, doc: &Document) -> SelectedContent {
        let nodes = self.select_article_nodes(doc);
        let raw_text = nodes.iter().map(Element::text).collect::<Vec<_>>().join(" ");

        SelectedContent { raw_text, node_count: nodes.len() }
    }

    fn matches(&self, el: &Element<'_>) -> bool {
        el.classes().any(|class| self.classes.iter().any(|allowed| allowed == class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_selector() -> ContentSelector {
        ContentSelector::from_config(&AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_selects_allow_listed_divs() {
        let html = r#"
            <div class="news-content"><p>First block.</p></div>
            <div class="sidebar"><p>Ignored.</p></div>
            <div class="wide clearfix"><p>Second block.</p></div>
            <section class="news-content"><p>Wrong tag.</p></section>
        "#;
        let doc = Document::parse(html);
        let content = default_selector().extract(&doc);

        assert_eq!(content.node_count, 2);
        assert_eq!(content.raw_text, "First block. Second block.");
    }

    #[test]
    fn test_class_tokens_match_exactly() {
        let doc = Document::parse(r#"<div class="news-contents">Nope</div><div class="containers">Nope</div>"#);
        let content = default_selector().extract(&doc);

        assert_eq!(content.node_count, 0);
        assert_eq!(content.raw_text, "");
    }

    #[test]
    fn test_nested_matches_repeat_text() {
        let doc = Document::parse(r#"<div class="container"><div class="description">Inner.</div></div>"#);
        let content = default_selector().extract(&doc);

        assert_eq!(content.node_count, 2);
        assert_eq!(content.raw_text, "Inner. Inner.");
    }

    #[test]
    fn test_custom_allow_list() {
        let selector = ContentSelector::new("article", vec!["post".to_string()]).unwrap();
        let doc = Document::parse(r#"<article class="post">Body text.</article><div class="post">No.</div>"#);

        assert_eq!(selector.extract(&doc).raw_text, "Body text.");
    }

    #[test]
    fn test_invalid_tag_selector() {
        assert!(ContentSelector::new("[[", vec![]).is_err());
    }
}
