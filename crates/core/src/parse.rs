//! HTML parsing and DOM querying.
//!
//! A page is parsed exactly once into a [`Document`]; both the content
//! selector and the structure inventory query that same tree.
//!
//! # Example
//!
//! ```rust
//! use lexiscope_core::parse::Document;
//!
//! let html = r#"<html><body><h1>Title</h1><p class="content">Paragraph</p></body></html>"#;
//!
//! let doc = Document::parse(html);
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs[0].text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{LexiscopeError, Result};

/// Represents a parsed HTML document.
///
/// html5ever recovers from any malformed input, so parsing itself never
/// fails; broken markup simply yields a sparser tree.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// ```rust
    /// use lexiscope_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><h1>Title</h1></body></html>");
    /// assert_eq!(doc.select("h1").unwrap().len(), 1);
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`LexiscopeError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.select_with(&sel))
    }

    /// Selects elements using a pre-compiled selector, in document order.
    pub fn select_with(&'_ self, selector: &Selector) -> Vec<Element<'_>> {
        self.html.select(selector).map(|element| Element { element }).collect()
    }

    /// Iterates every element of the document in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
    }
}

/// Compiles a CSS selector, mapping failures to [`LexiscopeError::HtmlParseError`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| LexiscopeError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A thin wrapper around scraper's ElementRef.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// All descendant text nodes are concatenated verbatim, with no separator
    /// and no trimming.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with every text node trimmed and empty nodes dropped.
    ///
    /// ```rust
    /// use lexiscope_core::parse::Document;
    ///
    /// let doc = Document::parse("<h1>\n  Breaking <em> news </em>\n</h1>");
    /// let h1 = doc.select("h1").unwrap()[0];
    /// assert_eq!(h1.stripped_text(), "Breakingnews");
    /// ```
    pub fn stripped_text(&self) -> String {
        self.element
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Iterates the whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &'a str> {
        self.element.value().classes()
    }

    /// Gets the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <body>
            <h1>Heading</h1>
            <p class="content lead">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_element_classes() {
        let doc = Document::parse(SAMPLE_HTML);
        let paragraphs = doc.select("p").unwrap();
        let classes: Vec<&str> = paragraphs[0].classes().collect();
        assert_eq!(classes, vec!["content", "lead"]);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(LexiscopeError::HtmlParseError(_))));
    }

    #[test]
    fn test_elements_in_document_order() {
        let doc = Document::parse("<div><h2>a</h2><p>b</p></div><h2>c</h2>");
        let tags: Vec<String> = doc.elements().map(|e| e.tag_name()).collect();
        assert_eq!(tags, vec!["html", "head", "body", "div", "h2", "p", "h2"]);
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let doc = Document::parse("<div class='news-content'><p>Unclosed <b>bold</div>");
        let divs = doc.select("div").unwrap();
        assert_eq!(divs.len(), 1);
        assert!(divs[0].text().contains("Unclosed bold"));
    }
}
