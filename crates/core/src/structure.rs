//! Whole-document structure inventory: images and headings.
//!
//! Unlike the content selector, the inventory looks at the entire page.

use crate::analysis::Headings;
use crate::parse::Document;

/// Images and headings found anywhere in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStructure {
    pub image_count: usize,
    pub headings: Headings,
    pub main_heading: Option<String>,
}

/// Inventories the structure of a parsed document.
///
/// ```rust
/// use lexiscope_core::parse::Document;
/// use lexiscope_core::structure::inventory;
///
/// let doc = Document::parse("<h1> Big  <em>news</em> </h1><img src=a.png><h2>More</h2>");
/// let structure = inventory(&doc);
/// assert_eq!(structure.image_count, 1);
/// assert_eq!(structure.headings.h2, vec!["More"]);
/// assert_eq!(structure.main_heading.as_deref(), Some("Bignews"));
/// ```
pub fn inventory(doc: &Document) -> DocumentStructure {
    let mut structure = DocumentStructure::default();

    for element in doc.elements() {
        let tag = element.tag_name();
        if tag == "img" {
            structure.image_count += 1;
            continue;
        }

        let Some(level) = heading_level(&tag) else { continue };
        if level == 1 && structure.main_heading.is_none() {
            structure.main_heading = Some(element.stripped_text());
        }
        if let Some(bucket) = structure.headings.level_mut(level) {
            bucket.push(element.text());
        }
    }

    structure
}

fn heading_level(tag: &str) -> Option<usize> {
    let level = tag.strip_prefix('h')?.parse::<usize>().ok()?;
    (1..=6).contains(&level).then_some(level)
}
