use crate::analysis::AnalysisResult;
use crate::pos::PosBucket;

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Wrap clean text at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Append the clean text after the statistics
    pub include_clean_text: bool,

    /// Maximum keywords listed (0 = all)
    pub max_keywords: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { line_width: 80, include_clean_text: true, max_keywords: 0 }
    }
}

/// Render an analysis as a plain text report
pub fn convert_to_text(result: &AnalysisResult, config: &TextConfig) -> String {
    let mut sections = vec![generate_header(result), summary_section(result), pos_section(result)];

    sections.push(keyword_section(result, config.max_keywords));
    sections.push(heading_section(result));

    if config.include_clean_text && result.has_content() {
        sections.push(format!("Clean text\n----------\n{}", wrap_text(&result.clean_text, config.line_width)));
    }

    sections.join("\n\n").trim().to_string()
}

fn generate_header(result: &AnalysisResult) -> String {
    let title = result.main_heading.as_deref().filter(|h| !h.is_empty()).unwrap_or(&result.url);
    format!("{}\n{}", title, "=".repeat(title.chars().count()))
}

fn summary_section(result: &AnalysisResult) -> String {
    [
        format!("URL: {}", result.url),
        format!("Requester: {}", result.requester),
        format!("Words: {}", result.word_count),
        format!("Sentences: {}", result.sentence_count),
        format!("Images: {}", result.image_count),
    ]
    .join("\n")
}

fn pos_section(result: &AnalysisResult) -> String {
    let mut lines = vec!["Parts of speech".to_string(), "---------------".to_string()];
    for bucket in PosBucket::ALL {
        lines.push(format!("{:<10} {}", bucket.label(), result.pos_counts.get(bucket)));
    }
    lines.join("\n")
}

fn keyword_section(result: &AnalysisResult, max: usize) -> String {
    let mut lines = vec!["Keywords".to_string(), "--------".to_string()];
    let limit = if max == 0 { usize::MAX } else { max };

    if result.keyword_frequency.is_empty() {
        lines.push("(none)".to_string());
    }
    for (phrase, frequency) in result.keyword_frequency.iter().take(limit) {
        lines.push(format!("{} ({})", phrase, frequency));
    }
    lines.join("\n")
}

fn heading_section(result: &AnalysisResult) -> String {
    let mut lines = vec!["Headings".to_string(), "--------".to_string()];

    if result.headings.total() == 0 {
        lines.push("(none)".to_string());
    }
    for (tag, headings) in result.headings.iter() {
        for heading in headings {
            lines.push(format!("{}: {}", tag, heading.trim()));
        }
    }
    lines.join("\n")
}

/// Wrap text to specified line width
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut current_line: Vec<&str> = Vec::new();
    let mut current_length = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}
