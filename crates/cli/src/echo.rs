use owo_colors::OwoColorize;

use lexiscope_core::{AnalysisResult, PosBucket};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Lexiscope".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Analyze article text, keywords and structure\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 50.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 250.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Print analysis details summary
pub fn print_analysis_details(result: &AnalysisResult) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Analysis Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Words:".dimmed(), result.word_count.to_string().bright_white());
    eprintln!("  {} {}", "Sentences:".dimmed(), result.sentence_count.to_string().bright_white());
    eprintln!("  {} {}", "Images:".dimmed(), result.image_count.to_string().bright_white());
    eprintln!("  {} {}", "Headings:".dimmed(), result.headings.total().to_string().bright_white());

    let pos = PosBucket::ALL
        .iter()
        .map(|b| format!("{}={}", b.label(), result.pos_counts.get(*b)))
        .collect::<Vec<_>>()
        .join(" ");
    eprintln!("  {} {}", "POS:".dimmed(), pos.bright_white());

    if let Some((phrase, frequency)) = result.keyword_frequency.iter().next() {
        eprintln!(
            "  {} {} ({})\n",
            "Top keyword:".dimmed(),
            phrase.bright_white(),
            frequency
        );
    } else {
        eprintln!("  {} {}\n", "Top keyword:".dimmed(), "none".dimmed());
    }
}

/// Print timing summary
pub fn print_timing_summary(total: std::time::Duration, timings: &[(String, std::time::Duration)]) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Timing Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (label, duration) in timings {
        print_timing(label, *duration);
    }

    eprintln!(
        "  {} {:>8.2}ms\n",
        format!("{}:", "Total").bold().dimmed(),
        total.as_secs_f64() * 1000.0
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
