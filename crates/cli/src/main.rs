use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use lexiscope_core::{
    ANONYMOUS_REQUESTER, AnalysisResult, Analyzer, AnalyzerConfig, HttpFetcher, JsonConfig, KeywordCollision,
    NullSink, TextConfig, convert_to_json, convert_to_text, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use tracing::Level;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Where the HTML comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Url(Url),
    File(String),
    Stdin,
}

impl Input {
    fn detect(raw: &str) -> Self {
        if raw == "-" {
            return Input::Stdin;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Input::Url(url),
            _ => Input::File(raw.to_string()),
        }
    }

    /// Identifier recorded as the analysis URL
    fn source(&self) -> String {
        match self {
            Input::Url(url) => url.to_string(),
            Input::File(path) => path.clone(),
            Input::Stdin => "stdin".to_string(),
        }
    }
}

/// Analyze a web article: clean text, counts, part-of-speech mix, keywords and headings
#[derive(Parser, Debug)]
#[command(name = "lexiscope")]
#[command(author = "Lexiscope Contributors")]
#[command(version)]
#[command(about = "Analyze article text, keywords and structure", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Identity recorded with the analysis
    #[arg(long, default_value = ANONYMOUS_REQUESTER, value_name = "ID")]
    requester: String,

    /// Keep the first occurrence when keyword widths produce the same phrase
    #[arg(long)]
    first_write_keywords: bool,

    /// Line width for the clean text in text reports (0 = no wrapping)
    #[arg(long, default_value = "80", value_name = "COLS")]
    width: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn analyzer_config(&self) -> AnalyzerConfig {
        let collision =
            if self.first_write_keywords { KeywordCollision::FirstWrite } else { KeywordCollision::LastWrite };

        let mut builder = AnalyzerConfig::builder().timeout(self.timeout).keyword_collision(collision);
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build()
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run_analysis(
    input: &Input, args: &Args, timings: &mut Vec<(String, std::time::Duration)>,
) -> anyhow::Result<AnalysisResult> {
    let config = args.analyzer_config();
    let started = Instant::now();

    let html = match input {
        Input::Url(url) => {
            if args.verbose {
                echo::print_step(1, 3, &format!("Fetching and analyzing {}", url.as_str().bright_white().underline()));
            }
            let fetcher = HttpFetcher::new(config.fetch.clone()).context("Failed to build HTTP client")?;
            let analyzer = Analyzer::new(fetcher, NullSink, config).context("Invalid analyzer configuration")?;

            let result = analyzer.analyze(url.as_str(), &args.requester).await;
            timings.push(("Fetch + analyze".to_string(), started.elapsed()));
            return Ok(result);
        }
        Input::Stdin => {
            if args.verbose {
                echo::print_step(1, 3, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        }
        Input::File(path) => {
            if args.verbose {
                echo::print_step(1, 3, &format!("Reading from file {}", path.bright_white()));
            }
            fetch_file(path).with_context(|| format!("Failed to read file: {}", path))?
        }
    };
    timings.push(("Read".to_string(), started.elapsed()));

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 3, "Analyzing HTML document");
    }

    let analyzer = Analyzer::offline(NullSink, config).context("Invalid analyzer configuration")?;
    let started = Instant::now();
    let result = analyzer.analyze_html(&input.source(), &html, &args.requester);
    timings.push(("Analyze".to_string(), started.elapsed()));

    Ok(result)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let input = Input::detect(&args.input);
    let started = Instant::now();
    let mut timings = Vec::new();

    let result = run_analysis(&input, &args, &mut timings).await?;

    if !result.has_content() {
        echo::print_warning(&format!("No article text found in {}", input.source()));
    }

    let output = match args.format {
        OutputFormat::Json => {
            let config = JsonConfig { pretty: !args.compact, ..Default::default() };
            convert_to_json(&result, &config).context("Failed to serialize analysis")?
        }
        OutputFormat::Text => {
            let config = TextConfig { line_width: args.width, ..Default::default() };
            convert_to_text(&result, &config)
        }
    };

    if args.verbose {
        echo::print_analysis_details(&result);
        echo::print_step(3, 3, "Writing output");
        eprintln!("  {} {}\n", "Format:".dimmed(), format!("{:?}", args.format).bright_white());
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_detection() {
        assert_eq!(Input::detect("-"), Input::Stdin);
        assert_eq!(Input::detect("page.html"), Input::File("page.html".to_string()));
        assert_eq!(Input::detect("ftp://example.com/a"), Input::File("ftp://example.com/a".to_string()));
        assert!(matches!(Input::detect("https://example.com/a"), Input::Url(_)));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("txt".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_args_to_config() {
        let args = Args::parse_from(["lexiscope", "--timeout", "5", "--first-write-keywords", "page.html"]);
        let config = args.analyzer_config();

        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.keywords.collision, KeywordCollision::FirstWrite);
        assert_eq!(args.requester, ANONYMOUS_REQUESTER);
    }
}
