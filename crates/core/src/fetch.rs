//! HTML retrieval from URLs, files, and stdin.
//!
//! The orchestrator talks to the network only through the [`HtmlFetcher`]
//! trait so that tests (and alternative transports) can supply pages without
//! a socket. [`HttpFetcher`] is the reqwest-backed implementation.

use std::fs;
use std::future::Future;
use std::path::PathBuf;

use url::Url;

use crate::{LexiscopeError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Extra attempts after a transient failure.
    pub retries: u32,
    /// Delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Lexiscope/0.1)".to_string(),
            retries: 1,
            retry_delay_ms: 500,
        }
    }
}

/// A response as received: status plus decoded body.
///
/// Whether the page counts as usable content is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// True for 2xx responses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The status as [`LexiscopeError::HttpStatus`] when it is not 2xx.
    pub fn status_error(&self) -> Option<LexiscopeError> {
        (!self.is_success()).then_some(LexiscopeError::HttpStatus { status: self.status })
    }
}

/// Retrieves raw HTML for a URL.
///
/// Implementations fail only on transport-level problems (bad URL, connection
/// failure, timeout); any HTTP answer, including 4xx/5xx, is returned as a
/// [`FetchedPage`].
pub trait HtmlFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage>> + Send;
}

/// Parses and validates an absolute URL.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| LexiscopeError::InvalidUrl(e.to_string()))?;

    if parsed.cannot_be_a_base() {
        return Err(LexiscopeError::InvalidUrl(format!("{} is not an absolute URL", url)));
    }

    Ok(parsed)
}

#[cfg(feature = "fetch")]
pub use http::HttpFetcher;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::Client;

    use super::{FetchConfig, FetchedPage, HtmlFetcher, validate_url};
    use crate::{LexiscopeError, Result};

    /// [`HtmlFetcher`] backed by a shared reqwest client.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        config: FetchConfig,
    }

    impl HttpFetcher {
        pub fn new(config: FetchConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(LexiscopeError::HttpError)?;

            Ok(Self { client, config })
        }

        async fn fetch_once(&self, url: &url::Url) -> Result<FetchedPage> {
            let response = self
                .client
                .get(url.clone())
                .header(
                    "Accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header("Accept-Language", "en-US,en;q=0.9")
                .send()
                .await
                .map_err(|e| self.classify(e))?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| self.classify(e))?;

            Ok(FetchedPage { status, body })
        }

        fn classify(&self, e: reqwest::Error) -> LexiscopeError {
            if e.is_timeout() { LexiscopeError::Timeout { timeout: self.config.timeout } } else { LexiscopeError::HttpError(e) }
        }
    }

    impl HtmlFetcher for HttpFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            let parsed = validate_url(url)?;
            let mut attempt = 0;

            loop {
                let outcome = self.fetch_once(&parsed).await;
                let retry = attempt < self.config.retries
                    && match &outcome {
                        Ok(page) => page.status_error().is_some_and(|e| e.is_transient()),
                        Err(e) => e.is_transient(),
                    };

                if !retry {
                    return outcome;
                }

                attempt += 1;
                tracing::debug!(url, attempt, "retrying fetch after transient failure");
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }
        }
    }
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(LexiscopeError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(LexiscopeError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(LexiscopeError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.retries, 1);
        assert!(config.user_agent.contains("Lexiscope"));
    }

    #[test]
    fn test_fetched_page_success_range() {
        assert!(FetchedPage::new(200, "").is_success());
        assert!(FetchedPage::new(204, "").is_success());
        assert!(!FetchedPage::new(301, "").is_success());
        assert!(!FetchedPage::new(404, "").is_success());
        assert!(!FetchedPage::new(500, "").is_success());
    }

    #[test]
    fn test_status_error() {
        assert!(FetchedPage::new(200, "").status_error().is_none());
        assert!(matches!(
            FetchedPage::new(503, "").status_error(),
            Some(LexiscopeError::HttpStatus { status: 503 })
        ));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com/a?b=c").is_ok());
        assert!(matches!(validate_url("example.com"), Err(LexiscopeError::InvalidUrl(_))));
        assert!(matches!(validate_url("mailto:someone@example.com"), Err(LexiscopeError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(LexiscopeError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html><body>Hi</body></html>").unwrap();

        let html = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert!(html.contains("Hi"));
    }

    #[cfg(feature = "fetch")]
    mod retry {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        use super::*;

        /// Answers each connection with the next status in `statuses`, repeating
        /// the last one, and counts the requests seen.
        async fn scripted_server(statuses: Vec<u16>) -> (String, Arc<AtomicUsize>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let hits = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&hits);

            tokio::spawn(async move {
                while let Ok((mut socket, _)) = listener.accept().await {
                    let seen = counter.fetch_add(1, Ordering::SeqCst);
                    let status = statuses.get(seen).or(statuses.last()).copied().unwrap_or(500);

                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let body = format!("<p>status {}</p>", status);
                    let response = format!(
                        "HTTP/1.1 {} Scripted\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            });

            (format!("http://{}/", addr), hits)
        }

        fn fetch_with_script(statuses: Vec<u16>, retries: u32) -> (Result<FetchedPage>, usize) {
            std::thread::spawn(move || {
                tokio::runtime::Runtime::new().unwrap().block_on(async move {
                    let (url, hits) = scripted_server(statuses).await;
                    let config = FetchConfig { timeout: 5, retries, retry_delay_ms: 0, ..FetchConfig::default() };
                    let fetcher = HttpFetcher::new(config).unwrap();
                    let outcome = fetcher.fetch(&url).await;
                    (outcome, hits.load(Ordering::SeqCst))
                })
            })
            .join()
            .unwrap()
        }

        #[test]
        fn test_server_error_is_retried_once() {
            let (outcome, hits) = fetch_with_script(vec![503, 200], 1);
            let page = outcome.unwrap();

            assert_eq!(page.status, 200);
            assert!(page.body.contains("status 200"));
            assert_eq!(hits, 2);
        }

        #[test]
        fn test_persistent_server_error_stops_after_one_retry() {
            let (outcome, hits) = fetch_with_script(vec![503], 1);

            assert_eq!(outcome.unwrap().status, 503);
            assert_eq!(hits, 2);
        }

        #[test]
        fn test_client_error_is_not_retried() {
            let (outcome, hits) = fetch_with_script(vec![404, 200], 1);

            assert_eq!(outcome.unwrap().status, 404);
            assert_eq!(hits, 1);
        }
    }
}
