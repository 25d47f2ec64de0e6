//! Error types for Lexiscope operations.
//!
//! This module defines the main error type [`LexiscopeError`] which represents
//! everything that can go wrong while fetching a page, reading local input,
//! serializing a report or handing a result to a persistence sink.
//!
//! Most of these never reach the caller of [`Analyzer::analyze`](crate::Analyzer::analyze):
//! the orchestrator logs them and degrades to a soft-empty result instead.
//!
//! # Example
//!
//! ```rust
//! use lexiscope_core::{LexiscopeError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(LexiscopeError::HtmlParseError("empty document".to_string()));
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetch, parse and persistence operations.
#[derive(Error, Debug)]
pub enum LexiscopeError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered, but not with a 2xx status.
    #[error("Unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is not absolute.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, including invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persistence collaborator rejected a result.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Invalid analyzer configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LexiscopeError {
    /// Whether a retry of the same request could plausibly succeed.
    ///
    /// Timeouts, connection failures and 5xx answers are transient; malformed
    /// URLs and 4xx answers are not.
    pub fn is_transient(&self) -> bool {
        match self {
            LexiscopeError::Timeout { .. } => true,
            LexiscopeError::HttpStatus { status } => *status >= 500,
            #[cfg(feature = "fetch")]
            LexiscopeError::HttpError(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

/// Result type alias for LexiscopeError.
pub type Result<T> = std::result::Result<T, LexiscopeError>;
