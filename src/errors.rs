/*!
 * Error types for the weblingo application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a remote service
/// (web pages, LLM providers, translation endpoints)
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::ConnectionError(format!("request timed out: {}", error))
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Failures surfaced by the content-processing pipeline.
///
/// Every variant is a terminal outcome of one `process` call. Per-chunk
/// summarization/translation failures are absorbed as inline markers and only
/// show up here when no chunk succeeded at all.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The page could not be fetched (bad URL, network error, non-2xx status)
    #[error("Error fetching text: {0}")]
    FetchFailed(String),

    /// The extracted text is below the configured minimum
    #[error("Error: Extracted text too short ({length} characters, minimum {minimum}).")]
    ContentTooShort {
        /// Extracted length in characters
        length: usize,
        /// Configured minimum in characters
        minimum: usize,
    },

    /// The sentiment gate rejected the content
    #[error("{0}")]
    ContentBlocked(String),

    /// The sentiment classifier could not produce a label
    #[error("Sentiment analysis unavailable: {0}")]
    SentimentUnavailable(String),

    /// There was no text to work on
    #[error("Error: No text provided for summarization.")]
    EmptyInput,

    /// Every summarization chunk failed
    #[error("Summarization failed for all {total} chunks ({failed} failed)")]
    SummarizationPartialFailure {
        /// Number of failed chunks
        failed: usize,
        /// Number of chunks submitted
        total: usize,
    },

    /// Every translation window failed
    #[error("Translation failed for all {total} windows ({failed} failed)")]
    TranslationPartialFailure {
        /// Number of failed windows
        failed: usize,
        /// Number of windows submitted
        total: usize,
    },

    /// The report document could not be written
    #[error("Failed to render report: {0}")]
    RenderFailed(String),
}

impl PipelineError {
    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FetchFailed(_) => "FetchFailed",
            Self::ContentTooShort { .. } => "ContentTooShort",
            Self::ContentBlocked(_) => "ContentBlocked",
            Self::SentimentUnavailable(_) => "SentimentUnavailable",
            Self::EmptyInput => "EmptyInput",
            Self::SummarizationPartialFailure { .. } => "SummarizationPartialFailure",
            Self::TranslationPartialFailure { .. } => "TranslationPartialFailure",
            Self::RenderFailed(_) => "RenderFailed",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the processing pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
