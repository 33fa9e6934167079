/*!
 * Text extraction from web pages.
 *
 * A page is fetched through a `PageFetcher`, its first `<p>` elements are
 * collected, citation markers such as `[12]` are stripped, and the cleaned
 * paragraphs are joined into one text.
 */

use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::app_config::PipelineConfig;
use crate::errors::{PipelineError, ProviderError};

/// Matches bracketed citation markers like `[3]`
static CITATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\d+\]").expect("Invalid citation marker regex")
});

/// Maximum redirects followed when fetching a page
const MAX_REDIRECTS: usize = 5;

/// Raw result of fetching a page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

/// Anything that can retrieve the body of a URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ProviderError>;
}

/// `PageFetcher` over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a request timeout and user agent
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Create a fetcher from the pipeline settings
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ProviderError> {
        Self::new(config.fetch_timeout_secs, &config.user_agent)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ProviderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchedPage { status, body })
    }
}

/// Text extracted from one URL
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub url: String,
    pub raw_text: String,
}

/// Extract and clean paragraph text from an HTML document.
///
/// Takes at most `max_paragraphs` `<p>` elements in document order. Each
/// paragraph has its whitespace collapsed and citation markers removed;
/// paragraphs left empty are dropped. The rest are joined with single spaces.
pub fn extract_paragraph_text(html: &str, max_paragraphs: usize) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .take(max_paragraphs)
        .map(|paragraph| clean_paragraph(&paragraph.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_paragraph(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = CITATION_MARKER.replace_all(&collapsed, "");
    // Removing a marker can leave doubled or trailing spaces
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fetches pages and turns them into `SourceDocument`s
#[derive(Clone)]
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    max_paragraphs: usize,
    min_text_chars: usize,
}

impl Extractor {
    /// Create an extractor over a fetcher
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_paragraphs: usize, min_text_chars: usize) -> Self {
        Self {
            fetcher,
            max_paragraphs,
            min_text_chars,
        }
    }

    /// Fetch `url` and extract its paragraph text
    pub async fn extract(&self, url: &str) -> Result<SourceDocument, PipelineError> {
        let parsed = Url::parse(url).map_err(|e| PipelineError::FetchFailed(format!("invalid URL '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PipelineError::FetchFailed(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        debug!("Fetching {}", url);
        let page = self
            .fetcher
            .fetch(parsed.as_str())
            .await
            .map_err(|e| PipelineError::FetchFailed(e.to_string()))?;

        if !(200..300).contains(&page.status) {
            return Err(PipelineError::FetchFailed(format!("HTTP status {} for {}", page.status, url)));
        }

        let raw_text = extract_paragraph_text(&page.body, self.max_paragraphs);
        let length = raw_text.chars().count();
        if length < self.min_text_chars {
            return Err(PipelineError::ContentTooShort {
                length,
                minimum: self.min_text_chars,
            });
        }

        info!("Extracted {} characters from {}", length, url);
        Ok(SourceDocument {
            url: url.to_string(),
            raw_text,
        })
    }
}
