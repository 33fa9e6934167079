/*!
 * In-memory page fetcher for tests
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use weblingo::errors::ProviderError;
use weblingo::pipeline::{FetchedPage, PageFetcher};

/// Serves canned pages by URL and records every fetch.
/// Unknown URLs answer with a 404.
#[derive(Debug, Clone, Default)]
pub struct StubFetcher {
    pages: HashMap<String, (u16, String)>,
    fetched: Arc<Mutex<Vec<String>>>,
    offline: bool,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetcher whose every request fails at the network level
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Serve `body` with status 200 at `url`
    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.with_response(url, 200, body)
    }

    /// Serve `body` with `status` at `url`
    pub fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(url.to_string(), (status, body.to_string()));
        self
    }

    /// URLs fetched so far
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ProviderError> {
        self.fetched.lock().push(url.to_string());

        if self.offline {
            return Err(ProviderError::ConnectionError(format!("cannot reach {}", url)));
        }

        Ok(match self.pages.get(url) {
            Some((status, body)) => FetchedPage {
                status: *status,
                body: body.clone(),
            },
            None => FetchedPage {
                status: 404,
                body: "<html><body><p>Not Found</p></body></html>".to_string(),
            },
        })
    }
}
