/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that can stand in for every NLP
 * capability of the pipeline:
 * - `MockProvider::working()` - Always succeeds with tagged output
 * - `MockProvider::intermittent(n)` - Fails every n-th request
 * - `MockProvider::failing()` - Always fails with an error
 *
 * Requests are recorded so tests can assert which stages were invoked.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::nlp::{SentimentClassifier, SentimentLabel, SummarizationModel, SummaryBounds, TranslationBackend};
use crate::providers::Provider;

/// Which capability a mock request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockTask {
    Classify,
    Summarize,
    Translate,
}

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// Capability that issued the request
    pub task: MockTask,
    /// The text to process
    pub text: String,
    /// Target language for translation requests
    pub target_language: Option<String>,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The produced text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns empty responses
    Empty,
    /// Simulates slow response
    Slow { delay_ms: u64 },
}

/// Mock provider for testing pipeline behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Every request received, in arrival order
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
    /// Requests matching this predicate fail (optional)
    fail_when: Option<fn(&MockRequest) -> bool>,
    /// Per-request delay in milliseconds (optional)
    delay: Option<fn(&MockRequest) -> u64>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
            fail_when: None,
            delay: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Fail every request matching the predicate
    pub fn with_failure_when(mut self, predicate: fn(&MockRequest) -> bool) -> Self {
        self.fail_when = Some(predicate);
        self
    }

    /// Delay each request by the returned number of milliseconds
    pub fn with_delay(mut self, delay: fn(&MockRequest) -> u64) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of requests received for a capability
    pub fn calls(&self, task: MockTask) -> usize {
        self.requests.lock().iter().filter(|r| r.task == task).count()
    }

    /// Snapshot of every request received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    fn default_response(request: &MockRequest) -> String {
        match request.task {
            MockTask::Classify => "POSITIVE".to_string(),
            MockTask::Summarize => format!("[SUMMARY] {}", request.text),
            MockTask::Translate => format!(
                "[{}] {}",
                request.target_language.as_deref().unwrap_or("??"),
                request.text
            ),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
            fail_when: self.fail_when,
            delay: self.delay,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(Duration::from_millis(delay(&request))).await;
        }

        if let Some(predicate) = self.fail_when {
            if predicate(&request) {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: "Simulated failure for matching request".to_string(),
                });
            }
        }

        let text = || {
            self.custom_response
                .map(|generator| generator(&request))
                .unwrap_or_else(|| Self::default_response(&request))
        };

        match self.behavior {
            MockBehavior::Working => Ok(MockResponse { text: text() }),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(MockResponse { text: text() })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(MockResponse { text: String::new() }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(MockResponse { text: text() })
            }
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl SentimentClassifier for MockProvider {
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ProviderError> {
        let response = self
            .complete(MockRequest {
                task: MockTask::Classify,
                text: text.to_string(),
                target_language: None,
            })
            .await?;
        SentimentLabel::from_model_output(&Self::extract_text(&response))
    }
}

#[async_trait]
impl SummarizationModel for MockProvider {
    async fn summarize(&self, text: &str, _bounds: SummaryBounds) -> Result<String, ProviderError> {
        let response = self
            .complete(MockRequest {
                task: MockTask::Summarize,
                text: text.to_string(),
                target_language: None,
            })
            .await?;
        Ok(Self::extract_text(&response))
    }
}

#[async_trait]
impl TranslationBackend for MockProvider {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let response = self
            .complete(MockRequest {
                task: MockTask::Translate,
                text: text.to_string(),
                target_language: Some(target_language.to_string()),
            })
            .await?;
        Ok(Self::extract_text(&response))
    }
}
