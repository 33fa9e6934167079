/*!
 * Provider implementations for the remote NLP services.
 *
 * This module contains client implementations for:
 * - Ollama: Local LLM server
 * - Anthropic: Anthropic API integration
 * - Google: Google Translate public endpoint
 * - Mock: Deterministic in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the NLP services.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

/// Read an error body and turn a non-success status into a `ProviderError`
pub(crate) async fn error_from_response(service: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", service, status, message);

    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        code => ProviderError::ApiError {
            status_code: code,
            message,
        },
    }
}

pub mod anthropic;
pub mod google;
pub mod mock;
pub mod ollama;
