/*!
 * Google Translate client.
 *
 * Talks to the public `translate_a/single` endpoint with `client=gtx`, the same
 * endpoint browser widgets use. The source language is always auto-detected.
 */

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{error_from_response, Provider};

/// Google Translate client
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint base URL
    endpoint: String,
}

/// Translation request
#[derive(Debug, Clone)]
pub struct GoogleTranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, `auto` for detection
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl GoogleTranslateRequest {
    /// Create a request with auto-detected source language
    pub fn auto(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: "auto".to_string(),
            target_language: target_language.into(),
        }
    }
}

/// Translation response
#[derive(Debug, Clone)]
pub struct GoogleTranslateResponse {
    /// Translated text
    pub translated_text: String,
    /// Source language reported by the service
    pub detected_source_language: Option<String>,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Parse the nested-array payload returned by the endpoint.
    ///
    /// Shape: `[[["translated", "source", ...], ...], null, "detected", ...]`
    pub fn parse_response(body: &str) -> Result<GoogleTranslateResponse, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid Google Translate payload: {}", e)))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Google Translate payload has no segments".to_string()))?;

        let translated_text: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        let detected_source_language = value.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(GoogleTranslateResponse {
            translated_text,
            detected_source_language,
        })
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleTranslateRequest;
    type Response = GoogleTranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", request.text.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("Google Translate", response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Google Translate response: {}", e)))?;

        Self::parse_response(&body)
    }

    fn extract_text(response: &Self::Response) -> String {
        response.translated_text.clone()
    }
}
