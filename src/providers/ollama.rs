use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{error_from_response, Provider};

/// Ollama client for interacting with Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Random seed for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Fix the sampling seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).seed = Some(seed);
        self
    }

    /// Cap the number of generated tokens
    pub fn max_tokens(mut self, num_predict: u32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).num_predict = Some(num_predict);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from an endpoint such as `http://localhost:11434`
    ///
    /// Endpoints without a scheme get `http://` prepended.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", endpoint.trim_end_matches('/'))
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                // Ollama uses HTTP/1.1
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from the Ollama API
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response("Ollama", response).await);
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to get response text from Ollama API: {}", e)))?;

        parse_generation_response(&response_text)
    }
}

/// Parse a generate response, accepting both a single JSON object and the
/// line-delimited stream format some Ollama versions return despite `stream: false`
fn parse_generation_response(response_text: &str) -> Result<GenerationResponse, ProviderError> {
    match serde_json::from_str::<GenerationResponse>(response_text) {
        Ok(response) => Ok(response),
        Err(e) => {
            debug!("Ollama response is not a single object ({}), trying JSONL", e);

            let mut model = String::new();
            let mut created_at = String::new();
            let mut full_response = String::new();
            let mut done = false;
            let mut prompt_eval_count = None;
            let mut eval_count = None;
            let mut parsed_lines = 0;

            for line in response_text.lines().filter(|l| !l.trim().is_empty()) {
                let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
                    continue;
                };
                parsed_lines += 1;

                if let Some(part) = value.get("response").and_then(|v| v.as_str()) {
                    full_response.push_str(part);
                }
                if let Some(m) = value.get("model").and_then(|v| v.as_str()) {
                    model = m.to_string();
                }
                if let Some(c) = value.get("created_at").and_then(|v| v.as_str()) {
                    created_at = c.to_string();
                }
                if value.get("done").and_then(|v| v.as_bool()).unwrap_or(false) {
                    done = true;
                    prompt_eval_count = value.get("prompt_eval_count").and_then(|v| v.as_u64());
                    eval_count = value.get("eval_count").and_then(|v| v.as_u64());
                }
            }

            if parsed_lines == 0 {
                let preview: String = response_text.chars().take(500).collect();
                error!("Failed to parse Ollama API response: {}. Raw response (first 500 chars): {}", e, preview);
                return Err(ProviderError::ParseError(format!(
                    "Failed to parse Ollama API response: {}",
                    e
                )));
            }

            Ok(GenerationResponse {
                model,
                created_at,
                response: full_response,
                done,
                prompt_eval_count,
                eval_count,
            })
        }
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(request).await
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.trim().to_string()
    }
}
