/*!
 * LLM-backed NLP service.
 *
 * One `LlmService` wraps either an Ollama or an Anthropic client and
 * implements all three capabilities with prompts from `nlp::prompts`.
 * Sampling is disabled (temperature 0) so repeated runs agree.
 */

use async_trait::async_trait;
use log::debug;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::nlp::{prompts, SentimentClassifier, SentimentLabel, SummarizationModel, SummaryBounds, TranslationBackend};
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::Provider;

/// Token cap for a sentiment reply
const SENTIMENT_MAX_TOKENS: u32 = 8;

/// Token cap for a translated window
const TRANSLATION_MAX_TOKENS: u32 = 4096;

/// Fixed seed for Ollama so outputs are reproducible
const OLLAMA_SEED: u64 = 42;

#[derive(Debug, Clone)]
enum LlmBackend {
    Ollama(Ollama),
    Anthropic(Anthropic),
}

/// NLP service on top of an LLM provider
#[derive(Debug, Clone)]
pub struct LlmService {
    backend: LlmBackend,
    model: String,
}

impl LlmService {
    /// Service backed by a local Ollama server
    pub fn ollama(client: Ollama, model: impl Into<String>) -> Self {
        Self {
            backend: LlmBackend::Ollama(client),
            model: model.into(),
        }
    }

    /// Service backed by the Anthropic API
    pub fn anthropic(client: Anthropic, model: impl Into<String>) -> Self {
        Self {
            backend: LlmBackend::Anthropic(client),
            model: model.into(),
        }
    }

    /// Model name requests are sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one deterministic system+user exchange and return the reply text
    async fn ask(&self, system: &str, prompt: String, max_tokens: u32) -> Result<String, ProviderError> {
        debug!("LLM request to {} ({} prompt chars, max {} tokens)", self.model, prompt.len(), max_tokens);

        match &self.backend {
            LlmBackend::Ollama(client) => {
                let request = GenerationRequest::new(&self.model, prompt)
                    .system(system)
                    .temperature(0.0)
                    .seed(OLLAMA_SEED)
                    .max_tokens(max_tokens);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
            LlmBackend::Anthropic(client) => {
                let request = AnthropicRequest::new(&self.model, max_tokens)
                    .system(system)
                    .temperature(0.0)
                    .add_message("user", prompt);
                let response = client.complete(request).await?;
                Ok(Anthropic::extract_text(&response))
            }
        }
    }
}

#[async_trait]
impl SentimentClassifier for LlmService {
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ProviderError> {
        let reply = self
            .ask(prompts::SENTIMENT_SYSTEM, prompts::sentiment_prompt(text), SENTIMENT_MAX_TOKENS)
            .await?;
        SentimentLabel::from_model_output(&reply)
    }
}

#[async_trait]
impl SummarizationModel for LlmService {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, ProviderError> {
        let summary = self
            .ask(prompts::SUMMARY_SYSTEM, prompts::summary_prompt(text, bounds), bounds.max_length)
            .await?;

        if summary.is_empty() {
            return Err(ProviderError::ParseError("Model returned an empty summary".to_string()));
        }
        Ok(summary)
    }
}

#[async_trait]
impl TranslationBackend for LlmService {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let language_name =
            language_utils::get_language_name(target_language).unwrap_or_else(|_| target_language.to_string());
        let translation = self
            .ask(&prompts::translation_system(&language_name), text.to_string(), TRANSLATION_MAX_TOKENS)
            .await?;

        if translation.is_empty() {
            return Err(ProviderError::ParseError("Model returned an empty translation".to_string()));
        }
        Ok(translation)
    }
}
