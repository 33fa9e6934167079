/*!
 * NLP capabilities used by the pipeline.
 *
 * The pipeline only sees three narrow traits:
 * - `SentimentClassifier`: POSITIVE / NEGATIVE / NEUTRAL label for a text
 * - `SummarizationModel`: bounded-length summary of a text
 * - `TranslationBackend`: translation into a target language, source auto-detected
 *
 * Implementations live on top of the provider clients (`llm`, `google`) and
 * on `MockProvider` for tests. `NlpServices::from_config` wires the configured
 * ones together.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::app_config::{NlpConfig, NlpProvider, TranslatorKind};
use crate::errors::ProviderError;
use crate::providers::anthropic::Anthropic;
use crate::providers::google::GoogleTranslate;
use crate::providers::ollama::Ollama;

pub mod google;
pub mod llm;
pub mod prompts;

pub use llm::LlmService;

/// Binary sentiment label with an explicit neutral outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a label out of a model's free-text reply.
    ///
    /// The first word that names a label wins, case-insensitively, so both
    /// `"negative"` and `"Label: NEGATIVE"` are accepted.
    pub fn from_model_output(output: &str) -> Result<Self, ProviderError> {
        output
            .split(|c: char| !c.is_alphabetic())
            .find_map(|word| match word.to_ascii_uppercase().as_str() {
                "POSITIVE" => Some(Self::Positive),
                "NEGATIVE" => Some(Self::Negative),
                "NEUTRAL" => Some(Self::Neutral),
                _ => None,
            })
            .ok_or_else(|| {
                let preview: String = output.chars().take(80).collect();
                ProviderError::ParseError(format!("No sentiment label in model output: {:?}", preview))
            })
    }

    /// Upper-case label as classifiers usually print it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length bounds for a single summary, in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub min_length: u32,
    pub max_length: u32,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 150,
        }
    }
}

/// Classifies the sentiment of a text
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ProviderError>;
}

/// Produces a deterministic summary of a text
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, ProviderError>;
}

/// Translates text into `target_language` (ISO 639-1), detecting the source
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

/// The three capabilities the pipeline needs, ready to share across tasks
#[derive(Clone)]
pub struct NlpServices {
    pub classifier: Arc<dyn SentimentClassifier>,
    pub summarizer: Arc<dyn SummarizationModel>,
    pub translator: Arc<dyn TranslationBackend>,
}

impl NlpServices {
    /// Build the configured services
    pub fn from_config(config: &NlpConfig) -> Result<Self> {
        let llm = Arc::new(Self::build_llm(config)?);

        let translator: Arc<dyn TranslationBackend> = match config.translator {
            TranslatorKind::Google => Arc::new(GoogleTranslate::new(
                config.google.endpoint.clone(),
                config.google.timeout_secs,
            )),
            TranslatorKind::Llm => llm.clone(),
        };

        Ok(Self {
            classifier: llm.clone(),
            summarizer: llm,
            translator,
        })
    }

    fn build_llm(config: &NlpConfig) -> Result<LlmService> {
        let model = config.get_model();
        let timeout_secs = config.get_timeout_secs();

        match config.provider {
            NlpProvider::Ollama => Ok(LlmService::ollama(
                Ollama::new(config.get_endpoint(), timeout_secs),
                model,
            )),
            NlpProvider::Anthropic => {
                let api_key = config.get_api_key();
                if api_key.is_empty() {
                    return Err(anyhow!("Anthropic provider selected but no API key is configured"));
                }
                Ok(LlmService::anthropic(
                    Anthropic::new(api_key, config.get_endpoint(), timeout_secs),
                    model,
                ))
            }
        }
    }
}
