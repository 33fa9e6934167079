use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils::LanguageMenu;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Pipeline stage settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Target language menu
    #[serde(default)]
    pub languages: LanguageMenu,

    /// NLP service selection and provider settings
    #[serde(default)]
    pub nlp: NlpConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// LLM provider used for sentiment classification and summarization
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NlpProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: Anthropic
    Anthropic,
}

impl NlpProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

impl std::fmt::Display for NlpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for NlpProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Backend used for the translation stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorKind {
    /// Google Translate public endpoint with source auto-detection
    #[default]
    Google,
    /// The configured LLM provider
    Llm,
}

impl std::str::FromStr for TranslatorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "llm" => Ok(Self::Llm),
            _ => Err(anyhow!("Invalid translator type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: NlpProvider) -> Self {
        match provider_type {
            NlpProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            NlpProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_anthropic_timeout_secs(),
            },
        }
    }
}

/// Google Translate endpoint settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleTranslateConfig {
    /// Endpoint base URL
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GoogleTranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_google_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// NLP service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NlpConfig {
    /// LLM provider for sentiment and summarization
    #[serde(default)]
    pub provider: NlpProvider,

    /// Translation backend
    #[serde(default)]
    pub translator: TranslatorKind,

    /// Available LLM providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Google Translate settings
    #[serde(default)]
    pub google: GoogleTranslateConfig,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            provider: NlpProvider::default(),
            translator: TranslatorKind::default(),
            available_providers: vec![
                ProviderConfig::new(NlpProvider::Ollama),
                ProviderConfig::new(NlpProvider::Anthropic),
            ],
            google: GoogleTranslateConfig::default(),
        }
    }
}

/// Where rendered reports are written
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportSlot {
    /// One file per request, named by report id
    #[default]
    PerRequest,
    /// A single file that every request overwrites
    Shared,
}

/// Settings for the content-processing stages
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User agent sent when fetching pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of `<p>` elements read from a page
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,

    /// Minimum extracted text length in characters
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,

    /// Characters handed to the sentiment classifier
    #[serde(default = "default_sentiment_window_chars")]
    pub sentiment_window_chars: usize,

    /// Target chunk size for summarization, in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Minimum summary length per chunk (tokens)
    #[serde(default = "default_summary_min_length")]
    pub summary_min_length: u32,

    /// Maximum summary length per chunk (tokens)
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: u32,

    /// Maximum chunks summarized at once
    #[serde(default = "default_summary_concurrency")]
    pub summary_concurrency: usize,

    /// Translation window size in characters
    #[serde(default = "default_translation_window_chars")]
    pub translation_window_chars: usize,

    /// Maximum windows translated at once (1 = sequential)
    #[serde(default = "default_translation_concurrency")]
    pub translation_concurrency: usize,

    /// Maximum characters per report section
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Directory for rendered reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Report file naming
    #[serde(default)]
    pub report_slot: ReportSlot,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            max_paragraphs: default_max_paragraphs(),
            min_text_chars: default_min_text_chars(),
            sentiment_window_chars: default_sentiment_window_chars(),
            chunk_size: default_chunk_size(),
            summary_min_length: default_summary_min_length(),
            summary_max_length: default_summary_max_length(),
            summary_concurrency: default_summary_concurrency(),
            translation_window_chars: default_translation_window_chars(),
            translation_concurrency: default_translation_concurrency(),
            preview_chars: default_preview_chars(),
            output_dir: default_output_dir(),
            report_slot: ReportSlot::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; weblingo/1.0)".to_string()
}

fn default_max_paragraphs() -> usize {
    50
}

fn default_min_text_chars() -> usize {
    50
}

fn default_sentiment_window_chars() -> usize {
    500
}

fn default_chunk_size() -> usize {
    800
}

fn default_summary_min_length() -> u32 {
    50
}

fn default_summary_max_length() -> u32 {
    150
}

fn default_summary_concurrency() -> usize {
    4
}

fn default_translation_window_chars() -> usize {
    3000
}

fn default_translation_concurrency() -> usize {
    1
}

fn default_preview_chars() -> usize {
    2000
}

fn default_output_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("weblingo").join("reports"))
        .unwrap_or_else(|| PathBuf::from("reports"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_anthropic_timeout_secs() -> u64 {
    60
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

impl Config {
    /// Load the configuration from a JSON file, writing a default one first
    /// when the file does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.languages.validate()?;

        let pipeline = &self.pipeline;
        if pipeline.chunk_size == 0 {
            return Err(anyhow!("chunk_size must be greater than zero"));
        }
        if pipeline.translation_window_chars == 0 {
            return Err(anyhow!("translation_window_chars must be greater than zero"));
        }
        if pipeline.summary_concurrency == 0 || pipeline.translation_concurrency == 0 {
            return Err(anyhow!("concurrency settings must be at least 1"));
        }
        if pipeline.summary_min_length > pipeline.summary_max_length {
            return Err(anyhow!(
                "summary_min_length ({}) exceeds summary_max_length ({})",
                pipeline.summary_min_length,
                pipeline.summary_max_length
            ));
        }
        if pipeline.preview_chars == 0 {
            return Err(anyhow!("preview_chars must be greater than zero"));
        }

        if self.nlp.provider == NlpProvider::Anthropic && self.nlp.get_api_key().is_empty() {
            return Err(anyhow!("API key is required for Anthropic provider"));
        }

        Ok(())
    }
}

impl NlpConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &NlpProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            NlpProvider::Ollama => default_ollama_model(),
            NlpProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Ollama doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            NlpProvider::Ollama => default_ollama_endpoint(),
            NlpProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        match self.provider {
            NlpProvider::Ollama => default_timeout_secs(),
            NlpProvider::Anthropic => default_anthropic_timeout_secs(),
        }
    }

    /// Set the model of the active provider, adding an entry if needed
    pub fn set_model(&mut self, model: impl Into<String>) {
        let provider_str = self.provider.to_lowercase_string();
        let model = model.into();
        if let Some(provider_config) = self
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.model = model;
            return;
        }

        let mut provider_config = ProviderConfig::new(self.provider.clone());
        provider_config.model = model;
        self.available_providers.push(provider_config);
    }
}
