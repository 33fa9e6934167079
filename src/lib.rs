/*!
 * # weblingo - web page summarization and translation
 *
 * A Rust library that turns a URL into a translated report.
 *
 * ## Features
 *
 * - Extract paragraph text from web pages
 * - Gate content on sentiment before spending work on it
 * - Summarize long text chunk by chunk with bounded concurrency
 * - Translate into a language picked from a numbered menu:
 *   - Google Translate (default)
 *   - Any configured LLM provider
 * - Render a Markdown report with original, summarized and translated sections
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pipeline`: The processing stages and their orchestrator
 * - `nlp`: Sentiment, summarization and translation capabilities
 * - `providers`: Client implementations for the remote services:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::google`: Google Translate client
 * - `app_controller`: Main application controller
 * - `language_utils`: Language menu and ISO code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod nlp;
pub mod pipeline;
pub mod providers;

pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, PipelineError, ProviderError};
pub use language_utils::{get_language_name, LanguageMenu};
pub use pipeline::{Pipeline, PipelineStage, ProcessedReport, ProcessingReport};
