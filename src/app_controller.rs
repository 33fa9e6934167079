use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::sync::Arc;

use crate::app_config::Config;
use crate::language_utils;
use crate::pipeline::summarizer::Summary;
use crate::pipeline::{Pipeline, ProcessedReport};

// @module: Application controller for URL processing

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Pipeline built from the configuration
    pipeline: Pipeline,
}

impl Controller {
    // @method: Create a controller whose pipeline talks to the configured services
    pub fn with_config(config: Config) -> Result<Self> {
        let pipeline = Pipeline::from_config(&config)?;
        Ok(Self { config, pipeline })
    }

    /// Create a controller around an already assembled pipeline
    pub fn with_pipeline(config: Config, pipeline: Pipeline) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one URL, showing summarization progress
    pub async fn process_url(&self, url: &str, language_option: &str, want_summary: bool) -> Result<ProcessedReport> {
        let target = self.config.languages.resolve(language_option);
        if !self.config.languages.entries.contains_key(language_option.trim()) {
            warn!(
                "Unknown language option '{}', falling back to '{}'",
                language_option, self.config.languages.fallback_language
            );
        }
        info!("Processing {} -> {}", url, language_utils::display_language(target));

        let progress_bar = want_summary.then(create_progress_bar);
        let pipeline = match &progress_bar {
            Some(bar) => {
                let bar = bar.clone();
                self.pipeline.clone().with_progress(Arc::new(move |done, total| {
                    bar.set_length(total as u64);
                    bar.set_position(done as u64);
                }))
            }
            None => self.pipeline.clone(),
        };

        let result = pipeline.process(url, language_option, want_summary).await;
        if let Some(bar) = progress_bar {
            bar.finish_and_clear();
        }

        let processed = result.with_context(|| format!("Failed to process {}", url))?;
        if processed.report.failed_summary_chunks > 0 || processed.report.failed_translation_windows > 0 {
            warn!(
                "Report contains failure markers ({} summary chunks, {} translation windows)",
                processed.report.failed_summary_chunks, processed.report.failed_translation_windows
            );
        }
        Ok(processed)
    }

    /// Summarize text without fetching or gating it
    pub async fn summarize_text(&self, text: &str) -> Result<Summary> {
        let progress_bar = create_progress_bar();
        let bar = progress_bar.clone();
        let pipeline = self.pipeline.clone().with_progress(Arc::new(move |done, total| {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        }));

        let result = pipeline.summarize_text(text).await;
        progress_bar.finish_and_clear();
        Ok(result?)
    }

    /// Lines describing the language menu, in option order
    pub fn language_menu_lines(&self) -> Vec<String> {
        self.config.languages.describe()
    }
}

fn create_progress_bar() -> ProgressBar {
    let progress_bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%)"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));
    progress_bar.set_message("summarizing");
    progress_bar
}
