/*!
 * Pipeline orchestration.
 *
 * `Pipeline::process` walks one request through the stages
 * `Start → Extracted → SentimentChecked → (Summarized) → Translated → Rendered → Done`
 * and stops in `Error` on the first unrecoverable failure. Every transition is
 * logged and the trail is returned with the report.
 */

use anyhow::{Context, Result};
use log::{error, info};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::app_config::{Config, PipelineConfig};
use crate::errors::PipelineError;
use crate::language_utils::{self, LanguageMenu};
use crate::nlp::{NlpServices, SummaryBounds};
use crate::pipeline::extractor::{Extractor, HttpFetcher, PageFetcher};
use crate::pipeline::renderer::{DocumentRenderer, MarkdownRenderer, ReportSection};
use crate::pipeline::sentiment::SentimentGate;
use crate::pipeline::summarizer::{ProgressCallback, Summarizer, Summary};
use crate::pipeline::translator::Translator;

/// States a request moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Extracted,
    SentimentChecked,
    Summarized,
    Translated,
    Rendered,
    Done,
    Error,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "Start",
            Self::Extracted => "Extracted",
            Self::SentimentChecked => "SentimentChecked",
            Self::Summarized => "Summarized",
            Self::Translated => "Translated",
            Self::Rendered => "Rendered",
            Self::Done => "Done",
            Self::Error => "Error",
        };
        f.write_str(name)
    }
}

/// Texts produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    /// Extracted page text
    pub original: String,
    /// Summary, when one was requested
    pub summarized: Option<String>,
    /// Translation of the summary, or of the original without one
    pub translated: String,
    /// ISO 639-1 code the text was translated into
    pub target_language: String,
    /// Chunks replaced by the summarization failure marker
    pub failed_summary_chunks: usize,
    /// Windows replaced by the translation failure marker
    pub failed_translation_windows: usize,
}

/// Result of a successful `process` call
#[derive(Debug, Clone)]
pub struct ProcessedReport {
    pub report: ProcessingReport,
    /// Rendered document
    pub report_path: PathBuf,
    pub report_id: String,
    /// Stages traversed, `Start` through `Done`
    pub stages: Vec<PipelineStage>,
}

/// Ordered record of stage transitions
#[derive(Debug, Default)]
struct StageTrail {
    stages: Vec<PipelineStage>,
}

impl StageTrail {
    fn enter(&mut self, stage: PipelineStage) {
        match self.stages.last() {
            Some(previous) => info!("Pipeline stage: {} -> {}", previous, stage),
            None => info!("Pipeline stage: {}", stage),
        }
        self.stages.push(stage);
    }
}

/// URL-to-report pipeline
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    languages: LanguageMenu,
    extractor: Extractor,
    gate: SentimentGate,
    summarizer: Summarizer,
    translator: Translator,
    renderer: Arc<dyn DocumentRenderer>,
}

impl Pipeline {
    /// Assemble a pipeline from explicit collaborators
    pub fn new(
        config: PipelineConfig,
        languages: LanguageMenu,
        fetcher: Arc<dyn PageFetcher>,
        services: NlpServices,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        let bounds = SummaryBounds {
            min_length: config.summary_min_length,
            max_length: config.summary_max_length,
        };

        Self {
            extractor: Extractor::new(fetcher, config.max_paragraphs, config.min_text_chars),
            gate: SentimentGate::new(services.classifier, config.sentiment_window_chars),
            summarizer: Summarizer::new(services.summarizer, config.chunk_size, bounds, config.summary_concurrency),
            translator: Translator::new(
                services.translator,
                config.translation_window_chars,
                config.translation_concurrency,
            ),
            renderer,
            languages,
            config,
        }
    }

    /// Build the HTTP-backed pipeline described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.pipeline).context("Failed to create page fetcher")?;
        let services = NlpServices::from_config(&config.nlp).context("Failed to create NLP services")?;
        let renderer = MarkdownRenderer::new(
            config.pipeline.output_dir.clone(),
            config.pipeline.report_slot,
            config.pipeline.preview_chars,
        );

        Ok(Self::new(
            config.pipeline.clone(),
            config.languages.clone(),
            Arc::new(fetcher),
            services,
            Arc::new(renderer),
        ))
    }

    /// Report summarization progress through `callback`
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.summarizer = self.summarizer.with_progress(callback);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn languages(&self) -> &LanguageMenu {
        &self.languages
    }

    /// Process `url` into a rendered report.
    ///
    /// `language_option` is a key of the language menu; unknown keys use the
    /// menu's fallback language. The summary, when requested, is what gets
    /// translated.
    pub async fn process(
        &self,
        url: &str,
        language_option: &str,
        want_summary: bool,
    ) -> Result<ProcessedReport, PipelineError> {
        let mut trail = StageTrail::default();
        trail.enter(PipelineStage::Start);

        match self.run(&mut trail, url, language_option, want_summary).await {
            Ok((report, report_path, report_id)) => {
                trail.enter(PipelineStage::Done);
                Ok(ProcessedReport {
                    report,
                    report_path,
                    report_id,
                    stages: trail.stages,
                })
            }
            Err(e) => {
                trail.enter(PipelineStage::Error);
                error!("Processing {} failed ({}): {}", url, e.kind(), e);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        trail: &mut StageTrail,
        url: &str,
        language_option: &str,
        want_summary: bool,
    ) -> Result<(ProcessingReport, PathBuf, String), PipelineError> {
        let document = self.extractor.extract(url).await?;
        trail.enter(PipelineStage::Extracted);

        let label = self.gate.check(&document.raw_text).await?;
        info!("Sentiment: {}", label);
        trail.enter(PipelineStage::SentimentChecked);

        let summary = if want_summary {
            let summary = self.summarizer.summarize(&document.raw_text).await?;
            trail.enter(PipelineStage::Summarized);
            Some(summary)
        } else {
            None
        };

        let target_language = self.languages.resolve(language_option).to_string();
        let source_text = summary.as_ref().map_or(document.raw_text.as_str(), |s| s.text.as_str());
        let translation = self.translator.translate(source_text, &target_language).await?;
        trail.enter(PipelineStage::Translated);

        let report = ProcessingReport {
            failed_summary_chunks: summary.as_ref().map_or(0, Summary::failed_chunks),
            failed_translation_windows: translation.failed_windows(),
            summarized: summary.map(|s| s.text),
            translated: translation.text,
            original: document.raw_text,
            target_language,
        };

        let report_id = Uuid::new_v4().to_string();
        let report_path = self.renderer.render(&report_id, &report_sections(&report))?;
        trail.enter(PipelineStage::Rendered);

        Ok((report, report_path, report_id))
    }

    /// Summarize arbitrary text without fetching or gating it
    pub async fn summarize_text(&self, text: &str) -> Result<Summary, PipelineError> {
        self.summarizer.summarize(text).await
    }
}

/// Sections of the rendered report, in display order
pub fn report_sections(report: &ProcessingReport) -> Vec<ReportSection> {
    let language_name = language_utils::get_language_name(&report.target_language)
        .unwrap_or_else(|_| report.target_language.clone());

    let mut sections = vec![ReportSection::new("Original Content", report.original.clone())];
    if let Some(summary) = &report.summarized {
        sections.push(ReportSection::new("Summarized Content", summary.clone()));
    }
    sections.push(ReportSection::new(
        format!("Translated Content ({})", language_name),
        report.translated.clone(),
    ));
    sections
}
