/*!
 * Report rendering.
 *
 * Reports are Markdown documents with a fixed title and one section per
 * pipeline output. Section bodies are previews truncated to a configured
 * number of characters.
 */

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::ReportSlot;
use crate::errors::PipelineError;

/// Title of every report
pub const REPORT_TITLE: &str = "Translated Content Report";

/// File name used by the shared report slot
pub const SHARED_REPORT_FILE: &str = "translated_output.md";

/// Labelled block of report text
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub body: String,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Writes report sections to a document and returns its location
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, report_id: &str, sections: &[ReportSection]) -> Result<PathBuf, PipelineError>;
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Renders reports as Markdown files
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    output_dir: PathBuf,
    slot: ReportSlot,
    preview_chars: usize,
}

impl MarkdownRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, slot: ReportSlot, preview_chars: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            slot,
            preview_chars,
        }
    }

    /// Directory reports are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a report with `report_id` is written to
    pub fn report_path(&self, report_id: &str) -> PathBuf {
        match self.slot {
            ReportSlot::PerRequest => self.output_dir.join(format!("report-{}.md", report_id)),
            ReportSlot::Shared => self.output_dir.join(SHARED_REPORT_FILE),
        }
    }

    /// Markdown text of a report
    pub fn to_markdown(&self, sections: &[ReportSection]) -> String {
        let mut document = format!("# {}\n", REPORT_TITLE);
        for section in sections.iter().filter(|s| !s.body.is_empty()) {
            document.push_str(&format!(
                "\n## {}\n\n{}\n",
                section.title,
                preview(&section.body, self.preview_chars)
            ));
        }
        document
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, report_id: &str, sections: &[ReportSection]) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            PipelineError::RenderFailed(format!(
                "cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let path = self.report_path(report_id);
        fs::write(&path, self.to_markdown(sections))
            .map_err(|e| PipelineError::RenderFailed(format!("cannot write {}: {}", path.display(), e)))?;

        info!("Report written to {}", path.display());
        Ok(path)
    }
}
