/*!
 * Common test utilities for the weblingo test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use weblingo::app_config::PipelineConfig;
use weblingo::language_utils::LanguageMenu;
use weblingo::nlp::NlpServices;
use weblingo::pipeline::{MarkdownRenderer, Pipeline};
use weblingo::providers::mock::MockProvider;

// Re-export the stub fetcher module
pub mod mock_fetcher;

pub use mock_fetcher::StubFetcher;

/// Article with enough text to pass the length check and two sentences per paragraph
pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Ferris</title></head>
<body>
  <nav><p>[1]</p></nav>
  <p>Ferris is the unofficial mascot of the Rust language[1]. It is a friendly crab.</p>
  <p>The community   loves Ferris[2][3]. Stickers of Ferris appear at many conferences!</p>
  <p></p>
  <div>Sidebar text is not a paragraph.</div>
</body>
</html>"#;

/// Paragraph text `ARTICLE_HTML` should reduce to
pub const ARTICLE_TEXT: &str = "Ferris is the unofficial mascot of the Rust language. It is a friendly crab. \
The community loves Ferris. Stickers of Ferris appear at many conferences!";

/// Route `log` output through the test harness; `RUST_LOG=debug` shows stage transitions
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Pipeline settings that write reports into `output_dir`
pub fn test_pipeline_config(output_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        output_dir: output_dir.to_path_buf(),
        ..PipelineConfig::default()
    }
}

/// Route every capability to the same mock so calls can be counted per task
pub fn mock_services(mock: &MockProvider) -> NlpServices {
    NlpServices {
        classifier: Arc::new(mock.clone()),
        summarizer: Arc::new(mock.clone()),
        translator: Arc::new(mock.clone()),
    }
}

/// Pipeline over a stub fetcher and a mock provider
pub fn build_pipeline(config: PipelineConfig, fetcher: StubFetcher, mock: &MockProvider) -> Pipeline {
    let renderer = MarkdownRenderer::new(config.output_dir.clone(), config.report_slot, config.preview_chars);
    Pipeline::new(
        config,
        LanguageMenu::default(),
        Arc::new(fetcher),
        mock_services(mock),
        Arc::new(renderer),
    )
}
