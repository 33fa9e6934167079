/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use weblingo::app_config::{Config, NlpProvider, TranslatorKind};
use weblingo::app_controller::Controller;
use weblingo::providers::mock::{MockProvider, MockTask};
use weblingo::PipelineError;

use crate::common::{self, build_pipeline, StubFetcher, ARTICLE_HTML};

const URL: &str = "https://example.org/ferris";

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().nlp.provider, NlpProvider::Ollama);
    Ok(())
}

#[test]
fn test_controller_withLlmTranslator_shouldInitialize() -> Result<()> {
    let mut config = Config::default();
    config.nlp.translator = TranslatorKind::Llm;
    Controller::with_config(config)?;
    Ok(())
}

#[test]
fn test_controller_withAnthropicAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.nlp.provider = NlpProvider::Anthropic;
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_controller_languageMenu_shouldListAllOptions() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let lines = controller.language_menu_lines();
    assert_eq!(lines.len(), 13);
    assert!(lines[0].contains("ta (Tamil)"));
    Ok(())
}

#[tokio::test]
async fn test_controller_processUrl_shouldReturnRenderedReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = Config::default();
    config.pipeline.output_dir = temp_dir.path().to_path_buf();

    let mock = MockProvider::working();
    let pipeline = build_pipeline(
        config.pipeline.clone(),
        StubFetcher::new().with_page(URL, ARTICLE_HTML),
        &mock,
    );
    let controller = Controller::with_pipeline(config, pipeline);

    let processed = controller.process_url(URL, "4", true).await?;
    assert_eq!(processed.report.target_language, "or");
    assert!(processed.report_path.starts_with(temp_dir.path()));
    assert_eq!(mock.calls(MockTask::Summarize), 1);
    Ok(())
}

#[tokio::test]
async fn test_controller_processUrl_withBlockedContent_shouldKeepPipelineError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = Config::default();
    config.pipeline.output_dir = temp_dir.path().to_path_buf();

    let mock = MockProvider::working().with_custom_response(|_| "NEGATIVE".to_string());
    let pipeline = build_pipeline(
        config.pipeline.clone(),
        StubFetcher::new().with_page(URL, ARTICLE_HTML),
        &mock,
    );
    let controller = Controller::with_pipeline(config, pipeline);

    let error = controller.process_url(URL, "2", false).await.unwrap_err();
    let pipeline_error = error.downcast_ref::<PipelineError>().expect("pipeline error in chain");
    assert_eq!(pipeline_error.kind(), "ContentBlocked");
    Ok(())
}

#[tokio::test]
async fn test_controller_summarizeText_withEmptyInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::default();
    let pipeline = build_pipeline(
        common::test_pipeline_config(temp_dir.path()),
        StubFetcher::new(),
        &MockProvider::working(),
    );
    let controller = Controller::with_pipeline(config, pipeline);

    assert!(controller.summarize_text("").await.is_err());
    Ok(())
}
