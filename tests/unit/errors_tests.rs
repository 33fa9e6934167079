/*!
 * Tests for error types and conversions
 */

use weblingo::errors::{AppError, PipelineError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_authenticationError_shouldDisplayCorrectly() {
    let error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_pipelineError_contentBlocked_shouldDisplayReasonOnly() {
    let error = PipelineError::ContentBlocked("Harsh content detected.".to_string());
    assert_eq!(error.to_string(), "Harsh content detected.");
    assert_eq!(error.kind(), "ContentBlocked");
}

#[test]
fn test_pipelineError_fetchFailed_shouldPrefixMessage() {
    let error = PipelineError::FetchFailed("HTTP status 404".to_string());
    assert_eq!(error.to_string(), "Error fetching text: HTTP status 404");
    assert_eq!(error.kind(), "FetchFailed");
}

#[test]
fn test_pipelineError_contentTooShort_shouldNameBothLengths() {
    let error = PipelineError::ContentTooShort { length: 12, minimum: 50 };
    let display = error.to_string();
    assert!(display.contains("12"));
    assert!(display.contains("50"));
}

#[test]
fn test_pipelineError_emptyInput_shouldUseFixedMessage() {
    assert_eq!(
        PipelineError::EmptyInput.to_string(),
        "Error: No text provided for summarization."
    );
}

#[test]
fn test_pipelineError_partialFailures_shouldReportCounts() {
    let summary = PipelineError::SummarizationPartialFailure { failed: 3, total: 3 };
    assert!(summary.to_string().contains("3"));
    assert_eq!(summary.kind(), "SummarizationPartialFailure");

    let translation = PipelineError::TranslationPartialFailure { failed: 2, total: 2 };
    assert_eq!(translation.kind(), "TranslationPartialFailure");
}

#[test]
fn test_appError_fromPipelineError_shouldWrapCorrectly() {
    let app_error: AppError = PipelineError::RenderFailed("disk full".to_string()).into();
    match app_error {
        AppError::Pipeline(PipelineError::RenderFailed(message)) => assert_eq!(message, "disk full"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}
