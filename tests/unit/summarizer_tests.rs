/*!
 * Tests for the chunked summarizer
 */

use std::sync::Arc;
use std::time::Instant;

use weblingo::errors::PipelineError;
use weblingo::nlp::SummaryBounds;
use weblingo::pipeline::summarizer::SUMMARY_FAILURE_MARKER;
use weblingo::pipeline::Summarizer;
use weblingo::providers::mock::{MockProvider, MockRequest, MockTask};

/// Five one-sentence chunks at chunk size 10
const FIVE_PARTS: &str = "Part 0. Part 1. Part 2. Part 3. Part 4.";

fn part_number(request: &MockRequest) -> u64 {
    request
        .text
        .chars()
        .find(|c| c.is_ascii_digit())
        .and_then(|c| c.to_digit(10))
        .map(u64::from)
        .unwrap_or(0)
}

/// Earlier parts take longer, so completion order is the reverse of chunk order
fn reversed_delay(request: &MockRequest) -> u64 {
    (5 - part_number(request)) * 30
}

fn summarizer(mock: &MockProvider, concurrency: usize) -> Summarizer {
    Summarizer::new(Arc::new(mock.clone()), 10, SummaryBounds::default(), concurrency)
}

#[tokio::test]
async fn test_summarize_withReversedCompletion_shouldKeepChunkOrder() {
    let mock = MockProvider::working().with_delay(reversed_delay);
    let summary = summarizer(&mock, 5).summarize(FIVE_PARTS).await.unwrap();

    assert_eq!(
        summary.text,
        "[SUMMARY] Part 0. [SUMMARY] Part 1. [SUMMARY] Part 2. [SUMMARY] Part 3. [SUMMARY] Part 4."
    );
    let indices: Vec<usize> = summary.chunks.iter().map(|c| c.chunk_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(mock.calls(MockTask::Summarize), 5);
}

#[tokio::test]
async fn test_summarize_withConcurrency_shouldRunChunksInParallel() {
    let mock = MockProvider::working().with_delay(|_| 100);
    let started = Instant::now();
    summarizer(&mock, 5).summarize(FIVE_PARTS).await.unwrap();

    // Sequential execution would take at least 500ms
    assert!(started.elapsed().as_millis() < 450);
}

#[tokio::test]
async fn test_summarize_withMiddleFailure_shouldKeepNeighbours() {
    let mock = MockProvider::working().with_failure_when(|req| req.text.contains('2'));
    let summary = summarizer(&mock, 3).summarize(FIVE_PARTS).await.unwrap();

    assert_eq!(summary.failed_chunks(), 1);
    assert_eq!(summary.chunks[2].text, SUMMARY_FAILURE_MARKER);
    assert!(summary.chunks[2].failed);
    assert_eq!(summary.chunks[1].text, "[SUMMARY] Part 1.");
    assert_eq!(summary.chunks[3].text, "[SUMMARY] Part 3.");
}

#[tokio::test]
async fn test_summarize_withIntermittentProvider_shouldInsertMarkersOnly() {
    let mock = MockProvider::intermittent(2);
    let summary = summarizer(&mock, 1).summarize(FIVE_PARTS).await.unwrap();

    // Requests 2 and 4 fail with concurrency 1
    assert_eq!(summary.failed_chunks(), 2);
    assert!(summary.chunks[1].failed && summary.chunks[3].failed);
}

#[tokio::test]
async fn test_summarize_withEveryChunkFailing_shouldReturnPartialFailure() {
    let result = summarizer(&MockProvider::failing(), 2).summarize(FIVE_PARTS).await;
    assert!(matches!(
        result,
        Err(PipelineError::SummarizationPartialFailure { failed: 5, total: 5 })
    ));
}

#[tokio::test]
async fn test_summarize_withWhitespaceOnly_shouldReturnEmptyInput() {
    let mock = MockProvider::working();
    let result = summarizer(&mock, 2).summarize("\n \t").await;
    assert!(matches!(result, Err(PipelineError::EmptyInput)));
    assert_eq!(mock.calls(MockTask::Summarize), 0);
}
