/*!
 * Tests for paragraph extraction and the extractor stage
 */

use std::sync::Arc;

use weblingo::errors::PipelineError;
use weblingo::pipeline::{extract_paragraph_text, Extractor};

use crate::common::{StubFetcher, ARTICLE_HTML, ARTICLE_TEXT};

const URL: &str = "https://example.org/ferris";

#[test]
fn test_extract_paragraph_text_withArticle_shouldCleanAndJoin() {
    assert_eq!(extract_paragraph_text(ARTICLE_HTML, 50), ARTICLE_TEXT);
}

#[test]
fn test_extract_paragraph_text_shouldCountEmptyParagraphsTowardsLimit() {
    // The limit applies to <p> elements before empty ones are dropped
    let html = "<p>[1]</p><p>kept</p><p>dropped</p>";
    assert_eq!(extract_paragraph_text(html, 2), "kept");
}

#[test]
fn test_extract_paragraph_text_shouldKeepNonNumericBrackets() {
    let html = "<p>See [citation needed] and [a1] but not [42].</p>";
    assert_eq!(extract_paragraph_text(html, 50), "See [citation needed] and [a1] but not .");
}

#[tokio::test]
async fn test_extract_withServedPage_shouldReturnSourceDocument() {
    let fetcher = StubFetcher::new().with_page(URL, ARTICLE_HTML);
    let extractor = Extractor::new(Arc::new(fetcher.clone()), 50, 50);

    let document = extractor.extract(URL).await.unwrap();
    assert_eq!(document.url, URL);
    assert_eq!(document.raw_text, ARTICLE_TEXT);
    assert_eq!(fetcher.fetched(), vec![URL.to_string()]);
}

#[tokio::test]
async fn test_extract_withOfflineFetcher_shouldFailFetch() {
    let extractor = Extractor::new(Arc::new(StubFetcher::offline()), 50, 50);
    match extractor.extract(URL).await {
        Err(PipelineError::FetchFailed(message)) => assert!(message.contains("cannot reach")),
        other => panic!("expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_extract_withServerError_shouldFailFetch() {
    let fetcher = StubFetcher::new().with_response(URL, 503, ARTICLE_HTML);
    let extractor = Extractor::new(Arc::new(fetcher), 50, 50);
    assert!(matches!(extractor.extract(URL).await, Err(PipelineError::FetchFailed(_))));
}

#[tokio::test]
async fn test_extract_atExactMinimum_shouldSucceed() {
    let body = format!("<p>{}</p>", "a".repeat(50));
    let fetcher = StubFetcher::new().with_page(URL, &body);
    let extractor = Extractor::new(Arc::new(fetcher), 50, 50);
    assert_eq!(extractor.extract(URL).await.unwrap().raw_text.len(), 50);
}

#[tokio::test]
async fn test_extract_belowMinimumInCharacters_shouldFailTooShort() {
    // 30 multi-byte characters are more than 50 bytes but fewer than 50 characters
    let body = format!("<p>{}</p>", "é".repeat(30));
    let fetcher = StubFetcher::new().with_page(URL, &body);
    let extractor = Extractor::new(Arc::new(fetcher), 50, 50);
    assert!(matches!(
        extractor.extract(URL).await,
        Err(PipelineError::ContentTooShort { length: 30, minimum: 50 })
    ));
}
