/*!
 * Tests for windowed translation
 */

use std::sync::Arc;

use weblingo::errors::PipelineError;
use weblingo::pipeline::translator::failure_marker;
use weblingo::pipeline::{split_windows, Translator};
use weblingo::providers::mock::{MockProvider, MockRequest, MockTask};

#[test]
fn test_split_windows_withDefaultSize_shouldCutAt3000Chars() {
    let text = "a".repeat(7000);
    let windows = split_windows(&text, 3000);
    let sizes: Vec<usize> = windows.iter().map(|w| w.chars().count()).collect();
    assert_eq!(sizes, vec![3000, 3000, 1000]);
    assert_eq!(windows.concat(), text);
}

#[test]
fn test_split_windows_withMultibyteText_shouldConcatenateBack() {
    let text = "தமிழ் மொழி ".repeat(20);
    let windows = split_windows(&text, 7);
    assert!(windows.iter().all(|w| !w.is_empty() && w.chars().count() <= 7));
    assert_eq!(windows.concat(), text);
}

#[test]
fn test_failure_marker_withShortWindow_shouldQuoteWholeWindow() {
    assert_eq!(failure_marker("abc"), "Error translating chunk: abc...");
}

#[tokio::test]
async fn test_translate_sequential_shouldSendWindowsInOrder() {
    let mock = MockProvider::working();
    let translator = Translator::new(Arc::new(mock.clone()), 4, 1);

    let translation = translator.translate("1111222233", "ml").await.unwrap();

    assert_eq!(translation.text, "[ml] 1111 [ml] 2222 [ml] 33");
    assert_eq!(translation.target_language, "ml");
    let sent: Vec<String> = mock.requests().into_iter().map(|r| r.text).collect();
    assert_eq!(sent, vec!["1111", "2222", "33"]);
    assert!(mock
        .requests()
        .iter()
        .all(|r| r.task == MockTask::Translate && r.target_language.as_deref() == Some("ml")));
}

#[tokio::test]
async fn test_translate_concurrentWithReversedDelays_shouldKeepOrder() {
    fn delay(request: &MockRequest) -> u64 {
        match request.text.chars().next() {
            Some('a') => 90,
            Some('b') => 45,
            _ => 1,
        }
    }
    let mock = MockProvider::working().with_delay(delay);
    let translator = Translator::new(Arc::new(mock), 2, 3);

    let translation = translator.translate("aabbcc", "gu").await.unwrap();
    assert_eq!(translation.text, "[gu] aa [gu] bb [gu] cc");
    let indices: Vec<usize> = translation.windows.iter().map(|w| w.chunk_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_translate_withFailingWindow_shouldQuoteFirstFiftyChars() {
    let mock = MockProvider::working().with_failure_when(|req| req.text.starts_with('x'));
    let translator = Translator::new(Arc::new(mock), 60, 1);
    let text = format!("{}{}", "x".repeat(60), "y".repeat(10));

    let translation = translator.translate(&text, "pa").await.unwrap();
    assert_eq!(
        translation.text,
        format!("Error translating chunk: {}... [pa] {}", "x".repeat(50), "y".repeat(10))
    );
    assert!(translation.windows[0].failed);
    assert!(!translation.windows[1].failed);
}

#[tokio::test]
async fn test_translate_withEveryWindowFailing_shouldReturnPartialFailure() {
    let translator = Translator::new(Arc::new(MockProvider::failing()), 3, 2);
    assert!(matches!(
        translator.translate("abcdefg", "ur").await,
        Err(PipelineError::TranslationPartialFailure { failed: 3, total: 3 })
    ));
}
