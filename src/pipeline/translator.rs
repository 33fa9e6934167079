/*!
 * Windowed translation.
 *
 * Text is cut into fixed-size character windows that are translated one by
 * one, or with ordered concurrency when `concurrency > 1`. A failed window is
 * replaced by a marker quoting its opening characters.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::errors::PipelineError;
use crate::nlp::TranslationBackend;

/// Characters of a failed window quoted in its marker
const MARKER_PREVIEW_CHARS: usize = 50;

/// Translation of one window
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub chunk_index: usize,
    pub text: String,
    pub failed: bool,
}

/// Joined translation of a whole text
#[derive(Debug, Clone)]
pub struct Translation {
    /// ISO 639-1 target code
    pub target_language: String,
    /// Window translations joined in order
    pub text: String,
    /// Per-window results in order
    pub windows: Vec<TranslationResult>,
}

impl Translation {
    /// Number of windows that fell back to the failure marker
    pub fn failed_windows(&self) -> usize {
        self.windows.iter().filter(|w| w.failed).count()
    }
}

/// Marker substituted for a window that could not be translated
pub fn failure_marker(window: &str) -> String {
    let preview: String = window.chars().take(MARKER_PREVIEW_CHARS).collect();
    format!("Error translating chunk: {}...", preview)
}

/// Cut `text` into consecutive windows of at most `max_chars` characters.
///
/// Windows are cut on char boundaries and concatenate back to `text`.
pub fn split_windows(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut windows = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let split_at = rest
            .char_indices()
            .nth(max_chars)
            .map(|(byte_index, _)| byte_index)
            .unwrap_or(rest.len());
        let (window, tail) = rest.split_at(split_at);
        windows.push(window);
        rest = tail;
    }

    windows
}

/// Translates text window by window
#[derive(Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
    window_chars: usize,
    concurrency: usize,
}

impl Translator {
    pub fn new(backend: Arc<dyn TranslationBackend>, window_chars: usize, concurrency: usize) -> Self {
        Self {
            backend,
            window_chars,
            concurrency: concurrency.max(1),
        }
    }

    /// Translate `text` into `target_language`
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<Translation, PipelineError> {
        let windows = split_windows(text, self.window_chars);
        let total = windows.len();
        if total == 0 {
            return Err(PipelineError::EmptyInput);
        }
        info!("Translating {} windows into '{}'", total, target_language);

        let results = if self.concurrency == 1 {
            let mut results = Vec::with_capacity(total);
            for (index, window) in windows.into_iter().enumerate() {
                results.push(self.translate_window(index, window, target_language).await);
            }
            results
        } else {
            // `buffered` yields in input order
            stream::iter(windows.into_iter().enumerate())
                .map(|(index, window)| self.translate_window(index, window, target_language))
                .buffered(self.concurrency)
                .collect::<Vec<_>>()
                .await
        };

        let failed = results.iter().filter(|r| r.failed).count();
        if failed == total {
            return Err(PipelineError::TranslationPartialFailure { failed, total });
        }

        let text = results.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join(" ");
        Ok(Translation {
            target_language: target_language.to_string(),
            text,
            windows: results,
        })
    }

    async fn translate_window(&self, index: usize, window: &str, target_language: &str) -> TranslationResult {
        match self.backend.translate(window, target_language).await {
            Ok(text) => {
                debug!("Window {} translated ({} chars)", index, text.chars().count());
                TranslationResult {
                    chunk_index: index,
                    text,
                    failed: false,
                }
            }
            Err(e) => {
                warn!("Translation failed for window {}: {}", index, e);
                TranslationResult {
                    chunk_index: index,
                    text: failure_marker(window),
                    failed: true,
                }
            }
        }
    }
}
