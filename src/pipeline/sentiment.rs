/*!
 * Sentiment gate.
 *
 * Only the first `window_chars` characters are classified. Anything after
 * that window is never seen by the classifier, so harsh content late in a
 * long page passes the gate.
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::errors::PipelineError;
use crate::nlp::{SentimentClassifier, SentimentLabel};

/// Reason reported when the gate blocks content
pub const BLOCKED_REASON: &str = "Harsh content detected.";

/// Blocks content whose opening window classifies as NEGATIVE
#[derive(Clone)]
pub struct SentimentGate {
    classifier: Arc<dyn SentimentClassifier>,
    window_chars: usize,
}

impl SentimentGate {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, window_chars: usize) -> Self {
        Self {
            classifier,
            window_chars,
        }
    }

    /// Classify the opening window of `text`.
    ///
    /// Returns the label when the content may proceed, `ContentBlocked` on
    /// NEGATIVE and `SentimentUnavailable` when the classifier fails.
    pub async fn check(&self, text: &str) -> Result<SentimentLabel, PipelineError> {
        let window = leading_window(text, self.window_chars);
        debug!("Classifying sentiment of the first {} characters", window.chars().count());

        let label = self.classifier.classify(window).await.map_err(|e| {
            warn!("Sentiment classifier failed: {}", e);
            PipelineError::SentimentUnavailable(e.to_string())
        })?;

        match label {
            SentimentLabel::Negative => Err(PipelineError::ContentBlocked(BLOCKED_REASON.to_string())),
            other => Ok(other),
        }
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary
pub fn leading_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
