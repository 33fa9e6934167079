/*!
 * Chunked summarization with bounded fan-out.
 *
 * Each chunk is summarized independently with at most `concurrency` requests
 * in flight. Results carry their chunk index and are sorted before joining,
 * so completion order never shows in the output.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::PipelineError;
use crate::nlp::{SummarizationModel, SummaryBounds};
use crate::pipeline::chunker::{chunk_text, TextChunk};

/// Text substituted for a chunk whose summary failed
pub const SUMMARY_FAILURE_MARKER: &str = "Error: Summarization failed for this chunk.";

/// Called with `(completed, total)` after every finished chunk
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Summary of one chunk
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub chunk_index: usize,
    pub text: String,
    pub failed: bool,
}

/// Joined summary of a whole text
#[derive(Debug, Clone)]
pub struct Summary {
    /// Chunk summaries joined in chunk order
    pub text: String,
    /// Per-chunk results in chunk order
    pub chunks: Vec<SummaryResult>,
}

impl Summary {
    /// Number of chunks that fell back to the failure marker
    pub fn failed_chunks(&self) -> usize {
        self.chunks.iter().filter(|c| c.failed).count()
    }
}

/// Summarizes long text chunk by chunk
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn SummarizationModel>,
    chunk_size: usize,
    bounds: SummaryBounds,
    concurrency: usize,
    progress: Option<ProgressCallback>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn SummarizationModel>, chunk_size: usize, bounds: SummaryBounds, concurrency: usize) -> Self {
        Self {
            model,
            chunk_size,
            bounds,
            concurrency: concurrency.max(1),
            progress: None,
        }
    }

    /// Report progress through `callback`
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Chunk `text` and summarize every chunk
    pub async fn summarize(&self, text: &str) -> Result<Summary, PipelineError> {
        let chunks = chunk_text(text, self.chunk_size);
        if chunks.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        self.summarize_chunks(chunks).await
    }

    /// Summarize already-chunked text
    pub async fn summarize_chunks(&self, chunks: Vec<TextChunk>) -> Result<Summary, PipelineError> {
        let total = chunks.len();
        if total == 0 {
            return Err(PipelineError::EmptyInput);
        }
        info!("Summarizing {} chunks with up to {} concurrent requests", total, self.concurrency);

        let completed = Arc::new(AtomicUsize::new(0));

        let mut results = stream::iter(chunks)
            .map(|chunk| {
                let model = Arc::clone(&self.model);
                let bounds = self.bounds;
                let completed = Arc::clone(&completed);
                let progress = self.progress.clone();

                async move {
                    let result = match model.summarize(&chunk.content, bounds).await {
                        Ok(text) => {
                            debug!("Chunk {} summarized ({} chars)", chunk.index, text.chars().count());
                            SummaryResult {
                                chunk_index: chunk.index,
                                text,
                                failed: false,
                            }
                        }
                        Err(e) => {
                            warn!("Summarization failed for chunk {}: {}", chunk.index, e);
                            SummaryResult {
                                chunk_index: chunk.index,
                                text: SUMMARY_FAILURE_MARKER.to_string(),
                                failed: true,
                            }
                        }
                    };

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(progress) = progress {
                        progress(done, total);
                    }
                    result
                }
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|r| r.chunk_index);

        let failed = results.iter().filter(|r| r.failed).count();
        if failed == total {
            return Err(PipelineError::SummarizationPartialFailure { failed, total });
        }

        let text = results.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join(" ");
        Ok(Summary { text, chunks: results })
    }
}
