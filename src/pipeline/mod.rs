/*!
 * The URL-to-report pipeline.
 *
 * Stages, in order:
 * - `extractor`: fetch a page and collect its paragraph text
 * - `sentiment`: block content whose opening classifies as NEGATIVE
 * - `chunker`: split text into sentence-aligned chunks
 * - `summarizer`: summarize chunks concurrently, join in order
 * - `translator`: translate fixed-size windows into the target language
 * - `renderer`: write the Markdown report
 * - `orchestrator`: run the stages for one request
 */

pub mod chunker;
pub mod extractor;
pub mod orchestrator;
pub mod renderer;
pub mod sentiment;
pub mod summarizer;
pub mod translator;

pub use chunker::{chunk_text, TextChunk};
pub use extractor::{extract_paragraph_text, Extractor, FetchedPage, HttpFetcher, PageFetcher, SourceDocument};
pub use orchestrator::{Pipeline, PipelineStage, ProcessedReport, ProcessingReport};
pub use renderer::{DocumentRenderer, MarkdownRenderer, ReportSection};
pub use sentiment::SentimentGate;
pub use summarizer::{Summarizer, Summary, SummaryResult};
pub use translator::{split_windows, Translation, TranslationResult, Translator};
