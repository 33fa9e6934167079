/*!
 * Prompt templates for the LLM-backed capabilities.
 *
 * Every template asks for bare output so replies can be used verbatim.
 */

use crate::nlp::SummaryBounds;

/// System prompt for sentiment classification
pub const SENTIMENT_SYSTEM: &str = "You are a sentiment classifier. \
Read the text and answer with exactly one word: POSITIVE, NEGATIVE or NEUTRAL. \
Do not explain your answer.";

/// System prompt for summarization
pub const SUMMARY_SYSTEM: &str = "You are a precise summarizer. \
Summarize the text you are given in plain prose, in the same language as the text. \
Do not add facts, opinions, headings or any preamble such as \"Here is a summary\".";

/// System prompt template for translation; `{target_language}` is replaced
pub const TRANSLATION_SYSTEM: &str = "You are a professional translator. \
Detect the language of the text and translate it into {target_language}. \
Return only the translation, keeping sentence order and numbers unchanged.";

/// User prompt for a sentiment request
pub fn sentiment_prompt(text: &str) -> String {
    format!("Text:\n{}\n\nSentiment:", text)
}

/// User prompt for a summary request within `bounds`
pub fn summary_prompt(text: &str, bounds: SummaryBounds) -> String {
    format!(
        "Summarize the following text in roughly {} to {} words.\n\nText:\n{}",
        bounds.min_length, bounds.max_length, text
    )
}

/// System prompt for translating into `target_language` (a display name or code)
pub fn translation_system(target_language: &str) -> String {
    TRANSLATION_SYSTEM.replace("{target_language}", target_language)
}
