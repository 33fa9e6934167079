/*!
 * Tests for sentence-aligned chunking
 */

use weblingo::pipeline::chunker::split_sentences;
use weblingo::pipeline::{chunk_text, TextChunk};

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn joined(chunks: &[TextChunk]) -> String {
    chunks.iter().map(|c| c.content.as_str()).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_chunk_text_withShortText_shouldReturnSingleChunk() {
    let chunks = chunk_text("Just one sentence. And another.", 800);
    assert_eq!(
        chunks,
        vec![TextChunk {
            index: 0,
            content: "Just one sentence. And another.".to_string()
        }]
    );
}

#[test]
fn test_chunk_text_shouldIndexChunksSequentially() {
    let text = "Alpha beta. Gamma delta. Epsilon zeta. Eta theta.";
    let chunks = chunk_text(text, 12);
    let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(indices, (0..chunks.len()).collect::<Vec<_>>());
    assert_eq!(chunks.len(), 4);
}

#[test]
fn test_chunk_text_shouldNeverExceedSizeExceptForLongSentences() {
    let text = "Short one. ".repeat(40) + &"L".repeat(120) + ". Tail sentence here.";
    let chunks = chunk_text(&text, 50);

    for chunk in &chunks {
        let length = chunk.content.chars().count();
        let single_sentence = split_sentences(&chunk.content).len() == 1;
        assert!(length <= 50 || single_sentence, "chunk {} has {} chars", chunk.index, length);
    }
    assert_eq!(joined(&chunks), normalized(&text));
}

#[test]
fn test_chunk_text_shouldCountCharactersNotBytes() {
    // Each sentence is 10 characters but 19 bytes
    let text = "ééééééééé. ééééééééé.";
    let chunks = chunk_text(text, 21);
    assert_eq!(chunks.len(), 1);
}

#[test]
fn test_chunk_text_withoutTerminalPunctuation_shouldKeepWholeText() {
    let text = "no punctuation at all just words and more words";
    let chunks = chunk_text(text, 10);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, text);
}

#[test]
fn test_split_sentences_shouldHandleMixedTerminators() {
    let sentences = split_sentences("Really?! Yes. Wow!\n\nOk");
    assert_eq!(sentences, vec!["Really?!", "Yes.", "Wow!", "Ok"]);
}
