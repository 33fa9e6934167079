/*!
 * Sentence-aligned chunking.
 *
 * Text is split into sentences at `.`, `!` or `?` followed by whitespace and
 * the sentences are packed greedily into chunks of at most `chunk_size`
 * characters. A single sentence longer than `chunk_size` becomes its own
 * chunk and is never cut.
 */

/// A contiguous, sentence-aligned slice of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Position of the chunk in the source
    pub index: usize,
    /// Chunk text
    pub content: String,
}

/// Split `text` into sentences with normalized whitespace.
///
/// Terminal punctuation stays with its sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in normalized.chars() {
        if c == ' ' && current.ends_with(['.', '!', '?']) {
            sentences.push(std::mem::take(&mut current));
            continue;
        }
        current.push(c);
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

/// Greedily pack the sentences of `text` into chunks.
///
/// Sentences inside a chunk are joined with a single space, and joining all
/// chunks with a single space gives back the whitespace-normalized input.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<TextChunk> {
    let mut contents: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();

        if current.is_empty() {
            current = sentence;
            current_chars = sentence_chars;
        } else if current_chars + 1 + sentence_chars <= chunk_size {
            current.push(' ');
            current.push_str(&sentence);
            current_chars += 1 + sentence_chars;
        } else {
            contents.push(std::mem::replace(&mut current, sentence));
            current_chars = sentence_chars;
        }
    }
    if !current.is_empty() {
        contents.push(current);
    }

    contents
        .into_iter()
        .enumerate()
        .map(|(index, content)| TextChunk { index, content })
        .collect()
}
