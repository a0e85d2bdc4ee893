//! Document chunks and character-based chunking

use serde::{Deserialize, Serialize};

/// Default chunk size in characters (~800 tokens)
pub const CHUNK_SIZE_CHARS: usize = 3200;
/// Default overlap between consecutive chunks in characters
pub const CHUNK_OVERLAP_CHARS: usize = 480;

/// A contiguous span of a source document.
///
/// `keywords` is filled by the contextual-keyword pipeline; `questions` and
/// `idx` only by the question generator, and only for sampled chunks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<usize>,
}

impl Chunk {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Find a valid char boundary at or before the given byte index
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Find a valid char boundary at or after the given byte index
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Split a document into overlapping character chunks.
///
/// Prefers a natural break (paragraph, sentence, line, word) in the last 30%
/// of each chunk so spans do not cut mid-sentence.
pub fn chunk_by_chars(content: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    if content.len() <= chunk_size {
        return vec![Chunk::new(content)];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < content.len() {
        let raw_end = (start + chunk_size).min(content.len());
        let end = floor_char_boundary(content, raw_end);
        let mut chunk_end = end;

        if end < content.len() {
            let search_start_raw = start + (chunk_size * 70 / 100);
            let search_start = ceil_char_boundary(content, search_start_raw);

            if search_start < end {
                let search_region = &content[search_start..end];

                if let Some(pos) = search_region.rfind("\n\n") {
                    chunk_end = search_start + pos + 2;
                } else if let Some(pos) = search_region.rfind(". ") {
                    chunk_end = search_start + pos + 2;
                } else if let Some(pos) = search_region.rfind('\n') {
                    chunk_end = search_start + pos + 1;
                } else if let Some(pos) = search_region.rfind(' ') {
                    chunk_end = search_start + pos + 1;
                }
            }
        }

        chunk_end = floor_char_boundary(content, chunk_end);

        chunks.push(Chunk::new(&content[start..chunk_end]));

        if chunk_end >= content.len() {
            break;
        }

        let new_start_raw = chunk_end.saturating_sub(overlap);
        start = ceil_char_boundary(content, new_start_raw);
    }

    chunks
}

/// Split a document with the default size and overlap
pub fn chunk_document(content: &str) -> Vec<Chunk> {
    chunk_by_chars(content, CHUNK_SIZE_CHARS, CHUNK_OVERLAP_CHARS)
}

/// Render chunks as one document with `### Chunk {id} ###` markers.
///
/// This is the marker format the contextual-keyword prompt describes; ids are
/// 1-based.
pub fn render_chunked(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        out.push_str(&format!("### Chunk {} ###\n", i + 1));
        out.push_str(&chunk.content);
        out.push_str("\n\n");
    }
    out
}
