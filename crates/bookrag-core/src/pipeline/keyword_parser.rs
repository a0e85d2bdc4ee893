//! Lenient parser for keyword-block replies
//!
//! The keyword prompt asks the model to label each chunk's keywords, but the
//! reply format drifts between runs: sometimes one `ChunkN: a, b` line per
//! chunk, sometimes a decorated `### Chunk N ###` header followed by keyword
//! lines, sometimes a mix of both. The parser accepts all of these and never
//! fails; unrecognized input just yields fewer entries. Callers reconcile the
//! entry count against their chunk count.
//!
//! Line classification priority is strict: inline beats header beats
//! continuation. Transition table (EOF flushes a non-empty open section):
//!
//! | state       | Inline line  | Section header                    | Continuation       |
//! |-------------|--------------|-----------------------------------|--------------------|
//! | `Idle`      | emit entry   | open empty section                | dropped            |
//! | `InSection` | emit entry   | flush section if non-empty, reopen| append to section  |

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `Chunk1: word1, word2` — a label without `#`/`:`, then the keyword list.
    /// Only treated as inline when the line also mentions "Chunk"; a matching
    /// line without it falls through to continuation handling.
    static ref INLINE_RE: Regex =
        Regex::new(r"^\s*[^#:]+\s*:\s*(.+)$").expect("inline pattern is valid");

    /// `### Chunk 2 ###`, `**Chunk 3**`, bare `Chunk 4` — prefix match, so
    /// trailing text after the number does not disqualify a header.
    static ref HEADER_RE: Regex =
        Regex::new(r"^[#*]*\s*Chunk\s*\d+\s*[#*]*").expect("header pattern is valid");
}

/// One line of a reply, classified
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineClass {
    Blank,
    /// A complete chunk entry on a single line
    Inline(Vec<String>),
    /// A decorated marker opening a multi-line chunk block
    SectionHeader,
    /// Keyword text belonging to the open section, if any
    Continuation(Vec<String>),
}

/// Parser state: either between sections or accumulating one
#[derive(Debug)]
enum ParserState {
    Idle,
    InSection(Vec<String>),
}

/// Split a comma-separated keyword line into trimmed, non-empty tokens
fn split_tokens(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn classify(raw: &str) -> LineClass {
    let line = raw.trim();
    if line.is_empty() {
        return LineClass::Blank;
    }

    if let Some(caps) = INLINE_RE.captures(line) {
        if line.contains("Chunk") {
            return LineClass::Inline(split_tokens(&caps[1]));
        }
    }

    if HEADER_RE.is_match(line) {
        return LineClass::SectionHeader;
    }

    LineClass::Continuation(split_tokens(line))
}

/// Recover ordered keyword blocks from a free-form LLM reply.
///
/// Returns one `Vec<String>` per detected chunk entry, in reply order. The
/// number of entries is whatever the reply supports; it is not validated
/// against any expected chunk count.
pub fn parse_keyword_blocks(content: &str) -> Vec<Vec<String>> {
    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut state = ParserState::Idle;

    for raw in content.trim().split('\n') {
        match classify(raw) {
            LineClass::Blank => {}
            LineClass::Inline(tokens) => {
                // Standalone entry; an open section stays open around it
                blocks.push(tokens);
            }
            LineClass::SectionHeader => {
                if let ParserState::InSection(acc) = std::mem::replace(&mut state, ParserState::InSection(Vec::new())) {
                    if !acc.is_empty() {
                        blocks.push(acc);
                    }
                }
            }
            LineClass::Continuation(tokens) => {
                if let ParserState::InSection(ref mut acc) = state {
                    acc.extend(tokens);
                }
                // Idle: stray text before any header is dropped
            }
        }
    }

    if let ParserState::InSection(acc) = state {
        if !acc.is_empty() {
            blocks.push(acc);
        }
    }

    blocks
}
