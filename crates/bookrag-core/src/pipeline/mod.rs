//! Contextual-chunk pipelines
//!
//! Drives the LLM over a chunked document and recovers structure from its
//! free-form replies: per-chunk keyword blocks, per-chunk comprehension
//! questions, and grounded answers over retrieved chunk text.

mod answer;
mod keyword_parser;
mod keywords;
mod questions;

pub use answer::answer_question;
pub use keyword_parser::parse_keyword_blocks;
pub use keywords::{apply_keywords, generate_contextual_keywords};
pub use questions::{extract_numbered_questions, generate_questions, sample_count};
