//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookrag")]
#[command(
    author,
    version,
    about = "Contextual-chunk RAG pipelines over hosted LLM inference"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate contextual keywords for each chunk of a document
    Keywords(FileArgs),

    /// Generate keywords plus comprehension questions for sampled chunks
    Questions(FileArgs),

    /// Answer a question from a document's chunks
    Ask(AskArgs),

    /// Extract a character-relationship graph from a book
    Graph(FileArgs),

    /// Embed a document's chunks via the embeddings service
    Embed(EmbedArgs),

    /// Start the demo HTTP server
    Serve,
}

#[derive(Args)]
pub struct FileArgs {
    /// Path to a UTF-8 text document
    pub file: PathBuf,

    /// Chunk size in characters
    #[arg(long, default_value_t = bookrag_core::chunk::CHUNK_SIZE_CHARS)]
    pub chunk_size: usize,

    /// Overlap between chunks in characters
    #[arg(long, default_value_t = bookrag_core::chunk::CHUNK_OVERLAP_CHARS)]
    pub overlap: usize,
}

#[derive(Args)]
pub struct AskArgs {
    /// Path to a UTF-8 text document
    pub file: PathBuf,

    /// The question to answer
    pub question: String,

    /// Chunk size in characters
    #[arg(long, default_value_t = bookrag_core::chunk::CHUNK_SIZE_CHARS)]
    pub chunk_size: usize,

    /// Overlap between chunks in characters
    #[arg(long, default_value_t = bookrag_core::chunk::CHUNK_OVERLAP_CHARS)]
    pub overlap: usize,
}

#[derive(Args)]
pub struct EmbedArgs {
    /// Path to a UTF-8 text document
    pub file: PathBuf,

    /// Batch size per embeddings request
    #[arg(long, default_value = "32")]
    pub batch_size: usize,

    /// Concurrent embeddings requests
    #[arg(long, default_value = "4")]
    pub concurrency: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
