//! CLI command handlers

pub mod ask;
pub mod embed;
pub mod graph;
pub mod keywords;
pub mod questions;
