//! Goroutine dump parsing and the parsed data model.
//!
//! This module handles:
//! - Tokenizing individual dump lines (headers, frames, file:line refs)
//! - Driving the line-oriented state machine over a whole dump
//! - Defining the records handed to consumers

pub mod goroutine_dump;
pub mod schema;
pub mod tokenizer;

// Re-export main types
pub use goroutine_dump::{parse, parse_with_options, ParserOptions};
pub use schema::{Frame, Goroutine, ParseResult};
