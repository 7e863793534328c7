//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a line the dump parser could not accept.
///
/// The display text is the fixed description reported to users.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpErrorKind {
    #[error("invalid goroutine header")]
    InvalidHeader,

    #[error("invalid ancestor ID")]
    InvalidAncestorId,

    #[error("invalid function call")]
    InvalidFunctionCall,

    #[error("invalid file:line ref")]
    InvalidFileLine,

    #[error("ancestor chain too deep")]
    AncestorChainTooDeep,
}

/// A recoverable parse failure.
///
/// Only the goroutine being parsed is discarded; parsing resumes
/// at the next header.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} on line {line_number}: {line}")]
pub struct DumpError {
    /// What the parser expected to find
    pub kind: DumpErrorKind,

    /// 1-based line number in the original input
    pub line_number: usize,

    /// The offending line, verbatim
    pub line: String,
}

impl DumpError {
    pub fn new(kind: DumpErrorKind, line_number: usize, line: impl Into<String>) -> Self {
        Self {
            kind,
            line_number,
            line: line.into(),
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    DeserializationFailed(serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
