//! Aggregation of parsed goroutines into dump-level statistics.
//!
//! This module turns the parser's records into:
//! - Goroutine counts by status
//! - Lock, elision, and ancestry counts
//! - Longest wait and deepest stack

pub mod metrics;

// Re-export main types and functions
pub use metrics::{summarize_dump, DumpSummary};
