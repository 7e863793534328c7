//! Calculate summary statistics over a parsed goroutine dump.
//!
//! Long waits and piles of goroutines sharing one status are usually
//! the first thing to look at in a deadlock dump.

use crate::parser::schema::Goroutine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dump-level statistics
///
/// **Public** - returned from summarize_dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpSummary {
    /// Number of top-level goroutines
    pub total: usize,

    /// Goroutine count per status label
    pub by_status: BTreeMap<String, usize>,

    /// Goroutines locked to an OS thread
    pub locked_to_thread: usize,

    /// Goroutines whose stack was truncated by the runtime
    pub with_elided_frames: usize,

    /// Goroutines carrying an ancestor chain
    pub with_ancestors: usize,

    /// Longest reported wait, in milliseconds
    pub longest_wait_millis: u64,

    /// Goroutine with the longest wait (first one on ties)
    pub longest_waiting_id: Option<u64>,

    /// Frame count of the deepest stack
    pub deepest_stack: usize,
}

/// Summarize a list of parsed goroutines
///
/// **Public** - main entry point for dump statistics
///
/// Only top-level goroutines are counted; ancestors are history,
/// not live goroutines.
pub fn summarize_dump(goroutines: &[Goroutine]) -> DumpSummary {
    debug!("Summarizing {} goroutines", goroutines.len());

    let mut summary = DumpSummary {
        total: goroutines.len(),
        ..Default::default()
    };

    for g in goroutines {
        *summary.by_status.entry(g.status.clone()).or_insert(0) += 1;

        if g.locked_to_os {
            summary.locked_to_thread += 1;
        }
        if g.frames_elided {
            summary.with_elided_frames += 1;
        }
        if g.ancestor.is_some() {
            summary.with_ancestors += 1;
        }
        if g.wait_millis > summary.longest_wait_millis {
            summary.longest_wait_millis = g.wait_millis;
            summary.longest_waiting_id = Some(g.id);
        }
        summary.deepest_stack = summary.deepest_stack.max(g.stack.len());
    }

    summary
}

impl DumpSummary {
    /// Status labels ordered by goroutine count, most common first
    ///
    /// **Public** - used by the text summary
    pub fn top_statuses(&self, n: usize) -> Vec<(&str, usize)> {
        let mut statuses: Vec<(&str, usize)> = self
            .by_status
            .iter()
            .map(|(status, count)| (status.as_str(), *count))
            .collect();
        // BTreeMap order already breaks ties alphabetically; sort is stable
        statuses.sort_by(|a, b| b.1.cmp(&a.1));
        statuses.truncate(n);
        statuses
    }

    /// Format as a one-line human readable string
    pub fn summary(&self) -> String {
        let minutes = self.longest_wait_millis / 60_000;
        format!(
            "{} goroutines, {} statuses, {} locked to thread, longest wait {} min, deepest stack {} frames",
            self.total,
            self.by_status.len(),
            self.locked_to_thread,
            minutes,
            self.deepest_stack
        )
    }
}
