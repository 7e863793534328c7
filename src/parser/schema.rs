//! Data model for parsed goroutine dumps.
//!
//! These types are what the parser hands to consumers and what we
//! serialize into JSON reports.

use crate::utils::error::DumpError;
use serde::{Deserialize, Serialize};

/// One call-stack entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Fully qualified function or method name
    pub function: String,

    /// Source file path (empty until the file:line line is parsed)
    pub file: String,

    /// 1-based source line, 0 when unset
    pub line: u32,
}

impl Frame {
    /// Create a frame holding only a function name
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            ..Default::default()
        }
    }

    /// True for the zero sentinel used when no creator was printed
    pub fn is_unset(&self) -> bool {
        self.function.is_empty() && self.file.is_empty() && self.line == 0
    }
}

/// One goroutine captured in a dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goroutine {
    /// Goroutine id from the header line
    pub id: u64,

    /// Status label copied verbatim from the header, e.g. "chan receive"
    pub status: String,

    /// Time spent blocked, from the "N minutes" annotation
    pub wait_millis: u64,

    /// Header carried ", locked to thread"
    pub locked_to_os: bool,

    /// Call stack, innermost frame first
    pub stack: Vec<Frame>,

    /// The runtime omitted frames from the middle of the stack
    pub frames_elided: bool,

    /// Call site that spawned this goroutine; zero sentinel when absent
    pub creator: Frame,

    /// Goroutine this one originated from (tracebackancestors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor: Option<Box<Goroutine>>,
}

impl Goroutine {
    /// Create an empty goroutine shell with the given id and status
    pub fn new(id: u64, status: impl Into<String>) -> Self {
        Self {
            id,
            status: status.into(),
            ..Default::default()
        }
    }

    /// Whether the dump printed a "created by" section for this goroutine
    pub fn has_creator(&self) -> bool {
        !self.creator.is_unset()
    }

    /// Walk the ancestor chain, nearest ancestor first
    pub fn ancestors(&self) -> impl Iterator<Item = &Goroutine> {
        std::iter::successors(self.ancestor.as_deref(), |g| g.ancestor.as_deref())
    }

    /// Number of ancestors linked below this goroutine
    pub fn ancestor_depth(&self) -> usize {
        self.ancestors().count()
    }
}

/// Output of a single parse call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Fully parsed goroutines, in input order
    pub goroutines: Vec<Goroutine>,

    /// Recoverable errors, in input order
    pub errors: Vec<DumpError>,
}

impl ParseResult {
    /// Nothing recognized and nothing rejected
    pub fn is_empty(&self) -> bool {
        self.goroutines.is_empty() && self.errors.is_empty()
    }

    /// No line was rejected
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// False only when errors occurred and nothing was recovered,
    /// i.e. the text does not look like a goroutine dump at all
    pub fn is_recognized_dump(&self) -> bool {
        !self.goroutines.is_empty() || self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Goroutine>, Vec<DumpError>) {
        (self.goroutines, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_creator_is_unset() {
        let g = Goroutine::new(1, "running");
        assert!(g.creator.is_unset());
        assert!(!g.has_creator());
    }

    #[test]
    fn test_ancestors_walk_terminates() {
        let mut root = Goroutine::new(1, "running");
        let mut parent = Goroutine::new(2, "");
        parent.ancestor = Some(Box::new(Goroutine::new(3, "")));
        root.ancestor = Some(Box::new(parent));

        let ids: Vec<u64> = root.ancestors().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(root.ancestor_depth(), 2);
    }

    #[test]
    fn test_recognized_dump_policy() {
        let mut result = ParseResult::default();
        assert!(result.is_recognized_dump());

        result.errors.push(DumpError::new(
            crate::utils::error::DumpErrorKind::InvalidHeader,
            1,
            "goroutine x",
        ));
        assert!(!result.is_recognized_dump());

        result.goroutines.push(Goroutine::new(1, "running"));
        assert!(result.is_recognized_dump());
        assert!(!result.is_clean());
    }
}
