//! JSON report schema for parsed dumps.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::{summarize_dump, DumpSummary};
use crate::parser::schema::{Goroutine, ParseResult};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::DumpError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the dump was read from ("-" for stdin)
    pub source: String,

    /// Parsed goroutines, in dump order
    pub goroutines: Vec<Goroutine>,

    /// Lines the parser rejected
    pub errors: Vec<DumpError>,

    /// Dump-level statistics
    pub summary: DumpSummary,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Convert a parse result into the report format
///
/// **Public** - used by commands to create final output
pub fn to_report(source: &str, result: &ParseResult) -> DumpReport {
    DumpReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        goroutines: result.goroutines.clone(),
        errors: result.errors.clone(),
        summary: summarize_dump(&result.goroutines),
        generated_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_to_report_carries_result() {
        let result = parse("goroutine 3 [sleep]:\ntime.Sleep(0x3b9aca00)\n\t/go/src/runtime/time.go:195 +0x135\n");
        let report = to_report("dump.txt", &result);

        assert_eq!(report.version, SCHEMA_VERSION);
        assert_eq!(report.source, "dump.txt");
        assert_eq!(report.goroutines, result.goroutines);
        assert_eq!(report.summary.total, 1);
        assert!(report.errors.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }
}
