use anyhow::Result;
use std::path::Path;
use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported report version {} (expected {})",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Goroutines: {}", report.goroutines.len());
    println!("  Errors: {}", report.errors.len());
    println!("  Generated: {}", report.generated_at);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Gostmortem Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Dump file path, '-' for stdin");
        println!("  goroutines: array          - Parsed goroutines in dump order");
        println!("    id: number               - Goroutine id");
        println!("    status: string           - Status label from the header");
        println!("    wait_millis: number      - Blocked duration");
        println!("    locked_to_os: bool       - Locked to an OS thread");
        println!("    stack: array             - Frames, innermost first");
        println!("      function/file/line     - Call site");
        println!("    frames_elided: bool      - Runtime truncated the stack");
        println!("    creator: object          - Spawning call site (empty if absent)");
        println!("    ancestor: object?        - Originating goroutine, recursive");
        println!("  errors: array              - Rejected lines");
        println!("    kind: string             - Error classification");
        println!("    line_number: number      - 1-based line in the dump");
        println!("    line: string             - Raw line text");
        println!("  summary: object            - Dump statistics");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Gostmortem v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Post-mortem analysis of Go goroutine stack dumps.");
}
