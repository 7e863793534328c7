//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the dump from a file or stdin
//! 2. Parses it into goroutines
//! 3. Summarizes the result
//! 4. Writes the JSON report and/or prints a text summary

use crate::output::{generate_text_summary, report_to_string, to_report, write_report};
use crate::parser::{parse_with_options, ParseResult, ParserOptions};
use crate::utils::config::{DEFAULT_MAX_ANCESTOR_DEPTH, MAX_ANCESTOR_DEPTH_LIMIT};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Input path meaning "read from stdin"
pub const STDIN_PATH: &str = "-";

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Dump file to read, or "-" for stdin
    pub input: PathBuf,

    /// Output path for the JSON report; printed to stdout when None
    /// and no summary is requested
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Fail when any line of the dump was rejected
    pub strict: bool,

    /// Longest ancestor chain accepted per goroutine
    pub max_ancestor_depth: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_PATH),
            output_json: None,
            print_summary: false,
            strict: false,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The parse result, so callers can inspect what was recovered
///
/// # Errors
/// * Input cannot be read
/// * Report cannot be written
/// * `strict` is set and the dump had rejected lines
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<ParseResult> {
    let start_time = Instant::now();
    let source = args.input.display().to_string();

    info!("Step 1/3: Reading dump from {}...", source);
    let text = read_dump(&args.input)?;
    debug!("Read {} bytes", text.len());

    info!("Step 2/3: Parsing goroutines...");
    let options = ParserOptions::default().with_max_ancestor_depth(args.max_ancestor_depth);
    let result = parse_with_options(&text, &options);

    info!(
        "Recovered {} goroutines, rejected {} lines",
        result.goroutines.len(),
        result.errors.len()
    );
    for err in &result.errors {
        warn!("{}", err);
    }

    if !result.is_recognized_dump() {
        anyhow::bail!("Input is not a valid go stack dump: nothing could be parsed");
    }
    if args.strict && !result.is_clean() {
        anyhow::bail!(
            "Input is not a valid go stack dump: {} lines rejected, first {}",
            result.errors.len(),
            result.errors[0]
        );
    }

    info!("Step 3/3: Writing output...");
    let report = to_report(&source, &result);
    info!("Dump summary: {}", report.summary.summary());

    match &args.output_json {
        Some(path) => {
            write_report(&report, path).context("Failed to write JSON report")?;
            info!("✓ Report written to: {}", path.display());
        }
        None if !args.print_summary => {
            println!("{}", report_to_string(&report)?);
        }
        None => {}
    }

    if args.print_summary {
        let summary = &report.summary;
        println!("\n{}", "=".repeat(60));
        println!("GOROUTINE DUMP SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Source:      {}", source);
        println!("Goroutines:  {}", summary.total);
        println!("Errors:      {}", result.errors.len());
        println!("\n{}", generate_text_summary(summary, &result.errors, 10));
        println!("{}", "=".repeat(60));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(result)
}

/// Read the whole dump from a file or stdin
///
/// **Private** - internal helper for execute_analyze
fn read_dump(input: &Path) -> Result<String> {
    if input.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read dump from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read dump file {}", input.display()))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.input.as_os_str() != STDIN_PATH && !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if let Some(output) = &args.output_json {
        crate::output::validate_path(output).context("Invalid report path")?;
    }

    if args.max_ancestor_depth > MAX_ANCESTOR_DEPTH_LIMIT {
        anyhow::bail!(
            "max_ancestor_depth is too large (max {})",
            MAX_ANCESTOR_DEPTH_LIMIT
        );
    }

    Ok(())
}
