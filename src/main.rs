//! Gostmortem CLI
//!
//! Parses Go goroutine stack dumps into structured JSON reports
//! and terminal summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use gostmortem::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use gostmortem::utils::config::DEFAULT_MAX_ANCESTOR_DEPTH;

/// Gostmortem - post-mortem analysis of Go stack dumps
#[derive(Parser, Debug)]
#[command(name = "gostmortem")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a goroutine dump
    Analyze {
        /// Dump file to read ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output path for the JSON report (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Fail if any line of the dump is rejected
        #[arg(long)]
        strict: bool,

        /// Longest "originating from" chain accepted per goroutine
        #[arg(long, env = "GOSTMORTEM_MAX_ANCESTOR_DEPTH", default_value_t = DEFAULT_MAX_ANCESTOR_DEPTH)]
        max_ancestor_depth: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the JSON report can be piped
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            summary,
            strict,
            max_ancestor_depth,
        } => {
            let args = AnalyzeArgs {
                input,
                output_json: output,
                print_summary: summary,
                strict,
                max_ancestor_depth,
            };

            validate_args(&args)?;
            execute_analyze(&args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
