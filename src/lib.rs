//! Gostmortem
//!
//! Post-mortem analysis of Go goroutine stack dumps, as printed by the
//! runtime on panic, deadlock, or `SIGQUIT`.
//!
//! The core is [`parse`], which turns the raw dump text into structured
//! [`Goroutine`] records plus a list of recoverable [`DumpError`]s. A
//! malformed goroutine is dropped on its own; the rest of the dump is
//! still recovered.
//!
//! ## Getting Started
//!
//! ```
//! let dump = "\
//! goroutine 7 [chan receive, 5 minutes]:
//! main.worker(0xc000012345)
//! \t/app/worker.go:42 +0x65
//! created by main.main in goroutine 1
//! \t/app/main.go:17 +0x8f
//! ";
//!
//! let result = gostmortem::parse(dump);
//! let g = &result.goroutines[0];
//! assert_eq!(g.wait_millis, 300_000);
//! assert_eq!(g.creator.function, "main.main");
//! ```
//!
//! The `gostmortem` binary wraps the parser for the command line.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use parser::{parse, parse_with_options, Frame, Goroutine, ParseResult, ParserOptions};
pub use utils::error::{DumpError, DumpErrorKind};
