//! Goroutine dump parser.
//!
//! A single pass over the dump's lines drives a small state machine.
//! Each goroutine is built in a detached staging area and only appended
//! to the output once its section is complete, so a malformed goroutine
//! is dropped as a whole while parsing carries on with the next header.

use super::schema::{Goroutine, ParseResult};
use super::tokenizer::{
    parse_ancestor_ref, parse_file_line, parse_func, parse_goroutine_header, FuncMode,
};
use crate::utils::config::{
    CREATED_BY_PREFIX, DEFAULT_MAX_ANCESTOR_DEPTH, ELIDED_FRAMES_SENTINEL, GOROUTINE_PREFIX,
    ORIGINATING_FROM_PREFIX,
};
use crate::utils::error::{DumpError, DumpErrorKind};
use log::{debug, warn};

/// What the parser expects the next line to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Header,
    StackFunc,
    StackFile,
    CreatedBy,
    CreatedByFunc,
    CreatedByFile,
    OriginatingFrom,
}

/// Whether the driver moves on or feeds the same line again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Advance,
    Replay,
}

/// Tunables for a parse call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Longest "originating from" chain accepted for one goroutine
    pub max_ancestor_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

impl ParserOptions {
    /// Set the longest ancestor chain accepted per goroutine
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }
}

/// Parse a goroutine dump with default options
///
/// **Public** - main entry point for parsing
///
/// Never fails: lines that cannot be understood are reported in
/// [`ParseResult::errors`] and only cost the goroutine they belong to.
///
/// # Example
/// ```
/// let dump = "goroutine 1 [running]:\nmain.main()\n\t/app/main.go:5 +0x1d\n";
/// let result = gostmortem::parse(dump);
/// assert_eq!(result.goroutines.len(), 1);
/// assert_eq!(result.goroutines[0].stack[0].function, "main.main");
/// assert!(result.errors.is_empty());
/// ```
pub fn parse(text: &str) -> ParseResult {
    parse_with_options(text, &ParserOptions::default())
}

/// Parse a goroutine dump with explicit options
///
/// **Public** - used by commands that expose parser tunables
pub fn parse_with_options(text: &str, options: &ParserOptions) -> ParseResult {
    debug!("Parsing goroutine dump ({} bytes)", text.len());

    let lines: Vec<&str> = split_lines(text).collect();
    let mut parser = DumpParser::new(options.clone());

    let mut index = 0;
    while index < lines.len() {
        match parser.step(index + 1, lines[index]) {
            Step::Advance => index += 1,
            Step::Replay => {}
        }
    }

    let result = parser.finish();
    debug!(
        "Parsed {} goroutines with {} errors from {} lines",
        result.goroutines.len(),
        result.errors.len(),
        lines.len()
    );
    result
}

/// Split on `\n`; a trailing newline does not start an extra line
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_suffix('\n').unwrap_or(text).split('\n')
}

/// State machine over dump lines
///
/// **Private** - one instance per parse call
struct DumpParser {
    options: ParserOptions,
    state: ParserState,
    goroutines: Vec<Goroutine>,
    errors: Vec<DumpError>,
    /// Goroutine under construction followed by its ancestors so far.
    /// The last entry receives frames.
    staging: Vec<Goroutine>,
}

impl DumpParser {
    fn new(options: ParserOptions) -> Self {
        Self {
            options,
            state: ParserState::Header,
            goroutines: Vec::new(),
            errors: Vec::new(),
            staging: Vec::new(),
        }
    }

    /// Process one line under the current state
    fn step(&mut self, line_number: usize, line: &str) -> Step {
        match self.state {
            ParserState::Header => {
                // Banner text and blank separators between goroutines
                let Some(rest) = line.strip_prefix(GOROUTINE_PREFIX) else {
                    return Step::Advance;
                };
                match parse_goroutine_header(rest) {
                    Some(g) => {
                        self.staging.push(g);
                        self.state = ParserState::StackFunc;
                    }
                    None => self.abort(DumpErrorKind::InvalidHeader, line_number, line),
                }
                Step::Advance
            }

            ParserState::OriginatingFrom => {
                let Some(id) = parse_ancestor_ref(line) else {
                    self.abort(DumpErrorKind::InvalidAncestorId, line_number, line);
                    return Step::Advance;
                };
                if self.staging.len() > self.options.max_ancestor_depth {
                    self.abort(DumpErrorKind::AncestorChainTooDeep, line_number, line);
                    return Step::Advance;
                }
                self.staging.push(Goroutine {
                    id,
                    ..Default::default()
                });
                self.state = ParserState::StackFunc;
                Step::Advance
            }

            ParserState::StackFunc | ParserState::CreatedByFunc => {
                let text = line.strip_prefix(CREATED_BY_PREFIX).unwrap_or(line);
                let mode = if self.state == ParserState::StackFunc {
                    FuncMode::CallStack
                } else {
                    FuncMode::CreatedBy
                };

                if let (Some(frame), Some(g)) = (parse_func(text, mode), self.staging.last_mut()) {
                    if mode == FuncMode::CallStack {
                        g.stack.push(frame);
                        self.state = ParserState::StackFile;
                    } else {
                        g.creator = frame;
                        self.state = ParserState::CreatedByFile;
                    }
                    return Step::Advance;
                }

                if text == ELIDED_FRAMES_SENTINEL {
                    if let Some(g) = self.staging.last_mut() {
                        g.frames_elided = true;
                    }
                    self.state = ParserState::CreatedBy;
                    return Step::Advance;
                }
                if text.starts_with(ORIGINATING_FROM_PREFIX) {
                    self.state = ParserState::OriginatingFrom;
                    return Step::Replay;
                }

                self.abort(DumpErrorKind::InvalidFunctionCall, line_number, line);
                Step::Advance
            }

            ParserState::StackFile | ParserState::CreatedByFile => {
                let pending = match (self.state, self.staging.last_mut()) {
                    (ParserState::StackFile, Some(g)) => g.stack.last_mut(),
                    (_, Some(g)) => Some(&mut g.creator),
                    _ => None,
                };

                if pending.is_some_and(|frame| parse_file_line(line, frame)) {
                    self.state = ParserState::CreatedBy;
                } else {
                    self.abort(DumpErrorKind::InvalidFileLine, line_number, line);
                }
                Step::Advance
            }

            ParserState::CreatedBy => {
                if line.starts_with(CREATED_BY_PREFIX) {
                    self.state = ParserState::CreatedByFunc;
                    Step::Replay
                } else if line.is_empty() {
                    self.commit();
                    self.state = ParserState::Header;
                    Step::Advance
                } else {
                    // Next frame of the same stack
                    self.state = ParserState::StackFunc;
                    Step::Replay
                }
            }
        }
    }

    /// Record an error and drop the goroutine under construction
    fn abort(&mut self, kind: DumpErrorKind, line_number: usize, line: &str) {
        let err = DumpError::new(kind, line_number, line);
        match self.staging.first() {
            Some(g) => warn!("Discarding goroutine {}: {}", g.id, err),
            None => warn!("{}", err),
        }
        self.errors.push(err);
        self.staging.clear();
        self.state = ParserState::Header;
    }

    /// Link the staged ancestors and append the goroutine to the output
    fn commit(&mut self) {
        let mut chain = self.staging.drain(..).rev();
        let Some(mut unit) = chain.next() else {
            return;
        };
        for mut parent in chain {
            parent.ancestor = Some(Box::new(unit));
            unit = parent;
        }

        debug!(
            "Parsed goroutine {} [{}]: {} frames, {} ancestors",
            unit.id,
            unit.status,
            unit.stack.len(),
            unit.ancestor_depth()
        );
        self.goroutines.push(unit);
    }

    /// End of input: whatever is staged is kept as-is
    fn finish(mut self) -> ParseResult {
        if !self.staging.is_empty() {
            debug!("Input ended in state {:?}, keeping open goroutine", self.state);
            self.commit();
        }

        ParseResult {
            goroutines: self.goroutines,
            errors: self.errors,
        }
    }
}
