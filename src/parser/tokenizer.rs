//! Stateless line tokenizers for goroutine dumps.
//!
//! Each function looks at exactly one line and either extracts structure
//! from it or reports no match. None of them log or raise: the driver in
//! `goroutine_dump` decides what a mismatch means.

use super::schema::{Frame, Goroutine};
use crate::utils::config::{
    LOCKED_TO_THREAD, MINUTES_SUFFIX, MINUTES_TO_MILLIS, ORIGINATING_FROM_PREFIX,
    ORIGINATING_FROM_SUFFIX,
};

/// How a function line is tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncMode {
    /// `pkg.Func(0x1, 0x2)`: name is everything before the argument list
    CallStack,
    /// `pkg.Func in goroutine 1`: name is everything before the first space
    CreatedBy,
}

/// Parse the part of a header line that follows `"goroutine "`.
///
/// Accepts `<id> [<status>(, <N> minutes)?(, locked to thread)?]:` and
/// nothing else. Returns a goroutine shell with an empty stack and an
/// unset creator.
///
/// # Example
/// ```
/// use gostmortem::parser::tokenizer::parse_goroutine_header;
///
/// let g = parse_goroutine_header("7 [select, 2 minutes]:").unwrap();
/// assert_eq!(g.id, 7);
/// assert_eq!(g.status, "select");
/// assert_eq!(g.wait_millis, 120_000);
/// ```
pub fn parse_goroutine_header(rest: &str) -> Option<Goroutine> {
    let (id_str, bracketed) = rest.split_once(' ')?;
    let id = parse_decimal(id_str)?;

    let inner = bracketed.strip_prefix('[')?.strip_suffix("]:")?;

    let (status, mut tail) = match inner.find(',') {
        Some(i) => inner.split_at(i),
        None => (inner, ""),
    };
    if status.is_empty() || status.contains(']') {
        return None;
    }

    let mut wait_millis = 0;
    if let Some((minutes, remainder)) = strip_minutes_clause(tail) {
        wait_millis = minutes.saturating_mul(MINUTES_TO_MILLIS);
        tail = remainder;
    }

    let locked_to_os = match tail.strip_prefix(", ") {
        None if tail.is_empty() => false,
        Some(clause) if clause == LOCKED_TO_THREAD => true,
        _ => return None,
    };

    let mut g = Goroutine::new(id, status);
    g.wait_millis = wait_millis;
    g.locked_to_os = locked_to_os;
    Some(g)
}

/// Split `", <N> minutes"` off the front of a header tail
fn strip_minutes_clause(tail: &str) -> Option<(u64, &str)> {
    let after = tail.strip_prefix(", ")?;
    let digits_end = after
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after.len());
    let minutes = parse_decimal(&after[..digits_end])?;
    let remainder = after[digits_end..].strip_prefix(MINUTES_SUFFIX)?;
    Some((minutes, remainder))
}

/// Parse a function line into a frame with only `function` set.
///
/// In call-stack mode exactly one parenthesis pair is tracked at a time:
/// opening a second group before the first closes, a stray `)`, a missing
/// group, or a group at position 0 all fail. A `(` after a closed group
/// starts tracking again, so receiver syntax such as
/// `main.(*T).Run(0x1)` yields `main.(*T).Run`.
///
/// In created-by mode any non-empty line is accepted.
pub fn parse_func(line: &str, mode: FuncMode) -> Option<Frame> {
    match mode {
        FuncMode::CreatedBy => {
            if line.is_empty() {
                return None;
            }
            let function = match line.find(' ') {
                Some(i) if i > 0 => &line[..i],
                _ => line,
            };
            Some(Frame::new(function))
        }
        FuncMode::CallStack => {
            let mut open: Option<usize> = None;
            let mut close: Option<usize> = None;

            for (i, b) in line.bytes().enumerate() {
                match b {
                    b'(' => {
                        if open.is_some() && close.is_none() {
                            return None;
                        }
                        open = Some(i);
                        close = None;
                    }
                    b')' => {
                        if open.is_none() || close.is_some() {
                            return None;
                        }
                        close = Some(i);
                    }
                    _ => {}
                }
            }

            match (open, close) {
                (Some(o), Some(_)) if o > 0 => Some(Frame::new(&line[..o])),
                _ => None,
            }
        }
    }
}

/// Scanner position inside a file:line line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileScan {
    Filename,
    Colon,
    LineNumber,
}

/// Parse a `\t<file>:<line> +0x1f` line into `frame`.
///
/// Exactly one leading tab is required. The file is everything before the
/// first `:` that is directly followed by a digit, so `C:\src\main.go:12`
/// works. The line number runs until a space (the rest is discarded) or end
/// of line; any other character fails the line. `frame` is only written on
/// success.
pub fn parse_file_line(line: &str, frame: &mut Frame) -> bool {
    let Some(body) = line.strip_prefix('\t') else {
        return false;
    };
    if body.starts_with('\t') {
        return false;
    }

    let mut state = FileScan::Filename;
    let mut file_end: Option<usize> = None;
    let mut number: u32 = 0;

    for (i, c) in body.bytes().enumerate() {
        match state {
            FileScan::Filename => {
                if c == b':' {
                    state = FileScan::Colon;
                }
            }
            FileScan::Colon => {
                if c.is_ascii_digit() {
                    file_end = Some(i - 1);
                    number = u32::from(c - b'0');
                    state = FileScan::LineNumber;
                } else if c != b':' {
                    state = FileScan::Filename;
                }
            }
            FileScan::LineNumber => {
                if c == b' ' {
                    break;
                }
                if !c.is_ascii_digit() {
                    return false;
                }
                number = match number
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(u32::from(c - b'0')))
                {
                    Some(n) => n,
                    None => return false,
                };
            }
        }
    }

    let Some(file_end) = file_end else {
        return false;
    };

    frame.file = body[..file_end].to_string();
    frame.line = number;
    true
}

/// Parse `[originating from goroutine <id>]:` and return the ancestor id
pub fn parse_ancestor_ref(line: &str) -> Option<u64> {
    let id = line
        .strip_prefix(ORIGINATING_FROM_PREFIX)?
        .strip_suffix(ORIGINATING_FROM_SUFFIX)?;
    parse_decimal(id)
}

/// Strict unsigned decimal: digits only, no sign, no whitespace
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_running() {
        let g = parse_goroutine_header("1 [running]:").unwrap();
        assert_eq!(g.id, 1);
        assert_eq!(g.status, "running");
        assert_eq!(g.wait_millis, 0);
        assert!(!g.locked_to_os);
        assert!(g.stack.is_empty());
        assert!(g.creator.is_unset());
        assert!(g.ancestor.is_none());
    }

    #[test]
    fn test_header_minutes_and_locked() {
        let g = parse_goroutine_header("2 [chan receive, 5 minutes, locked to thread]:").unwrap();
        assert_eq!(g.status, "chan receive");
        assert_eq!(g.wait_millis, 300_000);
        assert!(g.locked_to_os);
    }

    #[test]
    fn test_header_locked_without_minutes() {
        let g = parse_goroutine_header("9 [syscall, locked to thread]:").unwrap();
        assert_eq!(g.wait_millis, 0);
        assert!(g.locked_to_os);
    }

    #[test]
    fn test_header_status_with_parens() {
        let g = parse_goroutine_header("4 [select (no cases)]:").unwrap();
        assert_eq!(g.status, "select (no cases)");
    }

    #[test]
    fn test_header_rejects_malformed() {
        assert!(parse_goroutine_header("x [running]:").is_none());
        assert!(parse_goroutine_header("1 running:").is_none());
        assert!(parse_goroutine_header("1 [running]").is_none());
        assert!(parse_goroutine_header("1 [running]: trailing").is_none());
        assert!(parse_goroutine_header("1 []:").is_none());
        assert!(parse_goroutine_header("1 [a]b]:").is_none());
        assert!(parse_goroutine_header("1 [sleep, 5 hours]:").is_none());
        assert!(parse_goroutine_header("1 [sleep, minutes]:").is_none());
        assert!(parse_goroutine_header("1 [sleep, 5 minutes, locked]:").is_none());
        assert!(parse_goroutine_header("-1 [running]:").is_none());
        assert!(parse_goroutine_header("99999999999999999999999 [running]:").is_none());
    }

    #[test]
    fn test_func_call_stack() {
        let f = parse_func("main.foo(0x1, 0x2)", FuncMode::CallStack).unwrap();
        assert_eq!(f.function, "main.foo");
        assert!(f.file.is_empty());
        assert_eq!(f.line, 0);
    }

    #[test]
    fn test_func_method_receiver() {
        let f = parse_func("main.(*Server).Serve(0xc000010000)", FuncMode::CallStack).unwrap();
        assert_eq!(f.function, "main.(*Server).Serve");
    }

    #[test]
    fn test_func_call_stack_failures() {
        assert!(parse_func("main.foo", FuncMode::CallStack).is_none());
        assert!(parse_func("main.foo(0x1", FuncMode::CallStack).is_none());
        assert!(parse_func("main.foo(a(b))", FuncMode::CallStack).is_none());
        assert!(parse_func("main.foo)(", FuncMode::CallStack).is_none());
        assert!(parse_func("main.foo(0x1))", FuncMode::CallStack).is_none());
        assert!(parse_func("(0x1)", FuncMode::CallStack).is_none());
        assert!(parse_func("", FuncMode::CallStack).is_none());
    }

    #[test]
    fn test_func_created_by() {
        let f = parse_func("main.main in goroutine 1", FuncMode::CreatedBy).unwrap();
        assert_eq!(f.function, "main.main");

        let f = parse_func("net/http.(*Server).Serve", FuncMode::CreatedBy).unwrap();
        assert_eq!(f.function, "net/http.(*Server).Serve");

        assert!(parse_func("", FuncMode::CreatedBy).is_none());
    }

    #[test]
    fn test_file_line_basic() {
        let mut f = Frame::new("main.foo");
        assert!(parse_file_line("\t/a/b.go:10 +0x1", &mut f));
        assert_eq!(f.file, "/a/b.go");
        assert_eq!(f.line, 10);
    }

    #[test]
    fn test_file_line_without_offset() {
        let mut f = Frame::new("main.foo");
        assert!(parse_file_line("\t/usr/lib/go/src/runtime/proc.go:250", &mut f));
        assert_eq!(f.file, "/usr/lib/go/src/runtime/proc.go");
        assert_eq!(f.line, 250);
    }

    #[test]
    fn test_file_line_windows_drive() {
        let mut f = Frame::new("main.foo");
        assert!(parse_file_line("\tC:/work/main.go:42 +0x25", &mut f));
        assert_eq!(f.file, "C:/work/main.go");
        assert_eq!(f.line, 42);
    }

    #[test]
    fn test_file_line_double_colon() {
        let mut f = Frame::new("main.foo");
        assert!(parse_file_line("\tweird::7", &mut f));
        assert_eq!(f.file, "weird:");
        assert_eq!(f.line, 7);
    }

    #[test]
    fn test_file_line_failures() {
        let mut f = Frame::new("main.foo");
        assert!(!parse_file_line("/a/b.go:10 +0x1", &mut f));
        assert!(!parse_file_line("\t\t/a/b.go:10", &mut f));
        assert!(!parse_file_line("\t", &mut f));
        assert!(!parse_file_line("\t/a/b.go", &mut f));
        assert!(!parse_file_line("\t/a/b.go:x", &mut f));
        assert!(!parse_file_line("\t/a/b.go:10x", &mut f));
        assert!(!parse_file_line("\t/a/b.go:99999999999", &mut f));
    }

    #[test]
    fn test_file_line_failure_leaves_frame() {
        let mut f = Frame::new("main.foo");
        assert!(!parse_file_line("\t/a/b.go:1z", &mut f));
        assert_eq!(f, Frame::new("main.foo"));
    }

    #[test]
    fn test_ancestor_ref() {
        assert_eq!(parse_ancestor_ref("[originating from goroutine 17]:"), Some(17));
        assert_eq!(parse_ancestor_ref("[originating from goroutine x]:"), None);
        assert_eq!(parse_ancestor_ref("[originating from goroutine 17]"), None);
        assert_eq!(parse_ancestor_ref("[originating from goroutine ]:"), None);
    }
}
