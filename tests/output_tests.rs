use gostmortem::output::{read_report, to_report, validate_path, write_report};
use gostmortem::parser::{parse, parse_with_options, ParserOptions};
use gostmortem::utils::config::MAX_ANCESTOR_DEPTH_LIMIT;
use gostmortem::utils::error::OutputError;
use gostmortem::DumpErrorKind;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::NamedTempFile;

const DUMP: &str = "\
goroutine 21 [IO wait, 7 minutes]:
internal/poll.runtime_pollWait(0x7f1c2c0e1f08, 0x72)
\t/usr/local/go/src/runtime/netpoll.go:343 +0x85
created by net/http.(*Server).Serve in goroutine 1
\t/usr/local/go/src/net/http/server.go:3086 +0x5cb
[originating from goroutine 1]:
net/http.(*Server).Serve(0xc0000f2000, {0x7a2f40, 0xc000110000})
\t/usr/local/go/src/net/http/server.go:3056 +0x394

goroutine 22 [running]:
main.handler(
";

#[test]
fn test_report_round_trip_keeps_ancestors() {
    let result = parse(DUMP);
    let report = to_report("dump.txt", &result);

    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();
    let loaded = read_report(temp_file.path()).unwrap();

    assert_eq!(loaded.goroutines, result.goroutines);
    let ancestor = loaded.goroutines[0].ancestor.as_deref().unwrap();
    assert_eq!(ancestor.id, 1);
    assert_eq!(ancestor.stack[0].function, "net/http.(*Server).Serve");

    assert_eq!(loaded.errors.len(), 1);
    assert_eq!(loaded.errors[0].kind, DumpErrorKind::InvalidFunctionCall);
    assert_eq!(loaded.errors[0].line_number, 11);
    assert_eq!(loaded.summary.with_ancestors, 1);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_read_report_missing_file() {
    let result = read_report("/nonexistent/report.json");
    assert!(matches!(result, Err(OutputError::ReadFailed(_))));
}

#[test]
fn test_read_report_rejects_non_json() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), DUMP).unwrap();

    let result = read_report(temp_file.path());
    assert!(matches!(result, Err(OutputError::DeserializationFailed(_))));
}

#[test]
fn test_report_round_trip_at_max_ancestor_depth() {
    let mut dump = String::from("goroutine 1 [running]:\nmain.f()\n\t/m.go:1\n");
    for id in 0..MAX_ANCESTOR_DEPTH_LIMIT {
        dump.push_str(&format!(
            "[originating from goroutine {}]:\nmain.g()\n\t/m.go:2\n",
            id + 2
        ));
    }

    let options = ParserOptions::default().with_max_ancestor_depth(MAX_ANCESTOR_DEPTH_LIMIT);
    let result = parse_with_options(&dump, &options);
    assert!(result.errors.is_empty());
    assert_eq!(result.goroutines[0].ancestor_depth(), MAX_ANCESTOR_DEPTH_LIMIT);

    let report = to_report("deep.txt", &result);
    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();
    let loaded = read_report(temp_file.path()).unwrap();

    assert_eq!(loaded.goroutines, result.goroutines);
    assert_eq!(loaded.goroutines[0].ancestor_depth(), MAX_ANCESTOR_DEPTH_LIMIT);
}
