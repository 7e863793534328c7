use gostmortem::commands::{execute_analyze, validate_args, AnalyzeArgs};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn dump_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_validate_args_valid_file() {
    let dump = dump_file("goroutine 1 [running]:\n");
    let args = AnalyzeArgs {
        input: dump.path().to_path_buf(),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_output_is_directory() {
    let dump = dump_file("goroutine 1 [running]:\n");
    let out_dir = tempfile::tempdir().unwrap();
    let args = AnalyzeArgs {
        input: dump.path().to_path_buf(),
        output_json: Some(out_dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_missing_input() {
    let args = AnalyzeArgs {
        input: PathBuf::from("missing-dump.txt"),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_analyze_with_summary_and_report() {
    let dump = dump_file(
        "goroutine 1 [select, locked to thread]:\nmain.loop()\n\t/app/loop.go:8 +0x2f\n\n",
    );
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("out/report.json");

    let args = AnalyzeArgs {
        input: dump.path().to_path_buf(),
        output_json: Some(out.clone()),
        print_summary: true,
        ..Default::default()
    };

    let result = execute_analyze(&args).unwrap();
    assert!(result.is_clean());
    assert!(result.goroutines[0].locked_to_os);
    assert!(out.exists());
}

#[test]
fn test_analyze_not_a_dump() {
    let dump = dump_file("goroutine 1 is not a header\n");
    let args = AnalyzeArgs {
        input: dump.path().to_path_buf(),
        print_summary: true,
        ..Default::default()
    };

    let err = execute_analyze(&args).unwrap_err();
    assert!(err.to_string().contains("not a valid go stack dump"));
}
