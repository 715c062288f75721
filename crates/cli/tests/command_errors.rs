use std::fs;

use crashlog::commands::{inspect_command, translate_command, uuids_command};
use crashlog::open_report;
use crashlog_core::ReportError;
use tempfile::tempdir;

#[test]
fn open_report_errors_when_file_missing() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("absent.crash");
    let err = open_report(&path.to_string_lossy()).unwrap_err();
    assert!(err.to_string().contains("Failed to load crash report"), "unexpected error: {err}");
    assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::EmptyFile)));
}

#[test]
fn inspect_errors_on_malformed_ips_header() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.ips");
    fs::write(&path, "{not json\n{}\n").unwrap();
    let err = inspect_command(&path.to_string_lossy(), false).unwrap_err();
    assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::Translation(_))));
}

#[test]
fn uuids_errors_on_ips_without_body() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("headless.ips");
    fs::write(&path, "{\"bug_type\":\"309\"}\n").unwrap();
    let err = uuids_command(&path.to_string_lossy(), true).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("Failed to translate crash report"), "unexpected error: {chain}");
}

#[test]
fn translate_errors_when_output_dir_missing() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("plain.crash");
    fs::write(&source, "Code Type: X86-64 (Native)\n").unwrap();
    let output = temp.path().join("no-such-dir").join("out.crash");
    let err =
        translate_command(&source.to_string_lossy(), Some(&output.to_string_lossy())).unwrap_err();
    assert!(err.to_string().contains("Failed to write translated report"));
}
