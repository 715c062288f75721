use std::path::Path;

use crashlog::{open_report, resolve_report_path};
use tempfile::tempdir;

#[test]
fn resolve_report_path_keeps_existing_absolute_file() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("Report.crash");
    std::fs::write(&file, "x").expect("write report");

    let resolved = resolve_report_path(&file.to_string_lossy()).expect("resolve");
    assert_eq!(resolved, file);
}

#[test]
fn resolve_report_path_keeps_missing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("nested").join("Report.ips");

    let resolved = resolve_report_path(&missing.to_string_lossy()).expect("resolve");
    assert_eq!(resolved, missing);
}

#[test]
fn resolve_report_path_joins_relative_path_to_cwd() {
    let resolved = resolve_report_path("does-not-exist/Report.crash").expect("resolve");
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(resolved, cwd.join(Path::new("does-not-exist/Report.crash")));
}

#[cfg(unix)]
#[test]
fn symlinked_report_keeps_link_path_and_save_path() {
    let tmp = tempdir().expect("tempdir");
    let target_dir = tmp.path().join("archive");
    let link_dir = tmp.path().join("inbox");
    std::fs::create_dir_all(&target_dir).expect("create archive dir");
    std::fs::create_dir_all(&link_dir).expect("create inbox dir");

    let target = target_dir.join("stored.crash");
    std::fs::write(&target, "Code Type: X86-64 (Native)\n").expect("write report");
    let link = link_dir.join("Latest.crash");
    std::os::unix::fs::symlink(&target, &link).expect("symlink report");

    let resolved = resolve_report_path(&link.to_string_lossy()).expect("resolve");
    assert_eq!(resolved, link);

    let report = open_report(&link.to_string_lossy()).expect("open symlinked report");
    assert_eq!(report.path(), link.as_path());
    assert_eq!(report.filename(), "Latest.crash");
    assert_eq!(report.symbolicated_save_path(), link_dir.join("Latest_symbolicated.crash"));
}
