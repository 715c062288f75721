
use anyhow::{Context, Result};
use crashlog_core::report::symbolicated_save_path;
use crashlog_core::{Architecture, CrashReport, ReportFormat};
use serde::Serialize;

use crate::{open_report, resolve_report_path};

/// Serializable overview of one loaded report.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub path: String,
    pub filename: String,
    pub format: ReportFormat,
    pub architecture: Option<Architecture>,
    pub binary_images: usize,
    pub calls: usize,
    pub uuids_for_symbolication: Vec<String>,
    pub symbolicated_save_path: String,
}

pub fn report_summary(report: &CrashReport) -> ReportSummary {
    ReportSummary {
        path: report.path().display().to_string(),
        filename: report.filename().to_string(),
        format: report.format(),
        architecture: report.architecture(),
        binary_images: report.binary_images().len(),
        calls: report.calls().len(),
        uuids_for_symbolication: report
            .uuids_for_symbolication()
            .iter()
            .map(|uuid| uuid.to_string())
            .collect(),
        symbolicated_save_path: report.symbolicated_save_path().display().to_string(),
    }
}

/// Show what was detected in a crash report and which binaries need symbols.
pub fn inspect_command(path: &str, json: bool) -> Result<()> {
    let report = open_report(path)?;
    let summary = report_summary(&report);

    if json {
        let serialized = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize report summary to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Crash Report");
    println!("============");
    println!("File: {}", summary.filename);
    println!("Path: {}", summary.path);
    println!("Format: {}", summary.format.as_str());
    match summary.architecture {
        Some(arch) => println!("Architecture: {arch}"),
        None => println!("Architecture: (unknown)"),
    }
    println!("Binary images: {}", summary.binary_images);
    println!("Calls: {}", summary.calls);
    println!("Save path: {}", summary.symbolicated_save_path);
    println!();

    println!("UUIDs needing symbols ({}):", summary.uuids_for_symbolication.len());
    if summary.uuids_for_symbolication.is_empty() {
        println!("  (none)");
    }
    for uuid in &summary.uuids_for_symbolication {
        let image = report.binary_images().iter().find(|i| i.uuid.to_string() == *uuid);
        match image {
            Some(image) => println!("  - {} {}", uuid, image.name),
            None => println!("  - {}", uuid),
        }
    }

    Ok(())
}

/// Print where the symbolicated copy of a report would be written.
///
/// The report itself is not read.
pub fn save_path_command(path: &str) -> Result<()> {
    let report_path = resolve_report_path(path)?;
    println!("{}", symbolicated_save_path(&report_path).display());
    Ok(())
}
