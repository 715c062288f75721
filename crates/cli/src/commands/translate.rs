use std::fs;

use anyhow::{Context, Result};

use crate::{open_report, resolve_report_path};

/// Print (or write to `output`) the legacy-text rendering of a report.
///
/// JSON-encoded reports are translated; legacy reports are echoed unchanged.
pub fn translate_command(path: &str, output: Option<&str>) -> Result<()> {
    let report = open_report(path)?;

    match output {
        Some(output) => {
            let output_path = resolve_report_path(output)?;
            fs::write(&output_path, report.content()).with_context(|| {
                format!("Failed to write translated report to {}", output_path.display())
            })?;
            println!("Wrote {}", output_path.display());
        }
        None => print!("{}", report.content()),
    }

    Ok(())
}
