use anyhow::{Context, Result};

use crate::open_report;

/// List the UUIDs of the binaries referenced by the report's backtraces.
pub fn uuids_command(path: &str, json: bool) -> Result<()> {
    let report = open_report(path)?;
    let uuids: Vec<String> =
        report.uuids_for_symbolication().iter().map(|uuid| uuid.to_string()).collect();

    if json {
        let serialized =
            serde_json::to_string_pretty(&uuids).context("Failed to serialize UUIDs to JSON")?;
        println!("{}", serialized);
    } else {
        for uuid in uuids {
            println!("{}", uuid);
        }
    }

    Ok(())
}

/// List the report's loaded-image table.
pub fn images_command(path: &str, json: bool) -> Result<()> {
    let report = open_report(path)?;
    let images = report.binary_images();

    if json {
        let serialized = serde_json::to_string_pretty(images)
            .context("Failed to serialize binary images to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Binary images ({}):", images.len());
    if images.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for image in images {
        let arch_display = image.architecture.map(|a| a.as_str()).unwrap_or("-");
        println!(
            "  - {} [arch: {}] load={} uuid={} path={}",
            image.name, arch_display, image.load_address, image.uuid, image.path
        );
    }

    Ok(())
}

/// List the report's unsymbolicated stack frames.
pub fn calls_command(path: &str, json: bool) -> Result<()> {
    let report = open_report(path)?;
    let calls = report.calls();

    if json {
        let serialized = serde_json::to_string_pretty(calls)
            .context("Failed to serialize calls to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Calls ({}):", calls.len());
    if calls.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for call in calls {
        let thread_display = call.thread.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "  - thread {} #{} {} {} {} + {}",
            thread_display, call.frame_index, call.image_name, call.address, call.load_address,
            call.offset
        );
    }

    Ok(())
}
