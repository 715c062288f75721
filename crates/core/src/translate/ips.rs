use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::model::BinaryUuid;
use crate::translate::{ReportTranslator, TranslateError};

/// `bug_type` of a crash report; other IPS kinds (hangs, jetsam, ...) have
/// no backtraces worth symbolicating.
const CRASH_BUG_TYPE: &str = "309";

#[derive(Debug, Default, Deserialize)]
struct IpsHeader {
    app_name: Option<String>,
    app_version: Option<String>,
    build_version: Option<String>,
    bug_type: Option<String>,
    os_version: Option<String>,
    timestamp: Option<String>,
    incident_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpsBody {
    proc_name: Option<String>,
    proc_path: Option<String>,
    pid: Option<i64>,
    cpu_type: Option<String>,
    translated: Option<bool>,
    parent_proc: Option<String>,
    parent_pid: Option<i64>,
    capture_time: Option<String>,
    incident: Option<String>,
    os_version: Option<IpsOsVersion>,
    bundle_info: Option<IpsBundleInfo>,
    exception: Option<IpsException>,
    faulting_thread: Option<usize>,
    #[serde(default)]
    threads: Vec<IpsThread>,
    #[serde(default)]
    used_images: Vec<IpsImage>,
}

#[derive(Debug, Default, Deserialize)]
struct IpsOsVersion {
    train: Option<String>,
    build: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IpsBundleInfo {
    #[serde(rename = "CFBundleIdentifier")]
    identifier: Option<String>,
    #[serde(rename = "CFBundleShortVersionString")]
    short_version: Option<String>,
    #[serde(rename = "CFBundleVersion")]
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IpsException {
    #[serde(rename = "type")]
    kind: Option<String>,
    signal: Option<String>,
    subtype: Option<String>,
    codes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IpsThread {
    #[serde(default)]
    triggered: bool,
    name: Option<String>,
    queue: Option<String>,
    #[serde(default)]
    frames: Vec<IpsFrame>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpsFrame {
    #[serde(default)]
    image_offset: u64,
    image_index: Option<usize>,
    symbol: Option<String>,
    symbol_location: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct IpsImage {
    #[serde(default)]
    base: u64,
    #[serde(default)]
    size: u64,
    uuid: Option<String>,
    path: Option<String>,
    name: Option<String>,
    arch: Option<String>,
    #[serde(rename = "CFBundleIdentifier")]
    bundle_id: Option<String>,
    #[serde(rename = "CFBundleShortVersionString")]
    short_version: Option<String>,
    #[serde(rename = "CFBundleVersion")]
    bundle_version: Option<String>,
}

impl IpsImage {
    fn display_name(&self) -> &str {
        self.bundle_id.as_deref().or(self.name.as_deref()).unwrap_or("???")
    }

    fn frame_name(&self) -> &str {
        self.name.as_deref().or(self.bundle_id.as_deref()).unwrap_or("???")
    }
}

/// Translator for the JSON crash report encoding (one-line JSON header
/// followed by a JSON body).
#[derive(Debug, Default, Clone, Copy)]
pub struct IpsTranslator;

impl IpsTranslator {
    /// Translate already-loaded IPS text.
    pub fn translate_str(&self, text: &str) -> Result<String, TranslateError> {
        let (header_line, body_text) = text.trim_start().split_once('\n').unwrap_or((text, ""));
        let body_text = body_text.trim();
        if body_text.is_empty() {
            return Err(TranslateError::MissingBody);
        }

        let header: IpsHeader =
            serde_json::from_str(header_line.trim()).map_err(TranslateError::InvalidHeader)?;
        if let Some(bug_type) = header.bug_type.as_deref() {
            if bug_type != CRASH_BUG_TYPE {
                return Err(TranslateError::UnsupportedBugType(bug_type.to_string()));
            }
        }
        let body: IpsBody = serde_json::from_str(body_text).map_err(TranslateError::InvalidBody)?;

        tracing::debug!(
            threads = body.threads.len(),
            images = body.used_images.len(),
            "translating IPS report"
        );
        render(&header, &body)
    }
}

impl ReportTranslator for IpsTranslator {
    fn translate(&self, path: &Path) -> anyhow::Result<String> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read IPS report at {}", path.display()))?;
        Ok(self.translate_str(&text)?)
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{:<23}{}\n", format!("{label}:"), value)
}

fn render(header: &IpsHeader, body: &IpsBody) -> Result<String, TranslateError> {
    let mut out = String::new();
    let bundle = body.bundle_info.as_ref();

    let process = body.proc_name.as_deref().or(header.app_name.as_deref()).unwrap_or("???");
    match body.pid {
        Some(pid) => out.push_str(&field("Process", &format!("{process} [{pid}]"))),
        None => out.push_str(&field("Process", process)),
    }
    out.push_str(&field("Path", body.proc_path.as_deref().unwrap_or("???")));
    if let Some(identifier) = bundle.and_then(|b| b.identifier.as_deref()) {
        out.push_str(&field("Identifier", identifier));
    }
    let short_version =
        bundle.and_then(|b| b.short_version.as_deref()).or(header.app_version.as_deref());
    let build = bundle.and_then(|b| b.version.as_deref()).or(header.build_version.as_deref());
    match (short_version, build) {
        (Some(v), Some(b)) => out.push_str(&field("Version", &format!("{v} ({b})"))),
        (Some(v), None) => out.push_str(&field("Version", v)),
        _ => {}
    }
    let cpu = body.cpu_type.as_deref().unwrap_or("???");
    let mode = if body.translated.unwrap_or(false) { "Translated" } else { "Native" };
    out.push_str(&field("Code Type", &format!("{cpu} ({mode})")));
    if let Some(parent) = body.parent_proc.as_deref() {
        let parent = match body.parent_pid {
            Some(pid) => format!("{parent} [{pid}]"),
            None => parent.to_string(),
        };
        out.push_str(&field("Parent Process", &parent));
    }
    out.push('\n');

    if let Some(time) = body.capture_time.as_deref().or(header.timestamp.as_deref()) {
        out.push_str(&field("Date/Time", time));
    }
    let os_version = body
        .os_version
        .as_ref()
        .and_then(|os| match (os.train.as_deref(), os.build.as_deref()) {
            (Some(train), Some(build)) => Some(format!("{train} ({build})")),
            (Some(train), None) => Some(train.to_string()),
            _ => None,
        })
        .or_else(|| header.os_version.clone());
    if let Some(os_version) = os_version {
        out.push_str(&field("OS Version", &os_version));
    }
    out.push_str(&field("Report Version", "12"));
    if let Some(incident) = body.incident.as_deref().or(header.incident_id.as_deref()) {
        out.push_str(&field("Incident Identifier", incident));
    }
    out.push('\n');

    if let Some(exception) = &body.exception {
        let kind = exception.kind.as_deref().unwrap_or("???");
        match exception.signal.as_deref() {
            Some(signal) => out.push_str(&field("Exception Type", &format!("{kind} ({signal})"))),
            None => out.push_str(&field("Exception Type", kind)),
        }
        if let Some(codes) = exception.subtype.as_deref().or(exception.codes.as_deref()) {
            out.push_str(&field("Exception Codes", codes));
        }
        out.push('\n');
    }

    let crashed = body.faulting_thread.or_else(|| body.threads.iter().position(|t| t.triggered));
    if let Some(crashed) = crashed {
        out.push_str(&field("Crashed Thread", &crashed.to_string()));
        out.push('\n');
    }

    for (index, thread) in body.threads.iter().enumerate() {
        render_thread(&mut out, index, thread, crashed == Some(index), &body.used_images)?;
    }

    out.push_str("Binary Images:\n");
    for image in &body.used_images {
        render_image(&mut out, image)?;
    }

    Ok(out)
}

/// `base + offset`, rejecting images that run past the end of the address space.
fn image_address(base: u64, offset: u64) -> Result<u64, TranslateError> {
    base.checked_add(offset).ok_or(TranslateError::InvalidImageRange { base, offset })
}

fn render_thread(
    out: &mut String,
    index: usize,
    thread: &IpsThread,
    crashed: bool,
    images: &[IpsImage],
) -> Result<(), TranslateError> {
    let label = match (thread.name.as_deref(), thread.queue.as_deref()) {
        (Some(name), Some(queue)) => Some(format!("{name}  Dispatch queue: {queue}")),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(queue)) => Some(format!("Dispatch queue: {queue}")),
        (None, None) => None,
    };
    if let Some(label) = label {
        out.push_str(&format!("Thread {index} name:  {label}\n"));
    }
    if crashed {
        out.push_str(&format!("Thread {index} Crashed:\n"));
    } else {
        out.push_str(&format!("Thread {index}:\n"));
    }

    for (frame_index, frame) in thread.frames.iter().enumerate() {
        let Some(image) = frame.image_index.and_then(|i| images.get(i)) else {
            out.push_str(&format!(
                "{frame_index:<3} {:<30}\t{:#018x} ???\n",
                "???", frame.image_offset
            ));
            continue;
        };
        let address = image_address(image.base, frame.image_offset)?;
        match frame.symbol.as_deref() {
            Some(symbol) => out.push_str(&format!(
                "{frame_index:<3} {:<30}\t{address:#018x} {symbol} + {}\n",
                image.frame_name(),
                frame.symbol_location.unwrap_or(0)
            )),
            None => out.push_str(&format!(
                "{frame_index:<3} {:<30}\t{address:#018x} {:#x} + {}\n",
                image.frame_name(),
                image.base,
                frame.image_offset
            )),
        }
    }
    out.push('\n');
    Ok(())
}

fn render_image(out: &mut String, image: &IpsImage) -> Result<(), TranslateError> {
    let Some(raw_uuid) = image.uuid.as_deref() else {
        return Ok(());
    };
    let uuid = match BinaryUuid::parse(raw_uuid) {
        Ok(uuid) => uuid.to_string(),
        Err(_) => raw_uuid.to_uppercase(),
    };
    let end = image_address(image.base, image.size.saturating_sub(1))?;

    let mut line = format!("{:>#18x} - {:>#18x} {}", image.base, end, image.display_name());
    match (image.short_version.as_deref(), image.bundle_version.as_deref()) {
        (Some(v), Some(b)) => line.push_str(&format!(" ({v} - {b})")),
        (Some(v), None) | (None, Some(v)) => line.push_str(&format!(" ({v})")),
        (None, None) => {}
    }
    if let Some(arch) = image.arch.as_deref() {
        line.push(' ');
        line.push_str(arch);
    }
    line.push_str(&format!(" <{uuid}> {}\n", image.path.as_deref().unwrap_or("???")));
    out.push_str(&line);
    Ok(())
}
