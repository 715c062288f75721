use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::CallCatalog;
use crate::model::StackTraceCall;

fn re_thread_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Thread\s+(\d+)(?:\s+Crashed)?:")
            .expect("re_thread_header: pattern is valid and should always compile")
    })
}

fn re_frame_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)\s+(.+?)\s+(0x[0-9a-fA-F]+)\s+(0x[0-9a-fA-F]+)\s+\+\s+(\d+)")
            .expect("re_frame_line: pattern is valid and should always compile")
    })
}

/// Parses unsymbolicated backtrace frames
/// (`index image address load_address + offset`).
///
/// Frames that already carry a symbol (`address symbol + offset`) do not
/// match and are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCallCatalog;

impl CallCatalog for TextCallCatalog {
    fn find(&self, content: &str) -> Vec<StackTraceCall> {
        let mut calls = Vec::new();
        let mut thread = None;

        for line in content.lines() {
            if let Some(caps) = re_thread_header().captures(line) {
                thread = caps[1].parse().ok();
                continue;
            }
            if line.starts_with("Last Exception Backtrace") {
                thread = None;
                continue;
            }
            if let Some(call) = parse_frame_line(line) {
                calls.push(call.with_thread(thread));
            }
        }

        calls
    }
}

/// Parse a single frame line, without thread attribution.
pub fn parse_frame_line(line: &str) -> Option<StackTraceCall> {
    let caps = re_frame_line().captures(line)?;
    let (Ok(frame_index), Ok(offset)) = (caps[1].parse::<u32>(), caps[5].parse::<u64>()) else {
        tracing::trace!(line, "skipping frame with out-of-range numbers");
        return None;
    };

    Some(StackTraceCall::new(frame_index, &caps[2], &caps[3], &caps[4], offset))
}
