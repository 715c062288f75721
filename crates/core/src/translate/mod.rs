//! Translation of JSON-encoded (`.ips`) crash reports into legacy text.
//!
//! The legacy `.crash` text is what the catalog parsers understand, so a
//! report in the JSON encoding is rendered into that form before anything
//! else looks at it.

mod ips;

use std::path::Path;

use thiserror::Error;

pub use ips::IpsTranslator;

/// The translator rejected the report content.
///
/// I/O problems while reaching the content are reported as plain
/// `anyhow::Error`s instead, so callers can tell the two apart.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("IPS report has no body after the header line")]
    MissingBody,
    #[error("IPS header is not valid JSON: {0}")]
    InvalidHeader(#[source] serde_json::Error),
    #[error("IPS body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),
    #[error("Unsupported IPS bug type {0} (only crash reports are supported)")]
    UnsupportedBugType(String),
    /// An image base plus an offset into it does not fit in 64 bits.
    #[error("IPS image at {base:#x} overflows the address space (offset {offset:#x})")]
    InvalidImageRange { base: u64, offset: u64 },
}

/// Converts a JSON-encoded report at `path` into legacy text.
pub trait ReportTranslator: Send + Sync {
    fn translate(&self, path: &Path) -> anyhow::Result<String>;
}
