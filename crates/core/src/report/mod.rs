//! The crash report aggregate and its construction protocol.
//!
//! Loading a report:
//! 1. reads the source once (unreadable, empty or blank sources are `EmptyFile`),
//! 2. translates JSON-encoded (`.ips`) content into legacy text,
//! 3. resolves the architecture,
//! 4. hands the canonical text to the image and frame catalogs.
//!
//! The set of UUIDs needing symbols is computed on first request and cached.

pub mod arch;
pub mod symbols;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CallCatalog, ImageCatalog, TextCallCatalog, TextImageCatalog};
use crate::model::{Architecture, BinaryImage, BinaryUuid, StackTraceCall};
use crate::translate::{IpsTranslator, ReportTranslator, TranslateError};

pub use arch::{binary_images_architecture, header_architecture, resolve_architecture};
pub use symbols::uuids_for_symbolication;

/// Suffix inserted before the extension of the symbolicated output file.
pub const SYMBOLICATED_SUFFIX: &str = "_symbolicated";

/// Error type for report construction.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The source could not be read, or held no text.
    ///
    /// Unreadable and blank sources are intentionally reported the same way.
    #[error("Crash report is empty or unreadable")]
    EmptyFile,

    /// The JSON-encoded report was rejected by the translator.
    #[error("Failed to translate crash report: {0}")]
    Translation(#[from] TranslateError),

    /// Any other failure raised while translating.
    #[error("Failed to load crash report: {0}")]
    Other(anyhow::Error),
}

impl ReportError {
    /// Classify a translator failure.
    fn from_translator(err: anyhow::Error) -> Self {
        match err.downcast::<TranslateError>() {
            Ok(translation) => ReportError::Translation(translation),
            Err(other) => ReportError::Other(other),
        }
    }
}

/// Encoding of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Legacy `.crash` text, used as-is.
    Legacy,
    /// JSON-encoded `.ips`, translated before parsing.
    Ips,
}

impl ReportFormat {
    /// Classify raw content by its first character.
    pub fn detect(raw: &str) -> Self {
        if raw.starts_with('{') {
            ReportFormat::Ips
        } else {
            ReportFormat::Legacy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Legacy => "legacy",
            ReportFormat::Ips => "ips",
        }
    }
}

/// Sibling path for the symbolicated output: `_symbolicated` goes before the
/// final extension (`/a/b/Report.crash` -> `/a/b/Report_symbolicated.crash`).
///
/// This does *not* touch the filesystem.
pub fn symbolicated_save_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_stem().map(|stem| stem.to_os_string()).unwrap_or_default();
    file_name.push(SYMBOLICATED_SUFFIX);
    if let Some(extension) = path.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    path.with_file_name(file_name)
}

/// Collaborators used to build a [`CrashReport`].
///
/// `ReportLoader::default()` wires the built-in translator and catalogs;
/// `ReportLoader::new` accepts substitutes.
#[derive(Clone, Copy)]
pub struct ReportLoader<'a> {
    pub translator: &'a dyn ReportTranslator,
    pub images: &'a dyn ImageCatalog,
    pub calls: &'a dyn CallCatalog,
}

impl Default for ReportLoader<'static> {
    fn default() -> Self {
        Self { translator: &IpsTranslator, images: &TextImageCatalog, calls: &TextCallCatalog }
    }
}

impl<'a> ReportLoader<'a> {
    pub fn new(
        translator: &'a dyn ReportTranslator,
        images: &'a dyn ImageCatalog,
        calls: &'a dyn CallCatalog,
    ) -> Self {
        Self { translator, images, calls }
    }

    /// Read, translate if needed, and parse the report at `path`.
    ///
    /// Reads the source exactly once and invokes the translator at most once.
    /// Nothing is written.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<CrashReport, ReportError> {
        let path = path.as_ref();
        let span = tracing::info_span!("load_report", path = %path.display());
        let _guard = span.enter();

        let raw = match fs::read_to_string(path) {
            Ok(raw) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                tracing::warn!("crash report is blank");
                return Err(ReportError::EmptyFile);
            }
            Err(err) => {
                tracing::warn!(%err, "crash report is unreadable");
                return Err(ReportError::EmptyFile);
            }
        };

        let format = ReportFormat::detect(&raw);
        tracing::debug!(format = format.as_str(), "detected report format");

        let content = match format {
            ReportFormat::Legacy => raw,
            ReportFormat::Ips => {
                let translated = self.translator.translate(path).map_err(|err| {
                    let err = ReportError::from_translator(err);
                    tracing::warn!(%err, "translation failed");
                    err
                })?;
                if translated.trim().is_empty() {
                    tracing::warn!("translation produced no text");
                    return Err(ReportError::EmptyFile);
                }
                translated
            }
        };

        let architecture = resolve_architecture(&content);
        let binary_images = self.images.find(&content);
        let calls = self.calls.find(&content);
        tracing::debug!(
            ?architecture,
            images = binary_images.len(),
            calls = calls.len(),
            "parsed crash report"
        );

        Ok(CrashReport {
            path: path.to_path_buf(),
            filename: display_name(path),
            format,
            content,
            architecture,
            binary_images,
            calls,
            symbolicated_content: OnceLock::new(),
            uuids_for_symbolication: OnceLock::new(),
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
}

/// One ingested crash report.
///
/// Everything except the symbolicated content is fixed at construction.
#[derive(Debug)]
pub struct CrashReport {
    path: PathBuf,
    filename: String,
    format: ReportFormat,
    content: String,
    architecture: Option<Architecture>,
    binary_images: Vec<BinaryImage>,
    calls: Vec<StackTraceCall>,
    symbolicated_content: OnceLock<String>,
    uuids_for_symbolication: OnceLock<BTreeSet<BinaryUuid>>,
}

impl CrashReport {
    /// Load the report at `path` with the built-in translator and catalogs.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        ReportLoader::default().load(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component of the source.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Encoding the source was in before translation.
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Canonical legacy-text content (translated when the source was JSON).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// `None` when the report names no recognizable architecture.
    pub fn architecture(&self) -> Option<Architecture> {
        self.architecture
    }

    pub fn binary_images(&self) -> &[BinaryImage] {
        &self.binary_images
    }

    pub fn calls(&self) -> &[StackTraceCall] {
        &self.calls
    }

    /// Where the symbolicated copy of this report should be written.
    pub fn symbolicated_save_path(&self) -> PathBuf {
        symbolicated_save_path(&self.path)
    }

    /// UUIDs of the images referenced by the backtraces.
    ///
    /// Computed on first call; later calls (from any thread) return the same set.
    pub fn uuids_for_symbolication(&self) -> &BTreeSet<BinaryUuid> {
        self.uuids_for_symbolication.get_or_init(|| {
            let uuids = uuids_for_symbolication(&self.calls, &self.binary_images);
            tracing::debug!(count = uuids.len(), "resolved UUIDs needing symbols");
            uuids
        })
    }

    pub fn symbolicated_content(&self) -> Option<&str> {
        self.symbolicated_content.get().map(String::as_str)
    }

    /// Store the output of the symbolication step.
    ///
    /// The slot can be filled once; a second write hands the content back.
    pub fn set_symbolicated_content(&self, content: String) -> Result<(), String> {
        self.symbolicated_content.set(content)
    }
}
