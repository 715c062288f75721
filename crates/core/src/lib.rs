//! crashlog-core
//!
//! Core library for turning a single crash report into a symbolication-ready
//! model.
//!
//! This crate defines the data model (architectures, binary UUIDs, image and
//! frame records), the translator for JSON-encoded reports, the catalog
//! parsers for legacy report text, and the `CrashReport` aggregate that ties
//! them together and derives which binaries need symbols.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends (CLI, GUI, etc.).

pub mod catalog;
pub mod model;
pub mod report;
pub mod translate;

pub use model::{Architecture, BinaryImage, BinaryUuid, StackTraceCall};
pub use report::{CrashReport, ReportError, ReportFormat, ReportLoader};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
