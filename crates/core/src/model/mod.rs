//! Core data model for a parsed crash report.
//!
//! - `Architecture`: processor architecture named by the report
//! - `BinaryUuid`: build identifier of a loaded image
//! - `BinaryImage`: one row of the loaded-image table
//! - `StackTraceCall`: one stack frame
//!
//! Load addresses are kept as the exact tokens printed in the report. Images
//! and frames are joined by string equality on those tokens, never by numeric
//! value, because reports differ in zero-padding and case.

mod architecture;
mod binary_uuid;

use serde::{Deserialize, Serialize};

pub use architecture::{Architecture, ArchitectureParseError};
pub use binary_uuid::{BinaryUuid, UuidParseError};

/// One entry of the `Binary Images:` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryImage {
    /// Start of the image's memory region, as printed (e.g. `0x104a8c000`).
    pub load_address: String,
    /// End of the region, as printed, when the row carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
    /// Bundle identifier or file name shown on the row.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Per-image architecture tag, when the row names a recognized one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    pub uuid: BinaryUuid,
    /// On-disk path of the image at crash time.
    pub path: String,
}

impl BinaryImage {
    /// Create an image row; the name defaults to the last path component.
    pub fn new(load_address: impl Into<String>, uuid: BinaryUuid, path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            load_address: load_address.into(),
            end_address: None,
            name,
            version: None,
            architecture: None,
            uuid,
            path,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_end_address(mut self, end_address: Option<String>) -> Self {
        self.end_address = end_address;
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_architecture(mut self, architecture: Option<Architecture>) -> Self {
        self.architecture = architecture;
        self
    }
}

/// One frame of a thread backtrace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackTraceCall {
    /// Thread the frame belongs to, when a `Thread N:` header preceded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<u32>,
    pub frame_index: u32,
    /// Image name column as printed on the frame line.
    pub image_name: String,
    /// Absolute address of the frame, as printed.
    pub address: String,
    /// Load address of the owning image; joins against `BinaryImage::load_address`.
    pub load_address: String,
    /// Byte offset of `address` from `load_address`.
    pub offset: u64,
}

impl StackTraceCall {
    pub fn new(
        frame_index: u32,
        image_name: impl Into<String>,
        address: impl Into<String>,
        load_address: impl Into<String>,
        offset: u64,
    ) -> Self {
        Self {
            thread: None,
            frame_index,
            image_name: image_name.into(),
            address: address.into(),
            load_address: load_address.into(),
            offset,
        }
    }

    pub fn with_thread(mut self, thread: Option<u32>) -> Self {
        self.thread = thread;
        self
    }
}
