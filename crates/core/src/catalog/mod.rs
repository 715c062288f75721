//! Catalog parsers that turn legacy crash-report text into records.
//!
//! The report aggregate only depends on the two traits below, so tests (and
//! other frontends) can substitute fabricated catalogs.

pub mod calls;
pub mod images;

use crate::model::{BinaryImage, StackTraceCall};

pub use calls::TextCallCatalog;
pub use images::TextImageCatalog;

/// Produces the loaded-image table from canonical report text.
pub trait ImageCatalog: Send + Sync {
    /// Images in table order.
    fn find(&self, content: &str) -> Vec<BinaryImage>;
}

/// Produces the stack frames from canonical report text.
pub trait CallCatalog: Send + Sync {
    /// Frames in report order, across all threads.
    fn find(&self, content: &str) -> Vec<StackTraceCall>;
}
