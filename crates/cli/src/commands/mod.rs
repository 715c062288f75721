pub mod catalog;
pub mod report;
pub mod translate;

pub use catalog::*;
pub use report::*;
pub use translate::*;
