//! Schema module - Recording document types and JSON loading.

mod document;
mod load;

pub use document::*;
pub use load::*;
