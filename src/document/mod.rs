pub mod metadata;
pub mod document;

pub use crate::types::identifiers::Source;
pub use metadata::{DisplayMetadata, Timestamp};
pub use document::Document;
