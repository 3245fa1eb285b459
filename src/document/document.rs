use serde::{Deserialize, Serialize};

use crate::types::identifiers::Source;
use super::metadata::DisplayMetadata;

/// The canonical, source-tagged text record.
///
/// Documents coming out of the normalizer never contain `\n` in `text`.
/// Documents rebuilt from a corpus file carry whatever text was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub source: Source,
    #[serde(default, skip_serializing_if = "DisplayMetadata::is_empty")]
    pub metadata: DisplayMetadata,
}

impl Document {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Document {
            text: text.into(),
            source,
            metadata: DisplayMetadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: DisplayMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
