use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dense, zero-based position of an entry inside a corpus.
///
/// Ids are recomputed after every filtering pass, so an `EntryId` is only
/// meaningful against the corpus state it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(usize);

impl EntryId {
    pub fn new(position: usize) -> Self {
        EntryId(position)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provenance tag carried by every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Discussion,
    Preprint,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown source literal: {0:?}")]
pub struct UnknownSource(pub String);

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Discussion => "discussion",
            Source::Preprint => "preprint",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = UnknownSource;

    /// Accepts the canonical literals plus the platform names older corpus
    /// files were written with.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discussion" | "reddit" => Ok(Source::Discussion),
            "preprint" | "arxiv" => Ok(Source::Preprint),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}
