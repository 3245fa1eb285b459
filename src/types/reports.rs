use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::identifiers::{EntryId, Source};

/// Result of an operation that has nothing to do on an empty corpus.
///
/// `Empty` is not a failure: callers log it and carry on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "report", rename_all = "snake_case")]
pub enum Outcome<T> {
    Completed(T),
    Empty,
}

impl<T> Outcome<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(report) => Some(report),
            Outcome::Empty => None,
        }
    }

    pub fn as_completed(&self) -> Option<&T> {
        match self {
            Outcome::Completed(report) => Some(report),
            Outcome::Empty => None,
        }
    }
}

/// Counts reported by a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub min_length: usize,
    pub before: usize,
    pub after: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReport {
    pub path: PathBuf,
    pub documents: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source: Source,
    pub count: usize,
}

/// Simple counts for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetrics {
    pub id: EntryId,
    /// Whitespace-delimited tokens.
    pub words: usize,
    /// Literal `.` characters.
    pub sentences: usize,
    pub chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSummary {
    pub mean_words: f64,
    pub min_words: usize,
    pub max_words: usize,
    pub mean_sentences: f64,
    pub mean_chars: f64,
}

/// Read-only summary of a populated corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_documents: usize,
    /// Descending count, ties in first-seen order.
    pub per_source: Vec<SourceCount>,
    pub documents: Vec<DocumentMetrics>,
    pub summary: TextSummary,
}

impl CorpusStats {
    pub fn count_for(&self, source: Source) -> usize {
        self.per_source
            .iter()
            .find(|c| c.source == source)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// Display copy of an entry. `text` may be shortened; the stored entry is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEntry {
    pub id: EntryId,
    pub source: Source,
    pub text: String,
    pub truncated: bool,
}
