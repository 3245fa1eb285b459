use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::corpus::config::CorpusConfig;
use crate::corpus::stats;
use crate::document::Document;
use crate::types::identifiers::{EntryId, Source};
use crate::types::reports::{CleanReport, CorpusStats, Outcome, SampleEntry};

/// One row of the corpus table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
    pub source: Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusState {
    Empty,
    Populated,
}

/// Ordered collection of documents with dense ids.
///
/// Ids are always `0..len()` in order. Every operation that removes rows
/// runs an explicit renumbering pass before returning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    entries: Vec<Entry>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        let entries: Vec<Entry> = documents
            .into_iter()
            .enumerate()
            .map(|(i, doc)| Entry {
                id: EntryId::new(i),
                text: doc.text,
                source: doc.source,
            })
            .collect();

        if entries.is_empty() {
            warn!("Corpus created without documents");
        } else {
            info!(documents = entries.len(), "Corpus created");
        }

        let corpus = Corpus { entries };
        debug_assert!(corpus.ids_are_dense());
        corpus
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> CorpusState {
        if self.is_empty() {
            CorpusState::Empty
        } else {
            CorpusState::Populated
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.as_usize())
    }

    /// Text and source of every entry, in id order.
    pub fn documents(&self) -> Vec<Document> {
        self.entries
            .iter()
            .map(|e| Document::new(e.text.clone(), e.source))
            .collect()
    }

    /// Drop entries whose text is `min_length` characters or shorter.
    pub fn clean(&mut self, min_length: usize) -> Outcome<CleanReport> {
        if self.is_empty() {
            warn!("No documents to clean");
            return Outcome::Empty;
        }

        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.text.chars().count() > min_length);
        self.renumber();
        let after = self.entries.len();

        let report = CleanReport {
            min_length,
            before,
            after,
            removed: before - after,
        };
        info!(
            min_length,
            before = report.before,
            after = report.after,
            removed = report.removed,
            "Corpus cleaned"
        );
        Outcome::Completed(report)
    }

    pub fn clean_with(&mut self, config: &CorpusConfig) -> Outcome<CleanReport> {
        self.clean(config.min_length)
    }

    pub fn stats(&self) -> Outcome<CorpusStats> {
        match stats::compute(&self.entries) {
            Some(stats) => {
                info!(
                    documents = stats.total_documents,
                    mean_words = stats.summary.mean_words,
                    "Corpus statistics computed"
                );
                Outcome::Completed(stats)
            }
            None => {
                warn!("Corpus is empty; no statistics");
                Outcome::Empty
            }
        }
    }

    /// All texts joined by a single space, in id order.
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            warn!("Corpus is empty; nothing to concatenate");
            return String::new();
        }

        let joined = self
            .entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(chars = joined.chars().count(), "Corpus concatenated");
        joined
    }

    /// First `n` entries with text shortened to `width` characters.
    pub fn sample(&self, n: usize, width: usize) -> Vec<SampleEntry> {
        if self.is_empty() {
            warn!("Corpus is empty; nothing to sample");
            return Vec::new();
        }

        self.entries
            .iter()
            .take(n)
            .map(|entry| {
                let truncated = entry.text.chars().count() > width;
                let text = if truncated {
                    entry.text.chars().take(width).collect()
                } else {
                    entry.text.clone()
                };
                SampleEntry {
                    id: entry.id,
                    source: entry.source,
                    text,
                    truncated,
                }
            })
            .collect()
    }

    pub fn sample_with(&self, config: &CorpusConfig) -> Vec<SampleEntry> {
        self.sample(config.sample_size, config.sample_width)
    }

    fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.id = EntryId::new(i);
        }
        debug_assert!(self.ids_are_dense());
    }

    fn ids_are_dense(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.id.as_usize() == i)
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Corpus({} documents)", self.len())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
