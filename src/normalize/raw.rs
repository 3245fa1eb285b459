use serde::{Deserialize, Serialize};

use crate::types::identifiers::Source;
use super::normalizer::SchemaMismatch;

/// A field that arrives as a single object or as a list, depending on how
/// many values the upstream feed had.
///
/// `Many` is listed first so that untagged deserialization never reads a
/// list as a positional struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// A post as returned by the discussion-platform client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscussionPost {
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub author: Option<String>,
    pub created_utc: Option<f64>,
    /// Relative to the platform host, e.g. `/r/rust/comments/abc/`.
    pub permalink: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: Option<String>,
}

/// One `<entry>` of a preprint feed, after XML-to-map conversion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprintEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub author: Option<OneOrMany<Author>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedBody {
    pub entry: Option<OneOrMany<PreprintEntry>>,
}

/// A whole preprint feed document: `{"feed": {"entry": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprintFeed {
    pub feed: FeedBody,
}

impl PreprintFeed {
    pub fn from_json(value: serde_json::Value) -> Result<Self, SchemaMismatch> {
        serde_json::from_value(value).map_err(|e| SchemaMismatch::Shape {
            kind: Source::Preprint,
            message: e.to_string(),
        })
    }

    /// Zero, one, or many entries; a feed without `entry` has none.
    pub fn into_records(self) -> Vec<RawRecord> {
        self.feed
            .entry
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(RawRecord::Preprint)
            .collect()
    }
}

/// An unvalidated record from one of the two acquisition clients.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Discussion(DiscussionPost),
    Preprint(PreprintEntry),
}

impl RawRecord {
    pub fn source(&self) -> Source {
        match self {
            RawRecord::Discussion(_) => Source::Discussion,
            RawRecord::Preprint(_) => Source::Preprint,
        }
    }

    /// Parse a loosely-typed record of a known source kind.
    pub fn from_json(kind: Source, value: serde_json::Value) -> Result<Self, SchemaMismatch> {
        let shape = |e: serde_json::Error| SchemaMismatch::Shape {
            kind,
            message: e.to_string(),
        };

        match kind {
            Source::Discussion => serde_json::from_value(value)
                .map(RawRecord::Discussion)
                .map_err(shape),
            Source::Preprint => serde_json::from_value(value)
                .map(RawRecord::Preprint)
                .map_err(shape),
        }
    }
}
