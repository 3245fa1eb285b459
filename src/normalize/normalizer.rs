use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::document::{DisplayMetadata, Document, Timestamp};
use crate::types::identifiers::Source;
use super::raw::{Author, DiscussionPost, OneOrMany, PreprintEntry, RawRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("{kind} record is missing required field `{field}`")]
    MissingField { kind: Source, field: &'static str },
    #[error("{kind} record has an empty `{field}` list")]
    EmptyList { kind: Source, field: &'static str },
    #[error("{kind} record does not match the expected shape: {message}")]
    Shape { kind: Source, message: String },
}

/// A `SchemaMismatch` tied to the position of the record that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index}: {mismatch}")]
pub struct BatchMismatch {
    pub index: usize,
    #[source]
    pub mismatch: SchemaMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Prefixed to a post's relative permalink.
    pub discussion_host: String,
    /// Author used for preprint entries that name nobody.
    pub unknown_author: String,
}

impl NormalizerConfig {
    pub fn v0() -> Self {
        Self {
            discussion_host: "https://reddit.com".into(),
            unknown_author: "Unknown".into(),
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::v0()
    }
}

/// Replace every `\n` with a single space.
pub fn flatten_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize(&self, record: RawRecord) -> Result<Document, SchemaMismatch> {
        match record {
            RawRecord::Discussion(post) => self.normalize_discussion(post),
            RawRecord::Preprint(entry) => self.normalize_preprint(entry),
        }
    }

    /// Normalize records in order, stopping at the first mismatch.
    pub fn normalize_all<I>(&self, records: I) -> Result<Vec<Document>, BatchMismatch>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                self.normalize(record)
                    .map_err(|mismatch| BatchMismatch { index, mismatch })
            })
            .collect()
    }

    fn normalize_discussion(&self, post: DiscussionPost) -> Result<Document, SchemaMismatch> {
        let kind = Source::Discussion;
        let title = post
            .title
            .ok_or(SchemaMismatch::MissingField { kind, field: "title" })?;
        let body = post
            .selftext
            .ok_or(SchemaMismatch::MissingField { kind, field: "selftext" })?;

        let text = flatten_newlines(&format!("{title} {body}"));
        let url = post.permalink.map(|link| self.permalink_url(&link));

        let metadata = DisplayMetadata {
            title: Some(title),
            author: post.author,
            timestamp: post.created_utc.map(Timestamp::Epoch),
            url,
        };

        Ok(Document::new(text, kind).with_metadata(metadata))
    }

    fn normalize_preprint(&self, entry: PreprintEntry) -> Result<Document, SchemaMismatch> {
        let author = self.resolve_author(entry.author.as_ref())?;
        let text = flatten_newlines(entry.summary.as_deref().unwrap_or_default());
        let title = flatten_newlines(entry.title.as_deref().unwrap_or_default());

        if entry.summary.is_none() {
            debug!(id = entry.id.as_deref().unwrap_or_default(), "Preprint entry has no summary");
        }

        let metadata = DisplayMetadata {
            title: Some(title),
            author: Some(author),
            timestamp: Some(Timestamp::Published(entry.published.unwrap_or_default())),
            url: Some(entry.id.unwrap_or_default()),
        };

        Ok(Document::new(text, Source::Preprint).with_metadata(metadata))
    }

    fn resolve_author(
        &self,
        authors: Option<&OneOrMany<Author>>,
    ) -> Result<String, SchemaMismatch> {
        let first = match authors {
            None => None,
            Some(list @ OneOrMany::Many(_)) if list.is_empty() => {
                return Err(SchemaMismatch::EmptyList {
                    kind: Source::Preprint,
                    field: "author",
                })
            }
            Some(list) => list.first(),
        };

        Ok(first
            .and_then(|author| author.name.clone())
            .unwrap_or_else(|| self.config.unknown_author.clone()))
    }

    fn permalink_url(&self, permalink: &str) -> String {
        let host = self.config.discussion_host.trim_end_matches('/');
        if permalink.starts_with('/') {
            format!("{host}{permalink}")
        } else {
            format!("{host}/{permalink}")
        }
    }
}
