//! Seams for the two acquisition clients and the aggregation that turns
//! their output into one ordered list of documents.
//!
//! Network access, authentication and retries live in the client
//! implementations, not here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::corpus::{Corpus, CorpusConfig};
use crate::document::Document;
use crate::normalize::{BatchMismatch, DiscussionPost, Normalizer, PreprintEntry, RawRecord};
use crate::types::identifiers::Source;

pub const PREPRINT_API_BASE: &str = "http://export.arxiv.org/api/query";

/// Failure reported by a client. Passed through unchanged.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("{kind} client failed: {error}")]
    Fetch {
        kind: Source,
        #[source]
        error: FetchError,
    },
    #[error("{kind} record rejected: {error}")]
    Schema {
        kind: Source,
        #[source]
        error: BatchMismatch,
    },
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

pub trait DiscussionSource {
    fn fetch_discussion_records(
        &self,
        keyword: &str,
        limit: usize,
        credentials: &Credentials,
    ) -> Result<Vec<DiscussionPost>, FetchError>;
}

pub trait PreprintSource {
    fn fetch_preprint_records(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<PreprintEntry>, FetchError>;
}

/// Independent per-source caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionLimits {
    pub discussion: usize,
    pub preprint: usize,
}

impl Default for AcquisitionLimits {
    fn default() -> Self {
        Self {
            discussion: 20,
            preprint: 20,
        }
    }
}

/// Query the preprint client issues against the export API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprintQuery {
    pub keyword: String,
    pub max_results: usize,
}

impl PreprintQuery {
    pub fn new(keyword: impl Into<String>, max_results: usize) -> Self {
        Self {
            keyword: keyword.into(),
            max_results,
        }
    }

    pub fn url(&self) -> String {
        let terms = self.keyword.replace(' ', "+");
        format!(
            "{PREPRINT_API_BASE}?search_query=all:{terms}&start=0&max_results={}",
            self.max_results
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionReport {
    pub keyword: String,
    /// Discussion documents first, then preprint documents.
    pub documents: Vec<Document>,
    pub discussion_count: usize,
    pub preprint_count: usize,
}

impl AcquisitionReport {
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    pub fn into_corpus(self) -> Corpus {
        Corpus::new(self.documents)
    }
}

pub struct Acquisition<D, P> {
    discussion: D,
    preprint: P,
    credentials: Credentials,
    normalizer: Normalizer,
}

impl<D, P> Acquisition<D, P>
where
    D: DiscussionSource,
    P: PreprintSource,
{
    pub fn new(discussion: D, preprint: P, credentials: Credentials) -> Self {
        Self {
            discussion,
            preprint,
            credentials,
            normalizer: Normalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_config(self, config: &CorpusConfig) -> Self {
        self.with_normalizer(Normalizer::from(config))
    }

    /// Fetch from both clients with the same keyword, normalize, and
    /// concatenate. No deduplication, no retry.
    pub fn collect(
        &self,
        keyword: &str,
        limits: AcquisitionLimits,
    ) -> Result<AcquisitionReport, AcquisitionError> {
        info!(keyword, ?limits, "Acquiring documents");

        let posts = self
            .discussion
            .fetch_discussion_records(keyword, limits.discussion, &self.credentials)
            .map_err(|error| AcquisitionError::Fetch {
                kind: Source::Discussion,
                error,
            })?;
        let mut documents = self
            .normalizer
            .normalize_all(posts.into_iter().map(RawRecord::Discussion))
            .map_err(|error| AcquisitionError::Schema {
                kind: Source::Discussion,
                error,
            })?;
        let discussion_count = documents.len();
        info!(documents = discussion_count, "Discussion documents fetched");

        let entries = self
            .preprint
            .fetch_preprint_records(keyword, limits.preprint)
            .map_err(|error| AcquisitionError::Fetch {
                kind: Source::Preprint,
                error,
            })?;
        let preprints = self
            .normalizer
            .normalize_all(entries.into_iter().map(RawRecord::Preprint))
            .map_err(|error| AcquisitionError::Schema {
                kind: Source::Preprint,
                error,
            })?;
        let preprint_count = preprints.len();
        info!(documents = preprint_count, "Preprint documents fetched");

        documents.extend(preprints);
        info!(
            total = documents.len(),
            discussion = discussion_count,
            preprint = preprint_count,
            "Acquisition complete"
        );

        Ok(AcquisitionReport {
            keyword: keyword.to_string(),
            documents,
            discussion_count,
            preprint_count,
        })
    }
}
