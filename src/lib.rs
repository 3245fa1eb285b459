//! Normalization and corpus management for short text documents.
//!
//! `corpus-core` maps raw records from a discussion platform and a preprint
//! feed onto one canonical [`Document`](document::Document) shape, keeps them
//! in an ordered [`Corpus`](corpus::Corpus) with dense ids, and provides
//! cleaning, statistics, sampling, and a lossless tab-separated file format.
//!
//! Every operation returns structured values. Progress is reported through
//! `tracing` events; installing a subscriber is left to the caller.

pub mod acquisition;
pub mod corpus;
pub mod document;
pub mod normalize;
pub mod types;

pub use corpus::{Corpus, CorpusConfig};
pub use document::Document;
pub use normalize::{Normalizer, RawRecord};
pub use types::{EntryId, Outcome, Source};
