pub mod raw;
pub mod normalizer;

pub use raw::{Author, DiscussionPost, FeedBody, OneOrMany, PreprintEntry, PreprintFeed, RawRecord};
pub use normalizer::{flatten_newlines, BatchMismatch, Normalizer, NormalizerConfig, SchemaMismatch};
