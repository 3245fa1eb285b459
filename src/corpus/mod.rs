pub mod config;
pub mod store;
pub mod stats;
pub mod persistence;

pub use config::{ConfigError, CorpusConfig};
pub use store::{Corpus, CorpusState, Entry};
pub use persistence::{escape_field, unescape_field, EscapeError, FormatError, PersistError};
