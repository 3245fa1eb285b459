use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::{Normalizer, NormalizerConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

// Serializable, comparable, explicit defaults.
// Keys missing from a config file fall back to v0().
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Entries with this many characters or fewer are dropped by `clean`.
    pub min_length: usize,
    pub sample_size: usize,
    /// Display width of sampled text, in characters.
    pub sample_width: usize,
    pub normalizer: NormalizerConfig,
}

impl CorpusConfig {
    pub fn v0() -> Self {
        Self {
            min_length: 20,
            sample_size: 5,
            sample_width: 200,
            normalizer: NormalizerConfig::v0(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let f = File::open(path)?;
        Self::from_reader(BufReader::new(f))
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::v0()
    }
}

impl From<&CorpusConfig> for Normalizer {
    fn from(config: &CorpusConfig) -> Self {
        Normalizer::new(config.normalizer.clone())
    }
}
