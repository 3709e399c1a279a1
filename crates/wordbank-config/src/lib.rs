use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Connection credentials for the remote row store.
///
/// Both values are required; a run without them fails at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Endpoint URL
    pub url: String,
    /// Access key sent with every request
    pub key: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("STORE_URL").map_err(|_| ConfigError::MissingVar("STORE_URL"))?;
        let key = env::var("STORE_KEY").map_err(|_| ConfigError::MissingVar("STORE_KEY"))?;

        Ok(Self { url, key })
    }
}

/// Pipeline tuning, all optional with defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory holding the per-letter shard files
    pub shard_dir: PathBuf,
    /// Batch size for the full-dictionary import
    pub dictionary_batch_size: usize,
    /// Batch size for cohort uploads
    pub cohort_batch_size: usize,
    /// Maximum words per cohort
    pub cohort_size: usize,
    /// Cap on concurrent worker tasks
    pub max_workers: usize,
    /// Fixed shuffle seed; unset means OS-seeded
    pub shuffle_seed: Option<u64>,
}

impl ImportConfig {
    pub fn new() -> Self {
        let shard_dir = env::var("SHARD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let dictionary_batch_size = env::var("DICTIONARY_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let cohort_batch_size = env::var("COHORT_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        let cohort_size = env::var("COHORT_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        let max_workers = env::var("MAX_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8);

        let shuffle_seed = env::var("SHUFFLE_SEED").ok().and_then(|v| v.parse().ok());

        Self {
            shard_dir,
            dictionary_batch_size,
            cohort_batch_size,
            cohort_size,
            max_workers,
            shuffle_seed,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new()
    }
}
