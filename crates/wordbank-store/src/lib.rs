use async_trait::async_trait;
use wordbank_types::{SourceWord, WordEntry};

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Table the full-dictionary import targets.
pub const DICTIONARY_TABLE: &str = "dictionary";

/// Table the raw word uploader targets.
pub const WORDS_TABLE: &str = "words";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected request ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Row-store operations the import pipeline needs.
///
/// The pipeline only ever sees this trait; the concrete client is injected
/// so tests can substitute an in-memory one.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Insert-or-update a batch of entries, resolving conflicts on `word`.
    async fn upsert_words(&self, table: &str, entries: &[WordEntry]) -> Result<(), StoreError>;

    /// Insert-or-update a batch of raw word rows, resolving conflicts on `word`.
    async fn upsert_source_words(&self, table: &str, rows: &[SourceWord])
    -> Result<(), StoreError>;

    /// Create a word-list table with the fixed schema and its indexes.
    async fn create_word_table(&self, table: &str) -> Result<(), StoreError>;

    /// Create the supporting indexes on the dictionary table.
    async fn create_dictionary_indexes(&self) -> Result<(), StoreError>;
}
