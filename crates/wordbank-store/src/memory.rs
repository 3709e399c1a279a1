use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;
use wordbank_types::{SourceWord, WordEntry};

use crate::{StoreError, WordStore};

/// In-memory stand-in for the remote store.
///
/// Backs `--dry-run` and tests. Upserts overwrite by word key, every
/// upsert call's batch size is recorded, and a fixed number of leading
/// upsert calls can be scripted to fail.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, BTreeMap<String, WordEntry>>,
    source_tables: HashMap<String, BTreeMap<String, SourceWord>>,
    upsert_batches: Vec<usize>,
    fail_remaining: usize,
    indexes_created: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose first `n` upsert calls are rejected.
    pub fn failing_next(n: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                fail_remaining: n,
                ..Inner::default()
            }),
        }
    }

    pub async fn rows(&self, table: &str) -> Vec<WordEntry> {
        let inner = self.inner.lock().await;
        inner
            .tables
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn row(&self, table: &str, word: &str) -> Option<WordEntry> {
        let inner = self.inner.lock().await;
        inner.tables.get(table).and_then(|rows| rows.get(word)).cloned()
    }

    pub async fn source_rows(&self, table: &str) -> Vec<SourceWord> {
        let inner = self.inner.lock().await;
        inner
            .source_tables
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn table_names(&self) -> Vec<String> {
        let inner = self.inner.lock().await;
        let mut names: Vec<_> = inner.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Batch size of every upsert call seen so far, failed ones included.
    pub async fn upsert_batches(&self) -> Vec<usize> {
        self.inner.lock().await.upsert_batches.clone()
    }

    pub async fn indexes_created(&self) -> bool {
        self.inner.lock().await.indexes_created
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn upsert_words(&self, table: &str, entries: &[WordEntry]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.upsert_batches.push(entries.len());

        if inner.fail_remaining > 0 {
            inner.fail_remaining -= 1;
            return Err(StoreError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        let rows = inner.tables.entry(table.to_string()).or_default();
        for entry in entries {
            rows.insert(entry.word.clone(), entry.clone());
        }
        Ok(())
    }

    async fn upsert_source_words(
        &self,
        table: &str,
        rows: &[SourceWord],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.upsert_batches.push(rows.len());

        if inner.fail_remaining > 0 {
            inner.fail_remaining -= 1;
            return Err(StoreError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        let table_rows = inner.source_tables.entry(table.to_string()).or_default();
        for row in rows {
            table_rows.insert(row.word.clone(), row.clone());
        }
        Ok(())
    }

    async fn create_word_table(&self, table: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.tables.entry(table.to_string()).or_default();
        Ok(())
    }

    async fn create_dictionary_indexes(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.indexes_created = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, part_of_speech: Option<&str>) -> WordEntry {
        let mut entry = WordEntry::new(word, 'A');
        entry.metadata = part_of_speech.map(|pos| wordbank_types::WordMetadata {
            part_of_speech: Some(pos.to_string()),
            syllables: None,
            etymology: None,
        });
        entry
    }

    #[tokio::test]
    async fn upserting_same_word_twice_keeps_one_row_with_latest_values() {
        let store = MemoryStore::new();
        store
            .upsert_words("dictionary", &[entry("apple", Some("noun"))])
            .await
            .unwrap();
        store
            .upsert_words("dictionary", &[entry("apple", Some("verb"))])
            .await
            .unwrap();

        let rows = store.rows("dictionary").await;
        assert_eq!(rows.len(), 1);
        let metadata = rows[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.part_of_speech.as_deref(), Some("verb"));
    }

    #[tokio::test]
    async fn source_word_upsert_overwrites_by_word() {
        let store = MemoryStore::new();
        let first = SourceWord {
            word: "Apple".to_string(),
            source_file: "a.txt".to_string(),
        };
        let second = SourceWord {
            word: "Apple".to_string(),
            source_file: "b.txt".to_string(),
        };
        store.upsert_source_words("words", &[first]).await.unwrap();
        store.upsert_source_words("words", &[second]).await.unwrap();

        let rows = store.source_rows("words").await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_file, "b.txt");
    }

    #[tokio::test]
    async fn scripted_failures_reject_then_recover() {
        let store = MemoryStore::failing_next(1);
        let err = store
            .upsert_words("dictionary", &[entry("apple", None)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 500, .. }));
        assert!(store.rows("dictionary").await.is_empty());

        store
            .upsert_words("dictionary", &[entry("banana", None)])
            .await
            .unwrap();
        assert_eq!(store.rows("dictionary").await.len(), 1);
        assert_eq!(store.upsert_batches().await, vec![1, 1]);
    }
}
