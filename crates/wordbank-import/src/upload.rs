use wordbank_store::WordStore;
use wordbank_types::WordEntry;

/// Aggregate result of a batched upload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    pub succeeded: usize,
    pub failed: usize,
}

impl UploadStats {
    pub fn merge(&mut self, other: UploadStats) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

/// Upsert `entries` into `table` in fixed-size batches.
///
/// A rejected batch is logged with its index and counted as failed; later
/// batches are still attempted.
pub async fn upload_entries(
    store: &dyn WordStore,
    table: &str,
    entries: &[WordEntry],
    batch_size: usize,
) -> UploadStats {
    let mut stats = UploadStats::default();
    if entries.is_empty() {
        return stats;
    }

    let batch_size = batch_size.max(1);
    let total_batches = entries.len().div_ceil(batch_size);

    for (index, batch) in entries.chunks(batch_size).enumerate() {
        match store.upsert_words(table, batch).await {
            Ok(()) => {
                stats.succeeded += batch.len();
                tracing::info!(
                    "batch {}/{} complete ({} entries)",
                    index + 1,
                    total_batches,
                    batch.len()
                );
            }
            Err(e) => {
                stats.failed += batch.len();
                tracing::error!("batch {}/{} failed: {}", index + 1, total_batches, e);
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use wordbank_store::MemoryStore;

    use super::*;

    fn entries(count: usize) -> Vec<WordEntry> {
        (0..count)
            .map(|i| WordEntry::new(format!("word{i:04}"), 'W'))
            .collect()
    }

    #[tokio::test]
    async fn entries_split_into_fixed_size_batches() {
        let store = MemoryStore::new();
        let stats = upload_entries(&store, "dictionary", &entries(120), 100).await;

        assert_eq!(stats.succeeded, 120);
        assert_eq!(stats.failed, 0);
        assert_eq!(store.upsert_batches().await, vec![100, 20]);
        assert_eq!(store.rows("dictionary").await.len(), 120);
    }

    #[tokio::test]
    async fn failed_batch_does_not_stop_later_ones() {
        let store = MemoryStore::failing_next(1);
        let stats = upload_entries(&store, "dictionary", &entries(120), 100).await;

        assert_eq!(stats.succeeded, 20);
        assert_eq!(stats.failed, 100);
        assert_eq!(store.upsert_batches().await, vec![100, 20]);
        assert_eq!(store.rows("dictionary").await.len(), 20);
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let store = MemoryStore::new();
        let stats = upload_entries(&store, "dictionary", &[], 100).await;

        assert_eq!(stats, UploadStats::default());
        assert!(store.upsert_batches().await.is_empty());
    }
}
