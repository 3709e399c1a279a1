use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use tokio::task::JoinHandle;
use wordbank_store::{DICTIONARY_TABLE, WordStore};

use crate::ImportError;
use crate::merge::merge_letter;
use crate::shards;
use crate::upload::{UploadStats, upload_entries};

/// Tuning for the parallel dictionary import.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub batch_size: usize,
    pub max_workers: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_workers: 8,
        }
    }
}

/// Import every letter's shards into the dictionary table.
///
/// Letters are split across worker tasks, at most
/// min(available parallelism, max_workers) of them; each worker loads,
/// merges and uploads its letters sequentially. A panicked worker is
/// logged and skipped, the remaining workers still complete. The
/// index-creation RPC runs only when at least one entry uploaded.
pub async fn import_dictionary(
    store: Arc<dyn WordStore>,
    shard_dir: &Path,
    options: &DispatchOptions,
) -> Result<UploadStats, ImportError> {
    let by_letter = shards::shard_files_by_letter(shard_dir)?;
    let letters: Vec<char> = by_letter.keys().copied().collect();
    if letters.is_empty() {
        tracing::warn!("no shard files found in {}", shard_dir.display());
        return Ok(UploadStats::default());
    }

    let parallelism = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    let workers = parallelism
        .min(options.max_workers.max(1))
        .min(letters.len());
    let chunk_size = letters.len().div_ceil(workers);

    tracing::info!(
        "processing {} letters across {} workers",
        letters.len(),
        workers
    );

    let mut handles = Vec::new();
    for (index, chunk) in letters.chunks(chunk_size).enumerate() {
        let store = Arc::clone(&store);
        let batch_size = options.batch_size;
        let chunk: Vec<(char, Vec<PathBuf>)> = chunk
            .iter()
            .map(|letter| (*letter, by_letter[letter].clone()))
            .collect();
        handles.push(tokio::spawn(worker(index, store, chunk, batch_size)));
    }

    let stats = join_workers(handles).await;

    if stats.succeeded > 0 {
        tracing::info!("creating dictionary indexes");
        store.create_dictionary_indexes().await?;
    }

    tracing::info!(
        "import complete: {} uploaded, {} failed",
        stats.succeeded,
        stats.failed
    );
    Ok(stats)
}

/// Join worker tasks, folding their counts.
///
/// A panicked worker is logged and skipped so the remaining workers still
/// aggregate; failure isolation matches the per-batch policy inside each
/// worker.
async fn join_workers(handles: Vec<JoinHandle<UploadStats>>) -> UploadStats {
    let mut stats = UploadStats::default();
    for handle in handles {
        match handle.await {
            Ok(worker_stats) => stats.merge(worker_stats),
            Err(e) => tracing::error!("worker task failed: {}", e),
        }
    }
    stats
}

async fn worker(
    index: usize,
    store: Arc<dyn WordStore>,
    chunk: Vec<(char, Vec<PathBuf>)>,
    batch_size: usize,
) -> UploadStats {
    let letters: String = chunk.iter().map(|(letter, _)| *letter).collect();
    tracing::info!("worker {} processing letters: {}", index, letters);

    let mut stats = UploadStats::default();
    for (letter, files) in &chunk {
        let shards = shards::load_letter(files);
        let outcome = merge_letter(&shards, None);
        if outcome.orphans.total() > 0 {
            tracing::info!(
                "letter {}: dropped {} orphan child records ({} definitions, {} examples, {} pronunciations)",
                letter,
                outcome.orphans.total(),
                outcome.orphans.definitions,
                outcome.orphans.examples,
                outcome.orphans.pronunciations
            );
        }

        let entries: Vec<_> = outcome.entries.into_values().collect();
        tracing::info!(
            "worker {} uploading letter {}: {} entries",
            index,
            letter,
            entries.len()
        );
        stats.merge(upload_entries(store.as_ref(), DICTIONARY_TABLE, &entries, batch_size).await);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panicked_worker_is_skipped_and_the_rest_still_count() {
        let good: JoinHandle<UploadStats> = tokio::spawn(async {
            UploadStats {
                succeeded: 7,
                failed: 2,
            }
        });
        let bad: JoinHandle<UploadStats> = tokio::spawn(async { panic!("worker blew up") });
        let also_good: JoinHandle<UploadStats> = tokio::spawn(async {
            UploadStats {
                succeeded: 1,
                failed: 0,
            }
        });

        let stats = join_workers(vec![good, bad, also_good]).await;
        assert_eq!(
            stats,
            UploadStats {
                succeeded: 8,
                failed: 2,
            }
        );
    }
}
