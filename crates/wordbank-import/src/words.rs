use std::fs;
use std::path::Path;

use wordbank_store::{WORDS_TABLE, WordStore};
use wordbank_types::SourceWord;

use crate::ImportError;
use crate::upload::UploadStats;

/// Upload every `.txt` and `.json` file under `dir` as raw word rows.
///
/// Text files contribute one trimmed, original-case word per line; JSON
/// files contribute one row per array element, the element serialized
/// back to a string. Each row carries the file it came from and rows go
/// to the shared words table in fixed-size batches.
pub async fn import_words(
    store: &dyn WordStore,
    dir: &Path,
    batch_size: usize,
) -> Result<UploadStats, ImportError> {
    let mut text_files = Vec::new();
    let mut json_files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => text_files.push(path),
            Some("json") => json_files.push(path),
            _ => {}
        }
    }
    text_files.sort();
    json_files.sort();

    let mut stats = UploadStats::default();
    for file in &text_files {
        tracing::info!("processing text file {}", file.display());
        stats.merge(upload_rows(store, &text_rows(file), batch_size).await);
    }
    for file in &json_files {
        tracing::info!("processing json file {}", file.display());
        let rows = json_rows(file);
        if rows.is_empty() {
            tracing::info!("no data found in {}", file.display());
            continue;
        }
        stats.merge(upload_rows(store, &rows, batch_size).await);
    }

    Ok(stats)
}

fn source_name(file: &Path) -> String {
    file.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn text_rows(file: &Path) -> Vec<SourceWord> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed to read {}: {}", file.display(), e);
            return Vec::new();
        }
    };
    let source_file = source_name(file);

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|word| SourceWord {
            word: word.to_string(),
            source_file: source_file.clone(),
        })
        .collect()
}

fn json_rows(file: &Path) -> Vec<SourceWord> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed to read {}: {}", file.display(), e);
            return Vec::new();
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("invalid json file {}: {}", file.display(), e);
            return Vec::new();
        }
    };
    let source_file = source_name(file);

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };
    items
        .iter()
        .filter_map(|item| serde_json::to_string(item).ok())
        .map(|word| SourceWord {
            word,
            source_file: source_file.clone(),
        })
        .collect()
}

async fn upload_rows(store: &dyn WordStore, rows: &[SourceWord], batch_size: usize) -> UploadStats {
    let mut stats = UploadStats::default();
    if rows.is_empty() {
        return stats;
    }

    let batch_size = batch_size.max(1);
    let total_batches = rows.len().div_ceil(batch_size);

    for (index, batch) in rows.chunks(batch_size).enumerate() {
        match store.upsert_source_words(WORDS_TABLE, batch).await {
            Ok(()) => {
                stats.succeeded += batch.len();
                tracing::info!(
                    "batch {}/{} complete ({} words)",
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
