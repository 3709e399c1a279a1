use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use wordbank_store::WordStore;
use wordbank_types::{FrequencyCategory, WordEntry};

use crate::ImportError;
use crate::cohort::build_cohorts;
use crate::merge::{CohortFilter, OrphanCounts, merge_letter};
use crate::report::MissingWordsReport;
use crate::shards;
use crate::upload::{UploadStats, upload_entries};
use crate::wordlist::read_word_list;

/// One word-list file and its frequency category.
#[derive(Debug, Clone)]
pub struct ListSource {
    pub category: FrequencyCategory,
    pub path: PathBuf,
}

/// Tuning for the cohort import.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub batch_size: usize,
    pub cohort_size: usize,
    pub seed: Option<u64>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            batch_size: 50,
            cohort_size: 500,
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct ListImportOutcome {
    pub stats: UploadStats,
    pub report: MissingWordsReport,
}

/// Import each category's word list as randomly assigned cohorts.
///
/// Per cohort: create its table, merge every letter's shards under the
/// cohort filter, record which cohort words never merged, then upload.
/// Table creation failure is fatal; upload failures are isolated per
/// batch as usual.
pub async fn import_word_lists(
    store: Arc<dyn WordStore>,
    shard_dir: &Path,
    sources: &[ListSource],
    options: &ListOptions,
) -> Result<ListImportOutcome, ImportError> {
    let by_letter = shards::shard_files_by_letter(shard_dir)?;

    let mut stats = UploadStats::default();
    let mut report = MissingWordsReport::default();

    for source in sources {
        let words = read_word_list(&source.path);
        tracing::info!("read {} words from {}", words.len(), source.path.display());

        let cohorts = build_cohorts(&words, source.category, options.cohort_size, options.seed);
        tracing::info!("created {} cohorts for {}", cohorts.len(), source.category);

        let mut missing: BTreeSet<String> = BTreeSet::new();
        for cohort in &cohorts {
            let table = cohort.id.table_name();
            tracing::info!("processing cohort {} ({} words)", table, cohort.words.len());

            store.create_word_table(&table).await?;

            let filter = CohortFilter {
                list_name: table.clone(),
                words: cohort.words.iter().cloned().collect(),
            };

            let mut entries: BTreeMap<String, WordEntry> = BTreeMap::new();
            let mut orphans = OrphanCounts::default();
            for files in by_letter.values() {
                let shards = shards::load_letter(files);
                let outcome = merge_letter(&shards, Some(&filter));
                orphans.merge(outcome.orphans);
                entries.extend(outcome.entries);
            }
            if orphans.total() > 0 {
                tracing::info!(
                    "cohort {}: dropped {} orphan child records",
                    table,
                    orphans.total()
                );
            }
            tracing::info!("merged {} entries for {}", entries.len(), table);

            for word in &cohort.words {
                if !entries.contains_key(word) {
                    missing.insert(word.clone());
                }
            }

            let rows: Vec<_> = entries.into_values().collect();
            stats.merge(upload_entries(store.as_ref(), &table, &rows, options.batch_size).await);
        }

        report.push_section(source.category, words.len(), missing.into_iter().collect());
    }

    Ok(ListImportOutcome { stats, report })
}
