use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wordbank_config::{ImportConfig, StoreConfig};
use wordbank_import::dispatch::{DispatchOptions, import_dictionary};
use wordbank_import::lists::{ListOptions, ListSource, import_word_lists};
use wordbank_import::report::check_missing;
use wordbank_import::words::import_words;
use wordbank_store::{MemoryStore, RestStore, WordStore};
use wordbank_types::FrequencyCategory;

#[derive(Parser)]
#[command(
    name = "wordbank",
    about = "Bulk-load dictionary shards and word lists into the remote store"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// The three word-list files, one per frequency category.
#[derive(Args)]
struct ListFiles {
    #[arg(long, default_value = "frequent_words_cwl.txt")]
    frequent: PathBuf,

    #[arg(long, default_value = "moderate_words_cwl.txt")]
    moderate: PathBuf,

    #[arg(long, default_value = "infrequent_words_cwl.txt")]
    infrequent: PathBuf,
}

impl ListFiles {
    fn sources(&self) -> Vec<ListSource> {
        vec![
            ListSource {
                category: FrequencyCategory::Frequent,
                path: self.frequent.clone(),
            },
            ListSource {
                category: FrequencyCategory::Moderate,
                path: self.moderate.clone(),
            },
            ListSource {
                category: FrequencyCategory::Infrequent,
                path: self.infrequent.clone(),
            },
        ]
    }
}

#[derive(Subcommand)]
enum Command {
    /// Import every letter's dictionary shards into the dictionary table
    ImportDictionary {
        #[arg(long)]
        shard_dir: Option<PathBuf>,

        /// Use an in-memory store instead of the remote one
        #[arg(long)]
        dry_run: bool,
    },

    /// Upload every .txt and .json file in a directory as raw word rows
    ImportWords {
        /// Directory to scan for word files
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Use an in-memory store instead of the remote one
        #[arg(long)]
        dry_run: bool,
    },

    /// Split the word lists into cohorts and upload each to its own table
    ImportLists {
        #[command(flatten)]
        lists: ListFiles,

        #[arg(long)]
        shard_dir: Option<PathBuf>,

        /// Fixed shuffle seed for reproducible cohort assignment
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "missing_words_report.txt")]
        report: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Report list words absent from the dictionary shards, without uploading
    CheckMissing {
        #[command(flatten)]
        lists: ListFiles,

        #[arg(long)]
        shard_dir: Option<PathBuf>,

        #[arg(long, default_value = "missing_words_report.txt")]
        report: PathBuf,
    },
}

fn make_store(dry_run: bool) -> anyhow::Result<Arc<dyn WordStore>> {
    if dry_run {
        tracing::info!("dry run: using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = StoreConfig::from_env().context("loading store credentials")?;
    Ok(Arc::new(RestStore::new(store.url, store.key)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env.local wins over .env when both exist
    if dotenvy::from_filename(".env.local").is_err() {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ImportConfig::new();

    match cli.command {
        Command::ImportDictionary { shard_dir, dry_run } => {
            let store = make_store(dry_run)?;
            let shard_dir = shard_dir.unwrap_or_else(|| config.shard_dir.clone());
            let options = DispatchOptions {
                batch_size: config.dictionary_batch_size,
                max_workers: config.max_workers,
            };

            let stats = import_dictionary(store, &shard_dir, &options)
                .await
                .context("dictionary import failed")?;
            println!("Successfully uploaded: {} entries", stats.succeeded);
            println!("Failed to upload: {} entries", stats.failed);
        }

        Command::ImportWords { dir, dry_run } => {
            let store = make_store(dry_run)?;

            let stats = import_words(store.as_ref(), &dir, config.dictionary_batch_size)
                .await
                .context("raw word import failed")?;
            println!("Successfully uploaded: {} words", stats.succeeded);
            println!("Failed to upload: {} words", stats.failed);
        }

        Command::ImportLists {
            lists,
            shard_dir,
            seed,
            report,
            dry_run,
        } => {
            let store = make_store(dry_run)?;
            let shard_dir = shard_dir.unwrap_or_else(|| config.shard_dir.clone());
            let options = ListOptions {
                batch_size: config.cohort_batch_size,
                cohort_size: config.cohort_size,
                seed: seed.or(config.shuffle_seed),
            };

            let outcome = import_word_lists(store, &shard_dir, &lists.sources(), &options)
                .await
                .context("word list import failed")?;
            outcome
                .report
                .write(&report)
                .context("writing missing words report")?;
            println!("Successfully uploaded: {} entries", outcome.stats.succeeded);
            println!("Failed to upload: {} entries", outcome.stats.failed);
        }

        Command::CheckMissing {
            lists,
            shard_dir,
            report,
        } => {
            let shard_dir = shard_dir.unwrap_or_else(|| config.shard_dir.clone());
            let missing = check_missing(&shard_dir, &lists.sources())
                .context("checking missing words")?;
            missing
                .write(&report)
                .context("writing missing words report")?;
            println!("Report generated: {}", report.display());
        }
    }

    Ok(())
}
