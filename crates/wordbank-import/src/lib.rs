pub mod cohort;
pub mod dispatch;
pub mod lists;
pub mod merge;
pub mod report;
pub mod shards;
pub mod upload;
pub mod wordlist;
pub mod words;

use wordbank_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
