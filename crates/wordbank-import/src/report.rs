use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use wordbank_types::FrequencyCategory;

use crate::ImportError;
use crate::lists::ListSource;
use crate::shards::{self, ShardKind, WordRecord};
use crate::wordlist::{normalize_word, read_word_list};

/// One frequency category's section of the missing-words report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: FrequencyCategory,
    /// Size of the input word list
    pub total_words: usize,
    pub missing_words: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MissingWordsReport {
    pub sections: Vec<CategorySection>,
}

impl MissingWordsReport {
    /// Add a category section. Missing words are sorted so re-runs over
    /// unchanged inputs render identically.
    pub fn push_section(
        &mut self,
        category: FrequencyCategory,
        total_words: usize,
        mut missing_words: Vec<String>,
    ) {
        missing_words.sort();
        missing_words.dedup();
        self.sections.push(CategorySection {
            category,
            total_words,
            missing_words,
        });
    }

    /// Flat text rendering: a header, then per category the counts and one
    /// missing word per line.
    pub fn render(&self) -> String {
        let mut out = String::from("Missing Words Report\n===================\n");
        for section in &self.sections {
            out.push('\n');
            let _ = writeln!(out, "{} Words:", section.category.title());
            let _ = writeln!(out, "Total words in list: {}", section.total_words);
            let _ = writeln!(out, "Missing: {}", section.missing_words.len());
            for word in &section.missing_words {
                out.push_str(word);
                out.push('\n');
            }
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<(), ImportError> {
        fs::write(path, self.render())?;
        tracing::info!("missing words report written to {}", path.display());
        Ok(())
    }
}

/// Diff each category's word list against the words shards alone.
///
/// This is the standalone check: no merge, no upload, just which list
/// words have no base dictionary entry at all.
pub fn check_missing(
    shard_dir: &Path,
    sources: &[ListSource],
) -> Result<MissingWordsReport, ImportError> {
    let mut dictionary_words: HashSet<String> = HashSet::new();
    for file in shards::find_shard_files(shard_dir)? {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if ShardKind::from_file_name(name) != Some(ShardKind::Words) {
            continue;
        }
        if let Some(records) = shards::load_records::<WordRecord>(&file) {
            dictionary_words.extend(records.iter().map(|r| normalize_word(&r.word)));
        }
    }

    let mut report = MissingWordsReport::default();
    for source in sources {
        let words = read_word_list(&source.path);
        let missing: Vec<String> = words
            .iter()
            .filter(|word| !dictionary_words.contains(*word))
            .cloned()
            .collect();
        report.push_section(source.category, words.len(), missing);
    }

    Ok(report)
}
