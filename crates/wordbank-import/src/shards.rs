use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ImportError;

/// File-name marker every dictionary shard carries.
pub const SHARD_MARKER: &str = "dictionary_data.json_";

/// Record type a shard file holds, keyed off its name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardKind {
    Words,
    Definitions,
    Examples,
    Pronunciations,
}

impl ShardKind {
    pub fn from_file_name(name: &str) -> Option<ShardKind> {
        if name.ends_with("_words.json") {
            Some(ShardKind::Words)
        } else if name.ends_with("_definitions.json") {
            Some(ShardKind::Definitions)
        } else if name.ends_with("_examples.json") {
            Some(ShardKind::Examples)
        } else if name.ends_with("_pronunciations.json") {
            Some(ShardKind::Pronunciations)
        } else {
            None
        }
    }
}

/// Base record from a `_words.json` shard.
#[derive(Debug, Clone, Deserialize)]
pub struct WordRecord {
    pub word: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub syllables: Option<String>,
    #[serde(default)]
    pub etymology: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionRecord {
    pub word: String,
    pub definition_text: String,
    pub definition_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExampleRecord {
    pub word: String,
    pub example_text: String,
    pub example_number: u32,
    pub definition_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PronunciationRecord {
    pub word: String,
    pub pronunciation_text: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub text_pronunciations: Option<Vec<String>>,
}

/// All parsed shard data for one letter.
#[derive(Debug, Default)]
pub struct ShardSet {
    pub words: Vec<WordRecord>,
    pub definitions: Vec<DefinitionRecord>,
    pub examples: Vec<ExampleRecord>,
    pub pronunciations: Vec<PronunciationRecord>,
}

fn is_shard_file(name: &str) -> bool {
    name.contains(SHARD_MARKER) && !name.contains("metadata")
}

/// Letter a shard file belongs to: the character after the marker, uppercased.
pub fn shard_letter(name: &str) -> Option<char> {
    let rest = name.split(SHARD_MARKER).nth(1)?;
    let c = rest.chars().next()?;
    c.is_ascii_alphabetic().then(|| c.to_ascii_uppercase())
}

/// Enumerate shard files under `dir`, metadata files excluded.
pub fn find_shard_files(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_shard_file(name) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Group shard files by letter, in stable letter order.
pub fn shard_files_by_letter(dir: &Path) -> Result<BTreeMap<char, Vec<PathBuf>>, ImportError> {
    let mut by_letter: BTreeMap<char, Vec<PathBuf>> = BTreeMap::new();
    for file in find_shard_files(dir)? {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(letter) = shard_letter(name) {
            by_letter.entry(letter).or_default().push(file);
        }
    }
    Ok(by_letter)
}

/// Parse one shard file as a JSON array of records.
///
/// Read and parse failures are logged and yield None; the caller keeps
/// whatever other shards did load.
pub(crate) fn load_records<T: DeserializeOwned>(file: &Path) -> Option<Vec<T>> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed to read shard {}: {}", file.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::error!("invalid shard {}: {}", file.display(), e);
            None
        }
    }
}

/// Load every shard file for one letter, partial on per-file failure.
pub fn load_letter(files: &[PathBuf]) -> ShardSet {
    let mut shards = ShardSet::default();
    for file in files {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(kind) = ShardKind::from_file_name(name) else {
            continue;
        };
        match kind {
            ShardKind::Words => {
                if let Some(records) = load_records::<WordRecord>(file) {
                    shards.words.extend(records);
                }
            }
            ShardKind::Definitions => {
                if let Some(records) = load_records::<DefinitionRecord>(file) {
                    shards.definitions.extend(records);
                }
            }
            ShardKind::Examples => {
                if let Some(records) = load_records::<ExampleRecord>(file) {
                    shards.examples.extend(records);
                }
            }
            ShardKind::Pronunciations => {
                if let Some(records) = load_records::<PronunciationRecord>(file) {
                    shards.pronunciations.extend(records);
                }
            }
        }
    }
    shards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_names_classify_by_suffix() {
        assert_eq!(
            ShardKind::from_file_name("dictionary_data.json_a_words.json"),
            Some(ShardKind::Words)
        );
        assert_eq!(
            ShardKind::from_file_name("dictionary_data.json_a_definitions.json"),
            Some(ShardKind::Definitions)
        );
        assert_eq!(
            ShardKind::from_file_name("dictionary_data.json_q_examples.json"),
            Some(ShardKind::Examples)
        );
        assert_eq!(
            ShardKind::from_file_name("dictionary_data.json_z_pronunciations.json"),
            Some(ShardKind::Pronunciations)
        );
        assert_eq!(ShardKind::from_file_name("readme.txt"), None);
    }

    #[test]
    fn letter_comes_from_char_after_marker() {
        assert_eq!(shard_letter("dictionary_data.json_a_words.json"), Some('A'));
        assert_eq!(
            shard_letter("dictionary_data.json_z_definitions.json"),
            Some('Z')
        );
        assert_eq!(shard_letter("dictionary_data.json_1_words.json"), None);
        assert_eq!(shard_letter("unrelated.json"), None);
    }

    #[test]
    fn metadata_files_are_not_shards() {
        assert!(is_shard_file("dictionary_data.json_a_words.json"));
        assert!(!is_shard_file("dictionary_data.json_a_metadata.json"));
        assert!(!is_shard_file("notes.json"));
    }

    #[test]
    fn malformed_shard_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("dictionary_data.json_a_words.json");
        let bad = dir.path().join("dictionary_data.json_a_definitions.json");
        std::fs::write(&good, r#"[{"word": "apple"}]"#).unwrap();
        std::fs::write(&bad, "{not json").unwrap();

        let shards = load_letter(&[good, bad]);
        assert_eq!(shards.words.len(), 1);
        assert!(shards.definitions.is_empty());
    }

    #[test]
    fn files_group_by_letter() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "dictionary_data.json_a_words.json",
            "dictionary_data.json_a_definitions.json",
            "dictionary_data.json_b_words.json",
            "dictionary_data.json_b_metadata.json",
        ] {
            std::fs::write(dir.path().join(name), "[]").unwrap();
        }

        let by_letter = shard_files_by_letter(dir.path()).unwrap();
        assert_eq!(by_letter.keys().copied().collect::<Vec<_>>(), vec!['A', 'B']);
        assert_eq!(by_letter[&'A'].len(), 2);
        assert_eq!(by_letter[&'B'].len(), 1);
    }
}
