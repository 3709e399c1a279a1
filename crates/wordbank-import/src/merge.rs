use std::collections::{BTreeMap, HashSet};

use wordbank_types::{Definition, Example, Pronunciation, WordEntry, WordMetadata, letter_for};

use crate::shards::ShardSet;
use crate::wordlist::normalize_word;

/// Restricts a merge to one cohort's words and tags retained entries.
#[derive(Debug, Clone)]
pub struct CohortFilter {
    pub list_name: String,
    pub words: HashSet<String>,
}

impl CohortFilter {
    fn retains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Child records dropped because their word had no base entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrphanCounts {
    pub definitions: usize,
    pub examples: usize,
    pub pronunciations: usize,
}

impl OrphanCounts {
    pub fn total(&self) -> usize {
        self.definitions + self.examples + self.pronunciations
    }

    pub fn merge(&mut self, other: OrphanCounts) {
        self.definitions += other.definitions;
        self.examples += other.examples;
        self.pronunciations += other.pronunciations;
    }
}

/// Merged entries for one letter, keyed by lowercased word.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub entries: BTreeMap<String, WordEntry>,
    pub orphans: OrphanCounts,
}

/// Combine one letter's shards into denormalized entries.
///
/// Base entries come from the words shard; definition, example and
/// pronunciation records attach to an existing entry by word lookup and
/// are counted as orphans when none exists. With a filter, only the
/// cohort's words survive and each entry is stamped with the list name.
pub fn merge_letter(shards: &ShardSet, filter: Option<&CohortFilter>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for record in &shards.words {
        let word = normalize_word(&record.word);
        let Some(letter) = letter_for(&word) else {
            continue;
        };
        if let Some(filter) = filter
            && !filter.retains(&word)
        {
            continue;
        }

        let mut entry = WordEntry::new(word.clone(), letter);
        entry.metadata = Some(WordMetadata {
            part_of_speech: record.part_of_speech.clone(),
            syllables: record.syllables.clone(),
            etymology: record.etymology.clone(),
        });
        entry.list_name = filter.map(|f| f.list_name.clone());
        outcome.entries.insert(word, entry);
    }

    for record in &shards.definitions {
        let word = normalize_word(&record.word);
        match outcome.entries.get_mut(&word) {
            Some(entry) => {
                entry.push_definition(Definition {
                    definition_text: record.definition_text.clone(),
                    definition_number: record.definition_number,
                });
            }
            None => {
                if filter.is_none_or(|f| f.retains(&word)) {
                    outcome.orphans.definitions += 1;
                }
            }
        }
    }

    for record in &shards.examples {
        let word = normalize_word(&record.word);
        match outcome.entries.get_mut(&word) {
            Some(entry) => {
                entry.push_example(Example {
                    example_text: record.example_text.clone(),
                    example_number: record.example_number,
                    definition_number: record.definition_number,
                });
            }
            None => {
                if filter.is_none_or(|f| f.retains(&word)) {
                    outcome.orphans.examples += 1;
                }
            }
        }
    }

    for record in &shards.pronunciations {
        let word = normalize_word(&record.word);
        match outcome.entries.get_mut(&word) {
            Some(entry) => {
                entry.push_pronunciation(Pronunciation {
                    pronunciation_text: record.pronunciation_text.clone(),
                    audio_url: record.audio_url.clone(),
                    text_pronunciations: record.text_pronunciations.clone(),
                });
            }
            None => {
                if filter.is_none_or(|f| f.retains(&word)) {
                    outcome.orphans.pronunciations += 1;
                }
            }
        }
    }

    outcome
}
