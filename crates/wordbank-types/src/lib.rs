use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One sense of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition_text: String,
    pub definition_number: u32,
}

/// Usage example, tied to a definition by its ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub example_text: String,
    pub example_number: u32,
    pub definition_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub pronunciation_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_pronunciations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMetadata {
    pub part_of_speech: Option<String>,
    pub syllables: Option<String>,
    pub etymology: Option<String>,
}

/// Denormalized dictionary row, one per word.
///
/// Child lists stay free of duplicates as long as they are only grown
/// through the `push_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub letter: char,
    pub definitions: Vec<Definition>,
    pub examples: Vec<Example>,
    pub pronunciations: Vec<Pronunciation>,
    pub metadata: Option<WordMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, letter: char) -> Self {
        Self {
            word: word.into(),
            letter,
            definitions: Vec::new(),
            examples: Vec::new(),
            pronunciations: Vec::new(),
            metadata: None,
            list_name: None,
        }
    }

    /// Append a definition unless one with the same text and ordinal exists.
    pub fn push_definition(&mut self, definition: Definition) -> bool {
        let duplicate = self.definitions.iter().any(|d| {
            d.definition_number == definition.definition_number
                && d.definition_text == definition.definition_text
        });
        if duplicate {
            return false;
        }
        self.definitions.push(definition);
        true
    }

    /// Append an example unless one with the same text exists.
    pub fn push_example(&mut self, example: Example) -> bool {
        let duplicate = self
            .examples
            .iter()
            .any(|e| e.example_text == example.example_text);
        if duplicate {
            return false;
        }
        self.examples.push(example);
        true
    }

    /// Append a pronunciation unless one with the same phonetic text exists.
    pub fn push_pronunciation(&mut self, pronunciation: Pronunciation) -> bool {
        let duplicate = self
            .pronunciations
            .iter()
            .any(|p| p.pronunciation_text == pronunciation.pronunciation_text);
        if duplicate {
            return false;
        }
        self.pronunciations.push(pronunciation);
        true
    }
}

/// Raw row for the plain words table: the word text plus the file it
/// came from. Unlike dictionary entries, the word keeps its original
/// casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWord {
    pub word: String,
    pub source_file: String,
}

/// First character of the word, uppercased. None for an empty word.
pub fn letter_for(word: &str) -> Option<char> {
    let first = word.chars().next()?;
    Some(first.to_uppercase().next().unwrap_or(first))
}

/// How common a word is in general usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyCategory {
    Frequent,
    Moderate,
    Infrequent,
}

impl FrequencyCategory {
    pub const ALL: [FrequencyCategory; 3] = [
        FrequencyCategory::Frequent,
        FrequencyCategory::Moderate,
        FrequencyCategory::Infrequent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyCategory::Frequent => "frequent",
            FrequencyCategory::Moderate => "moderate",
            FrequencyCategory::Infrequent => "infrequent",
        }
    }

    /// Capitalized form used in report headings.
    pub fn title(&self) -> &'static str {
        match self {
            FrequencyCategory::Frequent => "Frequent",
            FrequencyCategory::Moderate => "Moderate",
            FrequencyCategory::Infrequent => "Infrequent",
        }
    }
}

impl fmt::Display for FrequencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyCategory {
    type Err = CohortNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frequent" => Ok(FrequencyCategory::Frequent),
            "moderate" => Ok(FrequencyCategory::Moderate),
            "infrequent" => Ok(FrequencyCategory::Infrequent),
            other => Err(CohortNameError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CohortNameError {
    #[error("not a cohort table name: {0}")]
    BadPattern(String),

    #[error("unknown frequency category: {0}")]
    UnknownCategory(String),

    #[error("bad cohort index: {0}")]
    BadIndex(String),
}

/// Identifies one cohort's upload table.
///
/// Owns both directions of the `cwl_<category>_list_<n>` naming pattern so
/// nothing else has to parse table names by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CohortId {
    pub category: FrequencyCategory,
    /// 1-based position within the category.
    pub index: u32,
}

impl CohortId {
    pub fn table_name(&self) -> String {
        format!("cwl_{}_list_{}", self.category, self.index)
    }
}

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cwl_{}_list_{}", self.category, self.index)
    }
}

impl FromStr for CohortId {
    type Err = CohortNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("cwl_")
            .ok_or_else(|| CohortNameError::BadPattern(s.to_string()))?;
        let (category, index) = rest
            .split_once("_list_")
            .ok_or_else(|| CohortNameError::BadPattern(s.to_string()))?;
        let category = category.parse()?;
        let index: u32 = index
            .parse()
            .map_err(|_| CohortNameError::BadIndex(index.to_string()))?;
        if index == 0 {
            return Err(CohortNameError::BadIndex(index.to_string()));
        }
        Ok(CohortId { category, index })
    }
}

/// A randomly assigned group of words uploaded to its own table.
#[derive(Debug, Clone)]
pub struct WordCohort {
    pub id: CohortId,
    pub words: Vec<String>,
}
