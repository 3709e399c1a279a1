use std::collections::HashSet;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

/// Read a newline-delimited word list into a normalized set.
///
/// A missing or unreadable file is logged and treated as empty so the run
/// can continue with reduced data.
pub fn read_word_list(path: &Path) -> HashSet<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed to read word list {}: {}", path.display(), e);
            return HashSet::new();
        }
    };

    content
        .lines()
        .map(normalize_word)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Trim, NFKC-normalize and lowercase one word.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().nfkc().collect::<String>().to_lowercase()
}
