use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use wordbank_types::{CohortId, FrequencyCategory, WordCohort};

/// Shuffle a category's words and split them into named cohorts of at
/// most `cohort_size` words.
///
/// Words are sorted before shuffling so the same seed always yields the
/// same cohorts regardless of set iteration order. Without a seed the
/// shuffle is OS-seeded.
pub fn build_cohorts(
    words: &HashSet<String>,
    category: FrequencyCategory,
    cohort_size: usize,
    seed: Option<u64>,
) -> Vec<WordCohort> {
    let mut shuffled: Vec<String> = words.iter().cloned().collect();
    shuffled.sort();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    shuffled.shuffle(&mut rng);

    shuffled
        .chunks(cohort_size.max(1))
        .enumerate()
        .map(|(i, chunk)| WordCohort {
            id: CohortId {
                category,
                index: i as u32 + 1,
            },
            words: chunk.to_vec(),
        })
        .collect()
}
