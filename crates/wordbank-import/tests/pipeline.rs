use std::path::Path;
use std::sync::Arc;

use wordbank_import::dispatch::{DispatchOptions, import_dictionary};
use wordbank_import::lists::{ListOptions, ListSource, import_word_lists};
use wordbank_store::MemoryStore;
use wordbank_types::FrequencyCategory;

fn write_shard(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn seed_shards(dir: &Path) {
    write_shard(
        dir,
        "dictionary_data.json_a_words.json",
        r#"[
            {"word": "apple", "part_of_speech": "noun", "syllables": "ap-ple", "etymology": null},
            {"word": "anchor", "part_of_speech": "noun"}
        ]"#,
    );
    write_shard(
        dir,
        "dictionary_data.json_a_definitions.json",
        r#"[
            {"word": "apple", "definition_text": "a round fruit", "definition_number": 1},
            {"word": "apple", "definition_text": "a round fruit", "definition_number": 1},
            {"word": "aardvark", "definition_text": "orphan", "definition_number": 1}
        ]"#,
    );
    write_shard(
        dir,
        "dictionary_data.json_a_pronunciations.json",
        r#"[{"word": "apple", "pronunciation_text": "AP-uhl", "audio_url": "https://example.com/a.mp3"}]"#,
    );
    write_shard(
        dir,
        "dictionary_data.json_b_words.json",
        r#"[{"word": "banana", "part_of_speech": "noun"}]"#,
    );
    // metadata files never load
    write_shard(dir, "dictionary_data.json_a_metadata.json", "not even json");
}

#[tokio::test]
async fn dictionary_import_merges_uploads_and_creates_indexes() {
    let dir = tempfile::tempdir().unwrap();
    seed_shards(dir.path());

    let store = Arc::new(MemoryStore::new());
    let stats = import_dictionary(
        store.clone(),
        dir.path(),
        &DispatchOptions {
            batch_size: 100,
            max_workers: 8,
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.succeeded, 3);
    assert_eq!(stats.failed, 0);
    assert!(store.indexes_created().await);

    let apple = store.row("dictionary", "apple").await.unwrap();
    assert_eq!(apple.letter, 'A');
    assert_eq!(apple.definitions.len(), 1);
    assert_eq!(apple.pronunciations.len(), 1);
    assert!(apple.list_name.is_none());

    let banana = store.row("dictionary", "banana").await.unwrap();
    assert_eq!(banana.letter, 'B');
    assert!(banana.definitions.is_empty());

    // orphan child record never became a row
    assert!(store.row("dictionary", "aardvark").await.is_none());
}

#[tokio::test]
async fn empty_shard_dir_skips_index_creation() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());

    let stats = import_dictionary(store.clone(), dir.path(), &DispatchOptions::default())
        .await
        .unwrap();

    assert_eq!(stats.succeeded, 0);
    assert!(!store.indexes_created().await);
    assert!(store.upsert_batches().await.is_empty());
}

#[tokio::test]
async fn list_import_tracks_missing_words_and_tags_rows() {
    let dir = tempfile::tempdir().unwrap();
    seed_shards(dir.path());
    let list = dir.path().join("frequent_words_cwl.txt");
    std::fs::write(&list, "apple\nzzznotfound\n").unwrap();

    let store = Arc::new(MemoryStore::new());
    let sources = [ListSource {
        category: FrequencyCategory::Frequent,
        path: list,
    }];
    let outcome = import_word_lists(
        store.clone(),
        dir.path(),
        &sources,
        &ListOptions {
            batch_size: 50,
            cohort_size: 500,
            seed: Some(1),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.stats.succeeded, 1);
    assert_eq!(store.table_names().await, vec!["cwl_frequent_list_1"]);

    let apple = store.row("cwl_frequent_list_1", "apple").await.unwrap();
    assert_eq!(apple.list_name.as_deref(), Some("cwl_frequent_list_1"));

    let section = &outcome.report.sections[0];
    assert_eq!(section.total_words, 2);
    assert_eq!(section.missing_words, vec!["zzznotfound".to_string()]);
    assert!(outcome.report.render().contains("Missing: 1\nzzznotfound\n"));
}

#[tokio::test]
async fn rerunning_unchanged_inputs_reproduces_the_report() {
    let dir = tempfile::tempdir().unwrap();
    seed_shards(dir.path());
    let list = dir.path().join("moderate_words_cwl.txt");
    std::fs::write(&list, "banana\napple\nmissingone\nmissingtwo\n").unwrap();

    let sources = [ListSource {
        category: FrequencyCategory::Moderate,
        path: list,
    }];
    let options = ListOptions {
        batch_size: 50,
        cohort_size: 500,
        seed: Some(99),
    };

    let first = import_word_lists(Arc::new(MemoryStore::new()), dir.path(), &sources, &options)
        .await
        .unwrap();
    let second = import_word_lists(Arc::new(MemoryStore::new()), dir.path(), &sources, &options)
        .await
        .unwrap();

    assert_eq!(first.report, second.report);
    assert_eq!(first.report.render(), second.report.render());
}

#[tokio::test]
async fn large_category_splits_into_multiple_tables() {
    let dir = tempfile::tempdir().unwrap();
    // dictionary only knows three of the words
    write_shard(
        dir.path(),
        "dictionary_data.json_w_words.json",
        r#"[
            {"word": "word0000"}, {"word": "word0001"}, {"word": "word0002"}
        ]"#,
    );
    let words: Vec<String> = (0..1200).map(|i| format!("word{i:04}")).collect();
    let list = dir.path().join("infrequent_words_cwl.txt");
    std::fs::write(&list, words.join("\n")).unwrap();

    let store = Arc::new(MemoryStore::new());
    let sources = [ListSource {
        category: FrequencyCategory::Infrequent,
        path: list,
    }];
    let outcome = import_word_lists(
        store.clone(),
        dir.path(),
        &sources,
        &ListOptions {
            batch_size: 50,
            cohort_size: 500,
            seed: Some(5),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        store.table_names().await,
        vec![
            "cwl_infrequent_list_1",
            "cwl_infrequent_list_2",
            "cwl_infrequent_list_3"
        ]
    );
    assert_eq!(outcome.stats.succeeded, 3);
    assert_eq!(outcome.report.sections[0].missing_words.len(), 1197);
}
