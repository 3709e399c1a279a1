use async_trait::async_trait;
use serde_json::json;
use wordbank_types::{SourceWord, WordEntry};

use crate::{StoreError, WordStore};

/// PostgREST-style client for the hosted row store.
#[derive(Clone)]
pub struct RestStore {
    base_url: String,
    key: String,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(base_url: String, key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Call a remote procedure by name.
    async fn rpc(&self, function: &str, params: serde_json::Value) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);
        let response = self.request(url).json(&params).send().await?;
        Self::check(response).await
    }

    async fn check(response: reqwest::Response) -> Result<(), StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl WordStore for RestStore {
    async fn upsert_words(&self, table: &str, entries: &[WordEntry]) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/{}?on_conflict=word", self.base_url, table);
        let response = self
            .request(url)
            .header("Prefer", "resolution=merge-duplicates")
            .json(entries)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn upsert_source_words(
        &self,
        table: &str,
        rows: &[SourceWord],
    ) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/{}?on_conflict=word", self.base_url, table);
        let response = self
            .request(url)
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn create_word_table(&self, table: &str) -> Result<(), StoreError> {
        self.rpc("exec_sql", json!({ "sql": word_table_sql(table) }))
            .await?;
        tracing::info!("created table {}", table);
        Ok(())
    }

    async fn create_dictionary_indexes(&self) -> Result<(), StoreError> {
        self.rpc("create_dictionary_indexes", json!({})).await
    }
}

/// DDL for one word-list table. Matches the dictionary schema plus the
/// cohort tag, with the word as the upsert key.
fn word_table_sql(table: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {table} (
  id BIGSERIAL PRIMARY KEY,
  word TEXT NOT NULL,
  letter CHAR(1) NOT NULL,
  definitions JSONB NOT NULL DEFAULT '[]'::jsonb,
  examples JSONB NOT NULL DEFAULT '[]'::jsonb,
  pronunciations JSONB NOT NULL DEFAULT '[]'::jsonb,
  metadata JSONB,
  list_name TEXT NOT NULL,
  created_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW()),
  UNIQUE(word)
);

CREATE INDEX IF NOT EXISTS idx_{table}_word ON {table}(word);
CREATE INDEX IF NOT EXISTS idx_{table}_letter ON {table}(letter);
CREATE INDEX IF NOT EXISTS idx_{table}_metadata ON {table} USING gin (metadata);
CREATE INDEX IF NOT EXISTS idx_{table}_definitions ON {table} USING gin (definitions);
"#
    )
}
