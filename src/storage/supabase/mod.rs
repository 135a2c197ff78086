pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, RequestBuilder,
};
use tracing::debug;

use self::models::PostgrestError;
use super::{ReadingStore, StorageError, StorageMode};
use crate::{
    config::SupabaseConfig,
    models::{Reading, StoredReading},
};

/// Client for a hosted Supabase project, spoken to over its PostgREST
/// interface at `{url}/rest/v1/{table}`.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: Client,
    table_url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                http: Client::new(),
                table_url: table_url(&config.url, &config.table),
                key: config.key.clone(),
            }),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.headers(auth_headers(&self.inner.key))
    }

    /// Send `request` and decode a JSON array of rows, mapping non-2xx
    /// answers to `StorageError::Api`. Rows are kept column-for-column.
    async fn fetch_rows(&self, request: RequestBuilder) -> Result<Vec<StoredReading>, StorageError> {
        let resp = self.authorized(request).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(PostgrestError::into_storage_error(status.as_u16(), &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ReadingStore for SupabaseStore {
    fn mode(&self) -> StorageMode {
        StorageMode::Supabase
    }

    async fn insert(&self, reading: &Reading) -> Result<Vec<StoredReading>, StorageError> {
        debug!(url = %self.inner.table_url, source = %reading.source, "Inserting reading");

        let request = self
            .inner
            .http
            .post(&self.inner.table_url)
            .header("Prefer", "return=representation")
            .json(reading);

        self.fetch_rows(request).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<StoredReading>, StorageError> {
        let url = recent_url(&self.inner.table_url, limit);
        debug!(url = %url, "Fetching recent readings");

        let request = self.inner.http.get(&url);
        self.fetch_rows(request).await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

/// `select=*&order=id.desc&limit=N` in PostgREST query syntax.
fn recent_url(table_url: &str, limit: usize) -> String {
    format!("{table_url}?select=*&order=id.desc&limit={limit}")
}

/// Supabase wants the key twice: as `apikey` for the API gateway and as a
/// bearer token for PostgREST's role resolution.
fn auth_headers(key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(key) {
        headers.insert("apikey", value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {key}")) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
