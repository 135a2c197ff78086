pub mod fallback;
pub mod postgres;
pub mod supabase;

#[cfg(test)]
pub(crate) mod testing;

use std::{fmt, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    config::Config,
    models::{Reading, StoredReading},
};

pub use self::{fallback::FallbackStore, postgres::PgStore, supabase::SupabaseStore};

/// Number of rows returned by the "recent readings" query.
pub const RECENT_LIMIT: usize = 10;

/// Which backend a `ReadingStore` is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    Supabase,
    Postgres,
    /// No credentials configured: nothing is persisted.
    Fallback,
}

impl StorageMode {
    pub fn is_degraded(self) -> bool {
        self == StorageMode::Fallback
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageMode::Supabase => "supabase",
            StorageMode::Postgres => "postgres",
            StorageMode::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("request to storage failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("failed to decode storage response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The persistence surface the HTTP handlers depend on.
///
/// Every backend answers the same two calls; only `mode` tells them apart.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    fn mode(&self) -> StorageMode;

    /// Persist one reading and return the row(s) the backend reports back.
    async fn insert(&self, reading: &Reading) -> Result<Vec<StoredReading>, StorageError>;

    /// The `limit` most recently inserted readings, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<StoredReading>, StorageError>;
}

/// Pick a backend from the configuration.
///
/// Supabase credentials win over `DATABASE_URL`. With neither present the
/// service runs in fallback mode instead of refusing to start.
pub async fn from_config(config: &Config) -> Result<Arc<dyn ReadingStore>> {
    if let Some(supabase) = &config.supabase {
        info!(url = %supabase.url, table = %supabase.table, "Using Supabase storage");
        return Ok(Arc::new(SupabaseStore::new(supabase)));
    }

    if let Some(database_url) = &config.database_url {
        let pool = postgres::create_pool(database_url).await?;
        postgres::run_migrations(&pool).await?;
        info!("Using direct Postgres storage");
        return Ok(Arc::new(PgStore::new(pool)));
    }

    warn!(
        "SUPABASE_URL/SUPABASE_KEY and DATABASE_URL are not set; \
         running in fallback mode, readings will not be persisted"
    );
    Ok(Arc::new(FallbackStore))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fallback_is_degraded() {
        assert!(StorageMode::Fallback.is_degraded());
        assert!(!StorageMode::Supabase.is_degraded());
        assert!(!StorageMode::Postgres.is_degraded());
    }

    #[test]
    fn mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(StorageMode::Fallback).unwrap(),
            serde_json::json!("fallback")
        );
        assert_eq!(StorageMode::Supabase.to_string(), "supabase");
    }

    #[tokio::test]
    async fn empty_config_selects_fallback() {
        let config = Config::from_lookup(|_| None).unwrap();
        let store = from_config(&config).await.unwrap();
        assert_eq!(store.mode(), StorageMode::Fallback);
    }

    #[tokio::test]
    async fn supabase_credentials_select_supabase() {
        let config = Config::from_lookup(|key| match key {
            "SUPABASE_URL" => Some("https://demo.supabase.co".into()),
            "SUPABASE_KEY" => Some("anon-key".into()),
            "DATABASE_URL" => Some("postgres://ignored".into()),
            _ => None,
        })
        .unwrap();
        let store = from_config(&config).await.unwrap();
        assert_eq!(store.mode(), StorageMode::Supabase);
    }
}
