use anyhow::Result;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{ReadingStore, StorageError, StorageMode};
use crate::models::{Reading, ReadingRow, StoredReading};

pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Talks to the `sensor_readings` table directly over a Postgres connection.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgStore {
    fn mode(&self) -> StorageMode {
        StorageMode::Postgres
    }

    async fn insert(&self, reading: &Reading) -> Result<Vec<StoredReading>, StorageError> {
        let row = sqlx::query_as::<_, ReadingRow>(
            r#"
            INSERT INTO sensor_readings
                (voltage, current, power, temperature, humidity,
                 light_level, fan_status, led_status, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, created_at,
                      voltage, current, power, temperature, humidity,
                      light_level, fan_status, led_status, source
            "#,
        )
        .bind(reading.voltage)
        .bind(reading.current)
        .bind(reading.power)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.light_level)
        .bind(&reading.fan_status)
        .bind(&reading.led_status)
        .bind(&reading.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(vec![StoredReading::try_from(row)?])
    }

    async fn recent(&self, limit: usize) -> Result<Vec<StoredReading>, StorageError> {
        let rows = sqlx::query_as::<_, ReadingRow>(
            r#"
            SELECT id, created_at,
                   voltage, current, power, temperature, humidity,
                   light_level, fan_status, led_status, source
            FROM sensor_readings
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| StoredReading::try_from(row).map_err(StorageError::from))
            .collect()
    }
}

// These need a live database: `DATABASE_URL=postgres://... cargo test -- --ignored`.
#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::storage::testing::sample_reading;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn insert_returns_assigned_row(pool: PgPool) {
        let store = PgStore::new(pool);
        let rows = store.insert(&sample_reading("ESP32")).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].id().is_some_and(|id| id > 0));
        assert!(rows[0].get("created_at").is_some_and(|v| v.is_string()));
        assert_eq!(rows[0].get("source"), Some(&serde_json::json!("ESP32")));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn recent_is_newest_first_and_limited(pool: PgPool) {
        let store = PgStore::new(pool);
        for i in 0..12 {
            store.insert(&sample_reading(&format!("dev{i}"))).await.unwrap();
        }

        let rows = store.recent(10).await.unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].get("source"), Some(&serde_json::json!("dev11")));
        assert_eq!(rows[9].get("source"), Some(&serde_json::json!("dev2")));
        assert!(rows.windows(2).all(|w| w[0].id() > w[1].id()));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn recent_on_empty_table_is_empty(pool: PgPool) {
        let store = PgStore::new(pool);
        assert!(store.recent(10).await.unwrap().is_empty());
    }
}
