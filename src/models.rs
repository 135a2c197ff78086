use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One telemetry sample as posted by a monitoring device.
///
/// Every field is required. A body missing any of them, or carrying one with
/// the wrong JSON type, is rejected by the extractor before storage is touched.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    /// Volts
    pub voltage: f64,
    /// Milliamps
    pub current: f64,
    /// Milliwatts
    pub power: f64,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub light_level: i64,
    pub fan_status: String,
    pub led_status: String,
    /// Identifies the originating device, e.g. `"ESP32"`.
    pub source: String,
}

/// A row of the readings table as the database returned it.
///
/// Columns are relayed unchanged: extra columns (`user_id`, `timestamp`, ...)
/// survive and nulls in legacy rows are not an error. Only `id` is relied on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct StoredReading(pub Map<String, Value>);

impl StoredReading {
    /// Database-assigned, increasing with insertion order.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

/// Typed row for backends that decode columns themselves (direct Postgres).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReadingRow {
    pub id: i64,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub reading: Reading,
}

impl TryFrom<ReadingRow> for StoredReading {
    type Error = serde_json::Error;

    fn try_from(row: ReadingRow) -> Result<Self, Self::Error> {
        match serde_json::to_value(row)? {
            Value::Object(columns) => Ok(Self(columns)),
            other => Err(serde::ser::Error::custom(format!(
                "reading row serialized to non-object: {other}"
            ))),
        }
    }
}
