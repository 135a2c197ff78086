use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{Reading, StoredReading},
    storage::StorageMode,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for `POST /readings/`. Always sent with `200 OK`; the outcome is
/// in `status`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitReadingResponse {
    /// Persisted; `data` holds the row(s) storage reported back.
    Success { data: Vec<StoredReading> },
    /// Fallback mode: accepted and echoed, not persisted.
    MockSuccess { data: Reading },
    /// Storage failed; `message` describes the fault.
    Error { message: String },
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AckStatus {
    Success,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FanControlResponse {
    pub status: AckStatus,
    pub speed: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LedControlResponse {
    pub status: AckStatus,
    pub state: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageMode,
    /// `true` when readings are accepted but not persisted.
    pub degraded: bool,
}
