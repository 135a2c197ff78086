use axum::{extract::State, Json};
use tracing::{debug, error, info};
use utoipa::OpenApi;

use super::{
    dto::{
        AckStatus, FanControlResponse, HealthResponse, LedControlResponse, MessageResponse,
        SubmitReadingResponse,
    },
    errors::AppJson,
    AppState,
};
use crate::{
    control::{self, FanCommand, LedCommand},
    models::{Reading, StoredReading},
    storage::{StorageMode, RECENT_LIMIT},
};

pub const BANNER: &str = "VoltSense API is Online";

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageResponse)),
    tag = "system"
)]
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: BANNER.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// Store one reading.
///
/// Storage faults are reported in the body (`status: "error"`), never as an
/// HTTP error status. In fallback mode the reading is echoed back with
/// `status: "mock_success"` and nothing is persisted.
#[utoipa::path(
    post,
    path = "/readings/",
    request_body = Reading,
    responses(
        (status = 200, description = "Outcome of the insert", body = SubmitReadingResponse),
        (status = 422, description = "Missing or mistyped field"),
    ),
    tag = "readings"
)]
pub async fn create_reading(
    State(state): State<AppState>,
    AppJson(reading): AppJson<Reading>,
) -> Json<SubmitReadingResponse> {
    let mode = state.store.mode();

    let response = match state.store.insert(&reading).await {
        Ok(_) if mode.is_degraded() => {
            info!(source = %reading.source, "Fallback mode: reading accepted, not persisted");
            SubmitReadingResponse::MockSuccess { data: reading }
        }
        Ok(rows) => {
            info!(source = %reading.source, rows = rows.len(), "Reading persisted");
            SubmitReadingResponse::Success { data: rows }
        }
        Err(e) => {
            error!(storage = %mode, error = %e, "Failed to persist reading");
            SubmitReadingResponse::Error {
                message: e.to_string(),
            }
        }
    };

    Json(response)
}

/// The ten most recent readings, newest first.
///
/// A storage fault yields an empty array, same as an empty table.
#[utoipa::path(
    get,
    path = "/readings/",
    responses((status = 200, description = "Up to 10 readings, newest first", body = Vec<StoredReading>)),
    tag = "readings"
)]
pub async fn list_readings(State(state): State<AppState>) -> Json<Vec<StoredReading>> {
    match state.store.recent(RECENT_LIMIT).await {
        Ok(rows) => Json(rows),
        Err(e) => {
            error!(storage = %state.store.mode(), error = %e, "Failed to fetch readings");
            Json(Vec::new())
        }
    }
}

/// The single newest reading, or `null`.
#[utoipa::path(
    get,
    path = "/readings/latest",
    responses((status = 200, description = "Newest reading, or null", body = Option<StoredReading>)),
    tag = "readings"
)]
pub async fn latest_reading(State(state): State<AppState>) -> Json<Option<StoredReading>> {
    match state.store.recent(1).await {
        Ok(rows) => Json(rows.into_iter().next()),
        Err(e) => {
            error!(storage = %state.store.mode(), error = %e, "Failed to fetch latest reading");
            Json(None)
        }
    }
}

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/control/fan",
    request_body = FanCommand,
    responses((status = 200, description = "Command acknowledged", body = FanControlResponse)),
    tag = "control"
)]
pub async fn control_fan(AppJson(command): AppJson<FanCommand>) -> Json<FanControlResponse> {
    control::apply_fan(&command);
    Json(FanControlResponse {
        status: AckStatus::Success,
        speed: command.speed,
    })
}

#[utoipa::path(
    post,
    path = "/control/led",
    request_body = LedCommand,
    responses((status = 200, description = "Command acknowledged", body = LedControlResponse)),
    tag = "control"
)]
pub async fn control_led(AppJson(command): AppJson<LedCommand>) -> Json<LedControlResponse> {
    control::apply_led(&command);
    Json(LedControlResponse {
        status: AckStatus::Success,
        state: command.state,
    })
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Reports which storage backend is active and whether it is degraded.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthResponse)),
    tag = "system"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = state.store.mode();
    if storage.is_degraded() {
        debug!("Health check: running in fallback mode");
    }
    Json(HealthResponse {
        status: "ok".to_owned(),
        storage,
        degraded: storage.is_degraded(),
    })
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        home,
        create_reading,
        list_readings,
        latest_reading,
        control_fan,
        control_led,
        health
    ),
    components(schemas(
        Reading,
        StoredReading,
        SubmitReadingResponse,
        FanCommand,
        LedCommand,
        FanControlResponse,
        LedControlResponse,
        AckStatus,
        HealthResponse,
        MessageResponse,
        StorageMode
    )),
    tags(
        (name = "readings", description = "Telemetry readings"),
        (name = "control",  description = "Actuator commands (acknowledged, not delivered)"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "VoltSense Gateway API",
        version = "0.1.0",
        description = "Telemetry ingestion and actuator control gateway"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
