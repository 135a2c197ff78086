pub mod dto;
pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::storage::ReadingStore;
use handlers::ApiDoc;

/// Shared by every handler. The store is chosen once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReadingStore>,
}

pub fn router(store: Arc<dyn ReadingStore>) -> Router {
    let state = AppState { store };

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route(
            "/readings/",
            get(handlers::list_readings).post(handlers::create_reading),
        )
        .route(
            "/readings",
            get(handlers::list_readings).post(handlers::create_reading),
        )
        .route("/readings/latest", get(handlers::latest_reading))
        .route("/readings/latest/", get(handlers::latest_reading))
        .route("/control/fan", post(handlers::control_fan))
        .route("/control/fan/", post(handlers::control_fan))
        .route("/control/led", post(handlers::control_led))
        .route("/control/led/", post(handlers::control_led))
        .with_state(state)
        .split_for_parts();

    router
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}
