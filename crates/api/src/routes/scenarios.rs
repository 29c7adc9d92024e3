//! Scenario CRUD and preview route handlers.
//!
//! Handlers stay thin: decode the request, call the service, map the typed
//! outcome onto the HTTP contract (200 read/update/delete, 201 created,
//! 400 validation, 404 not found, 500 store failure).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde_json::Value;

use crate::db::ScenarioStore;
use crate::error::AppError;
use crate::models::Scenario;
use crate::scenarios::PreviewPayload;
use crate::state::AppState;

/// Build the scenarios router.
pub fn router<S: ScenarioStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/api/scenarios",
            get(list_scenarios::<S>).post(create_scenario::<S>),
        )
        .route(
            "/api/scenarios/{id}",
            get(get_scenario::<S>)
                .put(update_scenario::<S>)
                .delete(delete_scenario::<S>),
        )
        .route("/api/scenarios/{id}/preview", get(preview_scenario::<S>))
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// List all scenarios.
///
/// # Errors
///
/// Returns an error if the store call fails.
async fn list_scenarios<S: ScenarioStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Scenario>>, AppError> {
    let scenarios = state.service().list().await?;
    Ok(Json(scenarios))
}

/// Create a new scenario.
///
/// # Errors
///
/// Returns an error if validation fails or the store call fails.
async fn create_scenario<S: ScenarioStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Scenario>), AppError> {
    let scenario = state.service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(scenario)))
}

/// Get a single scenario by ID.
///
/// # Errors
///
/// Returns an error if the scenario does not exist or the store call fails.
async fn get_scenario<S: ScenarioStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Scenario>, AppError> {
    let scenario = state.service().get(&id).await?;
    Ok(Json(scenario))
}

/// Partially update a scenario.
///
/// # Errors
///
/// Returns an error if validation fails, the scenario does not exist, or the
/// store call fails.
async fn update_scenario<S: ScenarioStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Scenario>, AppError> {
    let scenario = state.service().update(&id, payload).await?;
    Ok(Json(scenario))
}

/// Delete a scenario.
///
/// # Errors
///
/// Returns an error if the scenario does not exist or the store call fails.
async fn delete_scenario<S: ScenarioStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.service().delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Scenario deleted successfully",
    }))
}

/// Derive the preview payload for a scenario.
///
/// # Errors
///
/// Returns an error if the scenario does not exist or the store call fails.
async fn preview_scenario<S: ScenarioStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<PreviewPayload>, AppError> {
    let preview = state.service().preview(&id).await?;
    Ok(Json(preview))
}
