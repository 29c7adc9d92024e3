//! HTTP route handlers.

pub mod scenarios;

use axum::Router;

use crate::db::ScenarioStore;
use crate::state::AppState;

/// Build the full API router.
pub fn routes<S: ScenarioStore + 'static>() -> Router<AppState<S>> {
    scenarios::router()
}
