//! Integration tests for Planwise.
//!
//! # Test Categories
//!
//! - `scenarios_api` - Full HTTP contract driven against the real router
//!   over the in-memory store. Runs everywhere, no database required.
//! - `live_server` - Smoke tests against a running server + `PostgreSQL`,
//!   ignored by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Router-level suite (no external services)
//! cargo test -p planwise-integration-tests
//!
//! # Live suite (requires a running server and database)
//! cargo run -p planwise-api &
//! cargo test -p planwise-integration-tests -- --ignored
//! ```

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use secrecy::SecretString;

use planwise_api::config::Config;
use planwise_api::db::InMemoryScenarioStore;
use planwise_api::routes;
use planwise_api::state::AppState;

/// A configuration that never reaches a real database.
#[must_use]
pub fn test_config() -> Config {
    Config {
        database_url: SecretString::from("postgres://unused".to_owned()),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        allowed_origins: vec![],
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build the API router over a fresh in-memory store.
///
/// Returns the store alongside the router so tests can assert on stored
/// state directly.
#[must_use]
pub fn test_router() -> (Router, InMemoryScenarioStore) {
    let store = InMemoryScenarioStore::new();
    let state = AppState::new(test_config(), store.clone());
    let router = routes::routes().with_state(state);
    (router, store)
}
