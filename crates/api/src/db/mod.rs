//! Document-store boundary for scenario persistence.
//!
//! # Tables
//!
//! - `scenarios` - one row per scenario document (UUID id, text fields,
//!   `TEXT[]` sequences, `TIMESTAMPTZ` audit columns)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run explicitly,
//! never on startup:
//! ```bash
//! sqlx migrate run --source crates/api/migrations
//! ```
//!
//! # Store contract
//!
//! The service reaches persistence only through [`ScenarioStore`]: five
//! identifier-keyed operations over one logical collection. Each operation is
//! atomic for a single document; nothing here coordinates across documents or
//! requests, so concurrent updates to the same identifier are
//! last-writer-wins at the store. [`postgres::PgScenarioStore`] is the
//! production backend; [`memory::InMemoryScenarioStore`] backs tests and
//! database-less development.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use planwise_core::ScenarioId;

use crate::models::{NewScenario, Scenario, ScenarioChanges};

pub use memory::InMemoryScenarioStore;
pub use postgres::PgScenarioStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Identifier-keyed operations over the scenario collection.
///
/// Implementations must provide atomic single-document semantics for each
/// operation; the service layer adds no locking of its own.
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// Fetch every scenario, in store-native order.
    async fn find_all(&self) -> Result<Vec<Scenario>, StoreError>;

    /// Fetch one scenario by identifier.
    async fn find_by_id(&self, id: ScenarioId) -> Result<Option<Scenario>, StoreError>;

    /// Insert a new scenario and return its store-assigned identifier.
    async fn insert(&self, scenario: NewScenario) -> Result<ScenarioId, StoreError>;

    /// Apply a field-level patch to one scenario.
    ///
    /// Only `Some` fields change; the rest of the document is untouched.
    /// Returns `false` when no document matched the identifier.
    async fn update_by_id(
        &self,
        id: ScenarioId,
        changes: ScenarioChanges,
    ) -> Result<bool, StoreError>;

    /// Hard-delete one scenario. Returns `false` when nothing matched.
    async fn delete_by_id(&self, id: ScenarioId) -> Result<bool, StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
