//! `PostgreSQL` scenario store.
//!
//! Queries use the runtime sqlx API with an internal row type, so the crate
//! builds without a live database or offline query cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use planwise_core::{SalesMultiplier, ScenarioId};

use super::{ScenarioStore, StoreError};
use crate::models::{DateRange, NewScenario, Scenario, ScenarioChanges};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for scenario queries.
#[derive(Debug, sqlx::FromRow)]
struct ScenarioRow {
    id: Uuid,
    name: String,
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
    product_categories: Vec<String>,
    sales_multiplier: f64,
    regions: Vec<String>,
    customer_segments: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ScenarioRow> for Scenario {
    type Error = StoreError;

    fn try_from(row: ScenarioRow) -> Result<Self, Self::Error> {
        let sales_multiplier = SalesMultiplier::new(row.sales_multiplier).map_err(|e| {
            StoreError::DataCorruption(format!("invalid sales multiplier in database: {e}"))
        })?;

        Ok(Self {
            id: ScenarioId::new(row.id),
            name: row.name,
            date_range: DateRange {
                start: row.date_start,
                end: row.date_end,
            },
            product_categories: row.product_categories,
            sales_multiplier,
            regions: row.regions,
            customer_segments: row.customer_segments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Store
// =============================================================================

/// Scenario store backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgScenarioStore {
    pool: PgPool,
}

impl PgScenarioStore {
    /// Create a new store over an established pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool (readiness probes).
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ScenarioStore for PgScenarioStore {
    async fn find_all(&self) -> Result<Vec<Scenario>, StoreError> {
        // Insertion order, matching the in-memory store.
        let rows: Vec<ScenarioRow> = sqlx::query_as(
            r"
            SELECT id, name, date_start, date_end, product_categories,
                   sales_multiplier, regions, customer_segments,
                   created_at, updated_at
            FROM scenarios
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_by_id(&self, id: ScenarioId) -> Result<Option<Scenario>, StoreError> {
        let row: Option<ScenarioRow> = sqlx::query_as(
            r"
            SELECT id, name, date_start, date_end, product_categories,
                   sales_multiplier, regions, customer_segments,
                   created_at, updated_at
            FROM scenarios
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert(&self, scenario: NewScenario) -> Result<ScenarioId, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r"
            INSERT INTO scenarios
                (name, date_start, date_end, product_categories,
                 sales_multiplier, regions, customer_segments,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            ",
        )
        .bind(&scenario.name)
        .bind(scenario.date_range.start)
        .bind(scenario.date_range.end)
        .bind(&scenario.product_categories)
        .bind(scenario.sales_multiplier.as_f64())
        .bind(&scenario.regions)
        .bind(&scenario.customer_segments)
        .bind(scenario.created_at)
        .bind(scenario.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(ScenarioId::new(id))
    }

    async fn update_by_id(
        &self,
        id: ScenarioId,
        changes: ScenarioChanges,
    ) -> Result<bool, StoreError> {
        // created_at is never part of the SET list; creation time is immutable.
        let result = sqlx::query(
            r"
            UPDATE scenarios SET
                name = COALESCE($2, name),
                date_start = COALESCE($3, date_start),
                date_end = COALESCE($4, date_end),
                product_categories = COALESCE($5, product_categories),
                sales_multiplier = COALESCE($6, sales_multiplier),
                regions = COALESCE($7, regions),
                customer_segments = COALESCE($8, customer_segments),
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .bind(changes.name)
        .bind(changes.date_range.map(|range| range.start))
        .bind(changes.date_range.map(|range| range.end))
        .bind(changes.product_categories)
        .bind(changes.sales_multiplier.map(f64::from))
        .bind(changes.regions)
        .bind(changes.customer_segments)
        .bind(changes.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: ScenarioId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM scenarios WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
