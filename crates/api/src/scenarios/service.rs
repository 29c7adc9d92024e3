//! Scenario repository adapter.
//!
//! Owns the pipeline between raw request payloads and the injected store
//! handle: date normalization, validation, audit-timestamp stamping,
//! identifier translation, and the re-read that guarantees responses reflect
//! exactly what the store persisted. Validation failures never touch the
//! store; each successful write mutates it exactly once.

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use planwise_core::ScenarioId;

use crate::db::{ScenarioStore, StoreError};
use crate::models::{Scenario, ScenarioDraft};

use super::normalize::normalize_payload;
use super::preview::{self, PreviewPayload};
use super::validate::{self, FieldError};

/// Outcome classes for scenario operations.
///
/// Validation and not-found are expected, locally detected outcomes; store
/// errors are infrastructural and surface as opaque failures at the boundary.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The payload failed field validation. The store was not touched.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The identifier does not resolve to a stored scenario. Malformed
    /// identifier strings land here too; callers learn nothing about the
    /// store's identifier format.
    #[error("scenario not found")]
    NotFound,

    /// The store call itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// CRUD and preview operations over an injected scenario store.
#[derive(Debug, Clone)]
pub struct ScenarioService<S> {
    store: S,
}

impl<S: ScenarioStore> ScenarioService<S> {
    /// Create a service over an explicitly constructed store handle.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// List every scenario in store-native order.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Store` if the store call fails.
    pub async fn list(&self) -> Result<Vec<Scenario>, ScenarioError> {
        Ok(self.store.find_all().await?)
    }

    /// Create a scenario from a raw JSON payload.
    ///
    /// Caller-supplied `createdAt`/`updatedAt` values are discarded; both are
    /// stamped to the current time. The returned record is re-read from the
    /// store after insertion.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Validation` with every field error on an
    /// invalid payload (store untouched), or `ScenarioError::Store` on store
    /// failure.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, mut payload: Value) -> Result<Scenario, ScenarioError> {
        let now = Utc::now();
        normalize_payload(&mut payload, now);
        let draft = decode_draft(payload)?;
        let scenario = validate::validate(draft, now).map_err(ScenarioError::Validation)?;

        let id = self.store.insert(scenario).await?;
        let created = self.store.find_by_id(id).await?.ok_or_else(|| {
            StoreError::DataCorruption(format!("scenario {id} missing immediately after insert"))
        })?;

        tracing::info!(id = %created.id, "scenario created");
        Ok(created)
    }

    /// Fetch one scenario by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotFound` for unknown or malformed
    /// identifiers, or `ScenarioError::Store` on store failure.
    pub async fn get(&self, id: &str) -> Result<Scenario, ScenarioError> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ScenarioError::NotFound)
    }

    /// Apply a partial update to one scenario.
    ///
    /// Only fields supplied in the payload change; any `createdAt` the caller
    /// sends is dropped before the patch is built, and `updatedAt` is stamped
    /// to the current time. The returned record is re-read after the write.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Validation` if a supplied field fails its rule
    /// (store untouched), `ScenarioError::NotFound` for unknown or malformed
    /// identifiers, or `ScenarioError::Store` on store failure.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, mut payload: Value) -> Result<Scenario, ScenarioError> {
        let id = parse_id(id)?;
        let now = Utc::now();
        normalize_payload(&mut payload, now);
        let draft = decode_draft(payload)?;
        let changes = validate::validate_patch(draft, now).map_err(ScenarioError::Validation)?;

        let matched = self.store.update_by_id(id, changes).await?;
        if !matched {
            return Err(ScenarioError::NotFound);
        }

        // A concurrent delete can win between the write and the re-read;
        // the scenario is gone either way.
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ScenarioError::NotFound)
    }

    /// Hard-delete one scenario.
    ///
    /// Deletion is reported once: a second delete of the same identifier is
    /// NotFound.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotFound` for unknown or malformed
    /// identifiers, or `ScenarioError::Store` on store failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ScenarioError> {
        let id = parse_id(id)?;
        let deleted = self.store.delete_by_id(id).await?;
        if !deleted {
            return Err(ScenarioError::NotFound);
        }

        tracing::info!(%id, "scenario deleted");
        Ok(())
    }

    /// Derive the preview payload for one stored scenario.
    ///
    /// Read-only; nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotFound` for unknown or malformed
    /// identifiers, or `ScenarioError::Store` on store failure.
    pub async fn preview(&self, id: &str) -> Result<PreviewPayload, ScenarioError> {
        let scenario = self.get(id).await?;
        Ok(preview::generate(&scenario))
    }
}

/// Translate a path identifier into the store's identifier type.
///
/// A malformed identifier cannot name any document, so it collapses to
/// NotFound rather than leaking the store's identifier format as a distinct
/// error class.
fn parse_id(raw: &str) -> Result<ScenarioId, ScenarioError> {
    raw.parse().map_err(|_| ScenarioError::NotFound)
}

/// Decode a normalized payload into a draft.
///
/// Shape-level mismatches (wrong JSON types) surface as a single
/// validation error; field-level rules run afterwards in `validate`.
fn decode_draft(payload: Value) -> Result<ScenarioDraft, ScenarioError> {
    serde_json::from_value(payload).map_err(|error| {
        ScenarioError::Validation(vec![FieldError::new("body", error.to_string())])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryScenarioStore;
    use serde_json::json;

    fn service() -> ScenarioService<InMemoryScenarioStore> {
        ScenarioService::new(InMemoryScenarioStore::new())
    }

    fn valid_payload() -> Value {
        json!({
            "name": "Back to school",
            "dateRange": { "start": "2025-08-01", "end": "2025-09-15" },
            "productCategories": ["stationery", "backpacks"],
            "salesMultiplier": 1.2,
            "regions": ["midwest"],
            "customerSegments": ["families"],
        })
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrips() {
        let service = service();
        let created = service.create(valid_payload()).await.expect("creates");

        let fetched = service.get(&created.id.to_string()).await.expect("fetches");
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Back to school");
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_create_invalid_payload_leaves_store_untouched() {
        let store = InMemoryScenarioStore::new();
        let service = ScenarioService::new(store.clone());

        let result = service.create(json!({ "name": "ab" })).await;
        assert!(matches!(result, Err(ScenarioError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_ignores_caller_audit_timestamps() {
        let service = service();
        let mut payload = valid_payload();
        payload["createdAt"] = json!("1999-01-01T00:00:00Z");
        payload["updatedAt"] = json!("1999-01-01T00:00:00Z");

        let created = service.create(payload).await.expect("creates");
        assert!(created.created_at.timestamp() > 946_684_800, "stamped by server, not caller");
    }

    #[tokio::test]
    async fn test_empty_update_refreshes_only_updated_at() {
        let service = service();
        let created = service.create(valid_payload()).await.expect("creates");

        let updated = service
            .update(&created.id.to_string(), json!({}))
            .await
            .expect("updates");

        assert_eq!(updated.name, created.name);
        assert_eq!(updated.date_range, created.date_range);
        assert_eq!(updated.product_categories, created.product_categories);
        assert_eq!(updated.sales_multiplier, created.sales_multiplier);
        assert_eq!(updated.regions, created.regions);
        assert_eq!(updated.customer_segments, created.customer_segments);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_cannot_change_created_at() {
        let service = service();
        let created = service.create(valid_payload()).await.expect("creates");

        let updated = service
            .update(
                &created.id.to_string(),
                json!({ "createdAt": "1999-01-01T00:00:00Z", "name": "Renamed run" }),
            )
            .await
            .expect("updates");

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Renamed run");
    }

    #[tokio::test]
    async fn test_update_validation_failure_leaves_store_untouched() {
        let service = service();
        let created = service.create(valid_payload()).await.expect("creates");

        let result = service
            .update(&created.id.to_string(), json!({ "salesMultiplier": 0.1 }))
            .await;
        assert!(matches!(result, Err(ScenarioError::Validation(_))));

        let fetched = service.get(&created.id.to_string()).await.expect("fetches");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found_everywhere() {
        let service = service();

        assert!(matches!(service.get("not-a-uuid").await, Err(ScenarioError::NotFound)));
        assert!(matches!(
            service.update("not-a-uuid", json!({})).await,
            Err(ScenarioError::NotFound)
        ));
        assert!(matches!(service.delete("not-a-uuid").await, Err(ScenarioError::NotFound)));
        assert!(matches!(service.preview("not-a-uuid").await, Err(ScenarioError::NotFound)));
    }

    #[tokio::test]
    async fn test_double_delete_reports_not_found_second_time() {
        let service = service();
        let created = service.create(valid_payload()).await.expect("creates");
        let id = created.id.to_string();

        service.delete(&id).await.expect("first delete succeeds");
        assert!(matches!(service.delete(&id).await, Err(ScenarioError::NotFound)));
    }

    #[tokio::test]
    async fn test_malformed_range_bound_rejected_via_normalization() {
        let service = service();
        let mut payload = valid_payload();
        payload["dateRange"]["start"] = json!("not-a-date");

        let Err(ScenarioError::Validation(errors)) = service.create(payload).await else {
            panic!("expected validation failure");
        };
        assert!(errors.iter().any(|e| e.field == "dateRange.start"));
    }

    #[tokio::test]
    async fn test_preview_reflects_stored_parameters() {
        let service = service();
        let mut payload = valid_payload();
        payload["salesMultiplier"] = json!(2.0);

        let created = service.create(payload).await.expect("creates");
        let preview = service
            .preview(&created.id.to_string())
            .await
            .expect("previews");

        let values: Vec<f64> = preview.series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2000.0, 2400.0]);
    }

    #[tokio::test]
    async fn test_list_returns_all_in_order() {
        let service = service();
        for name in ["First plan", "Second plan"] {
            let mut payload = valid_payload();
            payload["name"] = json!(name);
            service.create(payload).await.expect("creates");
        }

        let names: Vec<String> = service
            .list()
            .await
            .expect("lists")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["First plan", "Second plan"]);
    }
}
