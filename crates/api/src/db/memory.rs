//! In-memory scenario store.
//!
//! Backs the test suites and database-less development. Documents live in a
//! `Vec` so store-native order is insertion order; identifiers are assigned
//! as random v4 UUIDs at insert, mirroring what the production store does
//! with `gen_random_uuid()`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use planwise_core::ScenarioId;

use super::{ScenarioStore, StoreError};
use crate::models::{NewScenario, Scenario, ScenarioChanges};

/// Scenario store held entirely in process memory.
///
/// Cloning shares the same underlying collection, so a test can keep a handle
/// for assertions while the service owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScenarioStore {
    scenarios: Arc<RwLock<Vec<Scenario>>>,
}

impl InMemoryScenarioStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scenarios.
    pub async fn len(&self) -> usize {
        self.scenarios.read().await.len()
    }

    /// True when the store holds no scenarios.
    pub async fn is_empty(&self) -> bool {
        self.scenarios.read().await.is_empty()
    }
}

#[async_trait]
impl ScenarioStore for InMemoryScenarioStore {
    async fn find_all(&self) -> Result<Vec<Scenario>, StoreError> {
        Ok(self.scenarios.read().await.clone())
    }

    async fn find_by_id(&self, id: ScenarioId) -> Result<Option<Scenario>, StoreError> {
        Ok(self
            .scenarios
            .read()
            .await
            .iter()
            .find(|scenario| scenario.id == id)
            .cloned())
    }

    async fn insert(&self, scenario: NewScenario) -> Result<ScenarioId, StoreError> {
        let id = ScenarioId::random();
        let mut scenarios = self.scenarios.write().await;
        scenarios.push(Scenario {
            id,
            name: scenario.name,
            date_range: scenario.date_range,
            product_categories: scenario.product_categories,
            sales_multiplier: scenario.sales_multiplier,
            regions: scenario.regions,
            customer_segments: scenario.customer_segments,
            created_at: scenario.created_at,
            updated_at: scenario.updated_at,
        });
        Ok(id)
    }

    async fn update_by_id(
        &self,
        id: ScenarioId,
        changes: ScenarioChanges,
    ) -> Result<bool, StoreError> {
        let mut scenarios = self.scenarios.write().await;
        let Some(scenario) = scenarios.iter_mut().find(|scenario| scenario.id == id) else {
            return Ok(false);
        };

        if let Some(name) = changes.name {
            scenario.name = name;
        }
        if let Some(date_range) = changes.date_range {
            scenario.date_range = date_range;
        }
        if let Some(product_categories) = changes.product_categories {
            scenario.product_categories = product_categories;
        }
        if let Some(sales_multiplier) = changes.sales_multiplier {
            scenario.sales_multiplier = sales_multiplier;
        }
        if let Some(regions) = changes.regions {
            scenario.regions = regions;
        }
        if let Some(customer_segments) = changes.customer_segments {
            scenario.customer_segments = customer_segments;
        }
        scenario.updated_at = changes.updated_at;

        Ok(true)
    }

    async fn delete_by_id(&self, id: ScenarioId) -> Result<bool, StoreError> {
        let mut scenarios = self.scenarios.write().await;
        let before = scenarios.len();
        scenarios.retain(|scenario| scenario.id != id);
        Ok(scenarios.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::{TimeZone, Utc};
    use planwise_core::SalesMultiplier;

    fn new_scenario(name: &str) -> NewScenario {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).single().expect("valid");
        NewScenario {
            name: name.to_owned(),
            date_range: DateRange {
                start: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).single().expect("valid"),
                end: Utc.with_ymd_and_hms(2025, 7, 31, 0, 0, 0).single().expect("valid"),
            },
            product_categories: vec!["apparel".to_owned()],
            sales_multiplier: SalesMultiplier::new(1.0).expect("in range"),
            regions: vec!["west".to_owned()],
            customer_segments: vec!["loyal".to_owned()],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = InMemoryScenarioStore::new();
        for name in ["first", "second", "third"] {
            store.insert(new_scenario(name)).await.expect("inserts");
        }

        let names: Vec<String> = store
            .find_all()
            .await
            .expect("lists")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_reports_no_match() {
        let store = InMemoryScenarioStore::new();
        let changes = ScenarioChanges {
            name: None,
            date_range: None,
            product_categories: None,
            sales_multiplier: None,
            regions: None,
            customer_segments: None,
            updated_at: Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).single().expect("valid"),
        };

        let matched = store
            .update_by_id(ScenarioId::random(), changes)
            .await
            .expect("runs");
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_delete_reports_once() {
        let store = InMemoryScenarioStore::new();
        let id = store.insert(new_scenario("doomed")).await.expect("inserts");

        assert!(store.delete_by_id(id).await.expect("runs"));
        assert!(!store.delete_by_id(id).await.expect("runs"));
        assert!(store.is_empty().await);
    }
}
