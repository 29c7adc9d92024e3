//! Scenario domain models.
//!
//! The stored [`Scenario`] is a closed record: every field is present, the
//! multiplier is bounded by construction, and serialization emits exactly the
//! declared fields (store internals cannot leak into responses). Incoming
//! payloads travel as [`ScenarioDraft`] — an all-optional candidate produced
//! after date normalization — and reach the store as either a [`NewScenario`]
//! or a field-level [`ScenarioChanges`] patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use planwise_core::{SalesMultiplier, ScenarioId};

/// A named set of simulation parameters for the planning tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Store-assigned identifier. Immutable.
    pub id: ScenarioId,
    /// Display name, at least 3 characters.
    pub name: String,
    /// Simulation window.
    pub date_range: DateRange,
    /// Product categories included in the simulation. Order preserved,
    /// duplicates allowed.
    pub product_categories: Vec<String>,
    /// Demand scaling factor.
    pub sales_multiplier: SalesMultiplier,
    /// Regions included in the simulation. Order preserved.
    pub regions: Vec<String>,
    /// Customer segments included in the simulation. Order preserved.
    pub customer_segments: Vec<String>,
    /// When the scenario was created. Never changes after creation.
    pub created_at: DateTime<Utc>,
    /// When the scenario was last written. Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

/// Simulation window with both bounds required.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the simulated period.
    pub start: DateTime<Utc>,
    /// Last day of the simulated period.
    pub end: DateTime<Utc>,
}

/// A fully validated scenario awaiting insertion.
///
/// The store assigns the identifier; both audit timestamps are stamped by the
/// service before validation hands this out.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScenario {
    pub name: String,
    pub date_range: DateRange,
    pub product_categories: Vec<String>,
    pub sales_multiplier: SalesMultiplier,
    pub regions: Vec<String>,
    pub customer_segments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An unvalidated scenario candidate decoded from a normalized request body.
///
/// Every field is optional so that validation can report all missing or
/// malformed fields at once instead of failing on the first. There are
/// deliberately no `createdAt`/`updatedAt` fields: caller-supplied audit
/// timestamps are dropped structurally, the server stamps its own.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioDraft {
    pub name: Option<String>,
    pub date_range: Option<DateRangeDraft>,
    pub product_categories: Option<Vec<String>>,
    pub sales_multiplier: Option<f64>,
    pub regions: Option<Vec<String>>,
    pub customer_segments: Option<Vec<String>>,
}

/// Date range candidate; a bound is `None` when it was absent from the
/// payload or nulled by the normalizer after a failed parse.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DateRangeDraft {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Field-level patch for a partial update.
///
/// Only `Some` fields are written; `None` leaves the stored value untouched.
/// `updated_at` is always written. There is no `created_at` field, so an
/// update cannot express a creation-time change at the type level.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioChanges {
    pub name: Option<String>,
    pub date_range: Option<DateRange>,
    pub product_categories: Option<Vec<String>>,
    pub sales_multiplier: Option<SalesMultiplier>,
    pub regions: Option<Vec<String>>,
    pub customer_segments: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

impl ScenarioChanges {
    /// True when the patch carries no field changes beyond the
    /// `updated_at` refresh.
    #[must_use]
    pub const fn is_timestamp_only(&self) -> bool {
        self.name.is_none()
            && self.date_range.is_none()
            && self.product_categories.is_none()
            && self.sales_multiplier.is_none()
            && self.regions.is_none()
            && self.customer_segments.is_none()
    }
}
