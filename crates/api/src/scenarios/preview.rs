//! Preview generation.
//!
//! Derives a synthetic analytics payload from a stored scenario so the
//! frontend can render an instant projection before any real simulation runs.
//! The output is a pure function of the record: no clock, no store access,
//! nothing persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Scenario;

/// Baseline sales for the first series point, before the multiplier.
const BASELINE_SALES: f64 = 1000.0;

/// Baseline sales for the second series point, before the multiplier.
const PROJECTED_SALES: f64 = 1200.0;

/// How many product categories the preview surfaces.
const TOP_PRODUCT_LIMIT: usize = 5;

/// Flat per-region contribution shown in the breakdown.
const REGION_BASELINE: f64 = 100.0;

/// Synthetic analytics derived from one scenario.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayload {
    /// Two-point projected sales series spanning the scenario's window.
    pub series: Vec<SeriesPoint>,
    /// Leading product categories, in scenario order.
    pub top_products: Vec<String>,
    /// Per-region contribution; duplicate regions collapse to one entry.
    pub region_breakdown: BTreeMap<String, f64>,
}

/// One projected point in the preview series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    /// Point-in-time the projection refers to.
    pub date: DateTime<Utc>,
    /// Projected sales value.
    pub value: f64,
}

/// Generate the preview payload for a stored scenario.
#[must_use]
pub fn generate(scenario: &Scenario) -> PreviewPayload {
    let multiplier = scenario.sales_multiplier.as_f64();

    let series = vec![
        SeriesPoint {
            date: scenario.date_range.start,
            value: BASELINE_SALES * multiplier,
        },
        SeriesPoint {
            date: scenario.date_range.end,
            value: PROJECTED_SALES * multiplier,
        },
    ];

    let top_products = scenario
        .product_categories
        .iter()
        .take(TOP_PRODUCT_LIMIT)
        .cloned()
        .collect();

    let region_breakdown = scenario
        .regions
        .iter()
        .map(|region| (region.clone(), REGION_BASELINE))
        .collect();

    PreviewPayload {
        series,
        top_products,
        region_breakdown,
    }
}
