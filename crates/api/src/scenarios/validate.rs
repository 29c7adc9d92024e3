//! Scenario validation.
//!
//! Pure functions from a decoded [`ScenarioDraft`] to either a store-ready
//! record ([`NewScenario`]) or a field-level patch ([`ScenarioChanges`]).
//! Errors accumulate across fields so a response can report every problem at
//! once. Validation expects the date normalizer to have run first: a range
//! bound that arrives as `None` here was either absent or failed to parse,
//! and both cases read as "missing or invalid" to the caller.
//!
//! The serialization half of the schema contract lives on the record types
//! themselves: [`crate::models::Scenario`] is a closed struct whose derived
//! `Serialize` emits exactly the declared fields in wire casing, with the
//! identifier flattened to its string form.

use chrono::{DateTime, Utc};
use serde::Serialize;

use planwise_core::SalesMultiplier;

use crate::models::{DateRange, NewScenario, ScenarioChanges, ScenarioDraft};

/// Minimum scenario name length, in characters.
const MIN_NAME_LENGTH: usize = 3;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Wire-format field path (e.g. `dateRange.start`).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}

/// Validate a complete creation candidate and stamp it for insertion.
///
/// Both audit timestamps are set to `now`, regardless of anything the caller
/// sent. Returns every field error at once on failure.
///
/// # Errors
///
/// Returns the accumulated field errors when any rule fails.
pub fn validate(draft: ScenarioDraft, now: DateTime<Utc>) -> Result<NewScenario, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = match draft.name {
        Some(name) => check_name(name, &mut errors),
        None => {
            errors.push(FieldError::required("name"));
            None
        }
    };

    let date_range = match draft.date_range {
        Some(range) => {
            let start = check_bound(range.start, "dateRange.start", &mut errors);
            let end = check_bound(range.end, "dateRange.end", &mut errors);
            match (start, end) {
                (Some(start), Some(end)) => Some(DateRange { start, end }),
                _ => None,
            }
        }
        None => {
            errors.push(FieldError::required("dateRange"));
            None
        }
    };

    let product_categories = check_sequence(draft.product_categories, "productCategories", &mut errors);
    let sales_multiplier = check_multiplier(draft.sales_multiplier, &mut errors);
    let regions = check_sequence(draft.regions, "regions", &mut errors);
    let customer_segments = check_sequence(draft.customer_segments, "customerSegments", &mut errors);

    match (
        name,
        date_range,
        product_categories,
        sales_multiplier,
        regions,
        customer_segments,
    ) {
        (
            Some(name),
            Some(date_range),
            Some(product_categories),
            Some(sales_multiplier),
            Some(regions),
            Some(customer_segments),
        ) => Ok(NewScenario {
            name,
            date_range,
            product_categories,
            sales_multiplier,
            regions,
            customer_segments,
            created_at: now,
            updated_at: now,
        }),
        _ => Err(errors),
    }
}

/// Validate the supplied fields of an update patch and stamp `updated_at`.
///
/// Fields absent from the draft are left out of the resulting patch and stay
/// untouched in the store. Present fields must satisfy the same rules as on
/// creation; a supplied `dateRange` must carry both bounds.
///
/// # Errors
///
/// Returns the accumulated field errors when any supplied field fails.
pub fn validate_patch(
    draft: ScenarioDraft,
    updated_at: DateTime<Utc>,
) -> Result<ScenarioChanges, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = draft.name.and_then(|name| check_name(name, &mut errors));

    let date_range = draft.date_range.and_then(|range| {
        let start = check_bound(range.start, "dateRange.start", &mut errors);
        let end = check_bound(range.end, "dateRange.end", &mut errors);
        match (start, end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    });

    let product_categories = draft
        .product_categories
        .and_then(|values| check_elements(values, "productCategories", &mut errors));
    let sales_multiplier = draft
        .sales_multiplier
        .and_then(|value| check_multiplier_value(value, &mut errors));
    let regions = draft
        .regions
        .and_then(|values| check_elements(values, "regions", &mut errors));
    let customer_segments = draft
        .customer_segments
        .and_then(|values| check_elements(values, "customerSegments", &mut errors));

    if errors.is_empty() {
        Ok(ScenarioChanges {
            name,
            date_range,
            product_categories,
            sales_multiplier,
            regions,
            customer_segments,
            updated_at,
        })
    } else {
        Err(errors)
    }
}

fn check_name(name: String, errors: &mut Vec<FieldError>) -> Option<String> {
    if name.chars().count() < MIN_NAME_LENGTH {
        errors.push(FieldError::new(
            "name",
            format!("must be at least {MIN_NAME_LENGTH} characters"),
        ));
        None
    } else {
        Some(name)
    }
}

fn check_bound(
    bound: Option<DateTime<Utc>>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    if bound.is_none() {
        errors.push(FieldError::new(field, "must be a valid ISO-8601 timestamp"));
    }
    bound
}

fn check_sequence(
    values: Option<Vec<String>>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<String>> {
    match values {
        Some(values) => check_elements(values, field, errors),
        None => {
            errors.push(FieldError::required(field));
            None
        }
    }
}

fn check_elements(
    values: Vec<String>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<String>> {
    if values.is_empty() {
        errors.push(FieldError::new(field, "must contain at least one entry"));
        None
    } else {
        Some(values)
    }
}

fn check_multiplier(
    value: Option<f64>,
    errors: &mut Vec<FieldError>,
) -> Option<SalesMultiplier> {
    match value {
        Some(value) => check_multiplier_value(value, errors),
        None => {
            errors.push(FieldError::required("salesMultiplier"));
            None
        }
    }
}

fn check_multiplier_value(value: f64, errors: &mut Vec<FieldError>) -> Option<SalesMultiplier> {
    match SalesMultiplier::new(value) {
        Ok(multiplier) => Some(multiplier),
        Err(error) => {
            errors.push(FieldError::new("salesMultiplier", error.to_string()));
            None
        }
    }
}
