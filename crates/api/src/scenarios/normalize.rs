//! Date normalization for incoming scenario payloads.
//!
//! Runs on the raw JSON body before anything is decoded into typed form, so
//! the validator only ever sees canonical timestamps or explicit nulls.
//!
//! The two groups of date fields get different fallbacks on a failed parse:
//!
//! - `createdAt` / `updatedAt` are audit metadata, not user-supplied domain
//!   data; a malformed value is replaced with the injected `now`.
//! - `dateRange.start` / `dateRange.end` are domain data; a malformed bound
//!   becomes `null` so validation rejects it instead of the server silently
//!   inventing a simulation window.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Top-level audit timestamp fields.
const AUDIT_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Nested simulation-window bounds.
const RANGE_BOUNDS: [&str; 2] = ["start", "end"];

/// Rewrite every present date-like field of `payload` in place.
///
/// Never fails and never adds or removes keys; only string values in the
/// known date positions are rewritten. Non-object payloads and non-string
/// values are left untouched.
pub fn normalize_payload(payload: &mut Value, now: DateTime<Utc>) {
    let Some(map) = payload.as_object_mut() else {
        return;
    };

    for field in AUDIT_FIELDS {
        if let Some(value) = map.get_mut(field)
            && let Some(raw) = value.as_str()
        {
            let parsed = parse_timestamp(raw).unwrap_or(now);
            *value = Value::String(canonical(parsed));
        }
    }

    if let Some(range) = map.get_mut("dateRange").and_then(Value::as_object_mut) {
        for bound in RANGE_BOUNDS {
            if let Some(value) = range.get_mut(bound)
                && let Some(raw) = value.as_str()
            {
                *value = match parse_timestamp(raw) {
                    Some(parsed) => Value::String(canonical(parsed)),
                    None => Value::Null,
                };
            }
        }
    }
}

/// Parse an ISO-8601 timestamp, tolerating the date-only form the scenario
/// builder's date inputs submit (anchored to midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn canonical(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).single().expect("valid")
    }

    #[test]
    fn test_malformed_range_bound_becomes_null() {
        let mut payload = json!({
            "name": "Test",
            "dateRange": { "start": "not-a-date", "end": "2025-07-01" },
        });

        normalize_payload(&mut payload, fixed_now());

        assert_eq!(payload["dateRange"]["start"], Value::Null);
        assert_eq!(payload["dateRange"]["end"], json!("2025-07-01T00:00:00+00:00"));
    }

    #[test]
    fn test_malformed_audit_timestamp_falls_back_to_now() {
        let mut payload = json!({ "createdAt": "not-a-date" });

        normalize_payload(&mut payload, fixed_now());

        assert_eq!(payload["createdAt"], json!(fixed_now().to_rfc3339()));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let mut payload = json!({ "name": "No dates here" });

        normalize_payload(&mut payload, fixed_now());

        assert!(payload.get("createdAt").is_none());
        assert!(payload.get("updatedAt").is_none());
        assert!(payload.get("dateRange").is_none());
    }

    #[test]
    fn test_rfc3339_input_is_canonicalized_to_utc() {
        let mut payload = json!({
            "dateRange": { "start": "2025-07-01T08:00:00-04:00", "end": "2025-07-31T00:00:00Z" },
        });

        normalize_payload(&mut payload, fixed_now());

        assert_eq!(payload["dateRange"]["start"], json!("2025-07-01T12:00:00+00:00"));
        assert_eq!(payload["dateRange"]["end"], json!("2025-07-31T00:00:00+00:00"));
    }

    #[test]
    fn test_non_string_values_left_untouched() {
        let mut payload = json!({
            "createdAt": 1234,
            "dateRange": { "start": 99, "end": null },
        });

        normalize_payload(&mut payload, fixed_now());

        assert_eq!(payload["createdAt"], json!(1234));
        assert_eq!(payload["dateRange"]["start"], json!(99));
        assert_eq!(payload["dateRange"]["end"], Value::Null);
    }

    #[test]
    fn test_keys_are_preserved_exactly() {
        let mut payload = json!({
            "name": "Keys",
            "dateRange": { "start": "bad", "end": "worse" },
            "updatedAt": "also-bad",
        });

        normalize_payload(&mut payload, fixed_now());

        let map = payload.as_object().expect("object");
        assert_eq!(map.len(), 3);
        let range = map["dateRange"].as_object().expect("object");
        assert_eq!(range.len(), 2);
    }
}
