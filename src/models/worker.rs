//! Worker record model.
//!
//! This module defines the [`WorkerRecord`] struct, the immutable raw form of
//! a worker's weighing history as loaded from the dataset payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single worker's raw weighing history, as loaded.
///
/// `weighings` maps ISO `YYYY-MM-DD` date strings to the ordered sequence of
/// quantities recorded on that date. Date keys are not validated at load
/// time; unparseable dates are skipped during aggregation. Quantities that
/// are not numeric deserialize as NaN and are coerced to 0 downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Normalized worker identifier.
    pub id: String,
    /// The worker's display name.
    pub name: String,
    /// Optional group label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Date string to recorded quantities, in recording order.
    #[serde(default, deserialize_with = "deserialize_weighings")]
    pub weighings: BTreeMap<String, Vec<f64>>,
}

/// Deserializes the weighings map, tolerating malformed entries.
///
/// A value that is not an array becomes an empty sequence. An element that is
/// not a number (or a string that does not parse as one) becomes NaN, which
/// downstream quantity coercion treats as 0.
fn deserialize_weighings<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(date, value)| {
            let quantities = match value {
                Value::Array(items) => items.iter().map(coerce_quantity).collect(),
                _ => Vec::new(),
            };
            (date, quantities)
        })
        .collect())
}

/// Coerces a raw JSON value to a quantity, yielding NaN when it is not one.
fn coerce_quantity(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "12345678-5",
            "name": "María Peña",
            "group": "Cuadrilla Norte",
            "weighings": {
                "2024-01-01": [10.5, 12.0],
                "2024-01-02": [8.25]
            }
        }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(worker.id, "12345678-5");
        assert_eq!(worker.name, "María Peña");
        assert_eq!(worker.group.as_deref(), Some("Cuadrilla Norte"));
        assert_eq!(worker.weighings["2024-01-01"], vec![10.5, 12.0]);
        assert_eq!(worker.weighings["2024-01-02"], vec![8.25]);
    }

    #[test]
    fn test_deserialize_without_group_or_weighings() {
        let json = r#"{ "id": "1-9", "name": "Sin Datos" }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(worker.group, None);
        assert!(worker.weighings.is_empty());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let json = r#"{
            "id": "1-9",
            "name": "X",
            "weighings": { "2024-01-01": ["12.5", " 3 "] }
        }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(worker.weighings["2024-01-01"], vec![12.5, 3.0]);
    }

    #[test]
    fn test_malformed_quantities_become_nan() {
        let json = r#"{
            "id": "1-9",
            "name": "X",
            "weighings": { "2024-01-01": [10, "abc", null, {"kg": 2}] }
        }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        let day = &worker.weighings["2024-01-01"];
        assert_eq!(day.len(), 4);
        assert_eq!(day[0], 10.0);
        assert!(day[1].is_nan());
        assert!(day[2].is_nan());
        assert!(day[3].is_nan());
    }

    #[test]
    fn test_non_array_day_entry_becomes_empty() {
        let json = r#"{
            "id": "1-9",
            "name": "X",
            "weighings": { "2024-01-01": 42, "2024-01-02": [1.0] }
        }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        assert!(worker.weighings["2024-01-01"].is_empty());
        assert_eq!(worker.weighings["2024-01-02"], vec![1.0]);
    }

    #[test]
    fn test_unparseable_date_keys_are_kept() {
        // Date validation happens during aggregation, not at load time.
        let json = r#"{
            "id": "1-9",
            "name": "X",
            "weighings": { "not-a-date": [5.0] }
        }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(worker.weighings["not-a-date"], vec![5.0]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let json = r#"{
            "id": "12345678-5",
            "name": "María Peña",
            "group": "Cuadrilla Norte",
            "weighings": { "2024-01-01": [10.5] }
        }"#;

        let worker: WorkerRecord = serde_json::from_str(json).unwrap();
        let serialized = serde_json::to_string(&worker).unwrap();
        let deserialized: WorkerRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(worker, deserialized);
    }
}
