//! Field coercion shared by the CSV and JSON readers.
//!
//! Both readers apply the same rule to every record:
//! * absent (or empty) `sample_size` → `0`
//! * absent (or empty) `time_value`  → `0.0`
//! * absent (or empty) `time_unit`   → no unit, the series keeps its current one
//! * anything present that does not coerce → the whole record is rejected

use serde_json::Value as JsonValue;

use super::error::RecordError;
use super::model::Sample;

pub const SAMPLE_SIZE: &str = "sample_size";
pub const TIME_VALUE: &str = "time_value";
pub const TIME_UNIT: &str = "time_unit";

// ---------------------------------------------------------------------------
// Text fields (CSV cells)
// ---------------------------------------------------------------------------

/// Build a [`Sample`] from raw text cells. `None` means the column is missing.
pub fn sample_from_text(
    record: usize,
    size: Option<&str>,
    time: Option<&str>,
    unit: Option<&str>,
) -> Result<Sample, RecordError> {
    Ok(Sample {
        sample_size: size_from_text(record, size)?,
        time_value: time_from_text(record, time)?,
        time_unit: unit_from_text(unit),
    })
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn size_from_text(record: usize, raw: Option<&str>) -> Result<i64, RecordError> {
    match non_empty(raw) {
        None => Ok(0),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| coercion(record, SAMPLE_SIZE, s, "integer")),
    }
}

fn time_from_text(record: usize, raw: Option<&str>) -> Result<f64, RecordError> {
    match non_empty(raw) {
        None => Ok(0.0),
        Some(s) => s
            .parse::<f64>()
            .map_err(|_| coercion(record, TIME_VALUE, s, "number")),
    }
}

fn unit_from_text(raw: Option<&str>) -> Option<String> {
    non_empty(raw).map(str::to_string)
}

// ---------------------------------------------------------------------------
// JSON fields
// ---------------------------------------------------------------------------

/// Build a [`Sample`] from one element of the top-level JSON array.
pub fn sample_from_json(record: usize, value: &JsonValue) -> Result<Sample, RecordError> {
    let obj = value
        .as_object()
        .ok_or(RecordError::NotAnObject { record })?;

    Ok(Sample {
        sample_size: size_from_json(record, obj.get(SAMPLE_SIZE))?,
        time_value: time_from_json(record, obj.get(TIME_VALUE))?,
        time_unit: unit_from_json(record, obj.get(TIME_UNIT))?,
    })
}

fn size_from_json(record: usize, val: Option<&JsonValue>) -> Result<i64, RecordError> {
    match val {
        None => Ok(0),
        Some(JsonValue::String(s)) => size_from_text(record, Some(s)),
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Whole floats such as `1000.0` are accepted; fractions are not.
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(coercion(record, SAMPLE_SIZE, &n.to_string(), "integer")),
            }
        }
        Some(other) => Err(coercion(record, SAMPLE_SIZE, &other.to_string(), "integer")),
    }
}

fn time_from_json(record: usize, val: Option<&JsonValue>) -> Result<f64, RecordError> {
    match val {
        None => Ok(0.0),
        Some(JsonValue::String(s)) => time_from_text(record, Some(s)),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| coercion(record, TIME_VALUE, &n.to_string(), "number")),
        Some(other) => Err(coercion(record, TIME_VALUE, &other.to_string(), "number")),
    }
}

fn unit_from_json(record: usize, val: Option<&JsonValue>) -> Result<Option<String>, RecordError> {
    match val {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(unit_from_text(Some(s))),
        Some(other) => Err(coercion(record, TIME_UNIT, &other.to_string(), "string")),
    }
}

fn coercion(record: usize, field: &'static str, raw: &str, expected: &'static str) -> RecordError {
    RecordError::Coercion {
        record,
        field,
        raw: raw.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_missing_fields_take_defaults() {
        let s = sample_from_text(1, None, Some(""), None).unwrap();
        assert_eq!(s.sample_size, 0);
        assert_eq!(s.time_value, 0.0);
        assert_eq!(s.time_unit, None);
    }

    #[test]
    fn text_cells_are_trimmed() {
        let s = sample_from_text(1, Some(" 42 "), Some(" 1.5"), Some(" ms ")).unwrap();
        assert_eq!(s.sample_size, 42);
        assert_eq!(s.time_value, 1.5);
        assert_eq!(s.time_unit.as_deref(), Some("ms"));
    }

    #[test]
    fn text_non_numeric_size_is_rejected() {
        let err = sample_from_text(3, Some("abc"), Some("0.2"), Some("ms")).unwrap_err();
        assert_eq!(
            err,
            RecordError::Coercion {
                record: 3,
                field: SAMPLE_SIZE,
                raw: "abc".to_string(),
                expected: "integer",
            }
        );
    }

    #[test]
    fn text_fractional_size_is_rejected() {
        assert!(sample_from_text(1, Some("10.5"), Some("1"), None).is_err());
    }

    #[test]
    fn text_non_numeric_time_is_rejected() {
        let err = sample_from_text(2, Some("10"), Some("fast"), None).unwrap_err();
        assert!(err.to_string().contains("time_value"));
        assert_eq!(err.record(), 2);
    }

    #[test]
    fn json_numbers_and_numeric_strings() {
        let s = sample_from_json(1, &json!({"sample_size": "100", "time_value": "0.5"})).unwrap();
        assert_eq!((s.sample_size, s.time_value), (100, 0.5));

        let s = sample_from_json(1, &json!({"sample_size": 1000.0, "time_value": 2})).unwrap();
        assert_eq!((s.sample_size, s.time_value), (1000, 2.0));
    }

    #[test]
    fn json_missing_keys_take_defaults() {
        let s = sample_from_json(1, &json!({})).unwrap();
        assert_eq!(s.sample_size, 0);
        assert_eq!(s.time_value, 0.0);
        assert_eq!(s.time_unit, None);
    }

    #[test]
    fn json_null_unit_is_absent() {
        let s = sample_from_json(1, &json!({"sample_size": 1, "time_unit": null})).unwrap();
        assert_eq!(s.time_unit, None);
    }

    #[test]
    fn json_wrong_types_are_rejected() {
        assert!(sample_from_json(1, &json!({"sample_size": 1.5})).is_err());
        assert!(sample_from_json(1, &json!({"sample_size": null})).is_err());
        assert!(sample_from_json(1, &json!({"time_value": true})).is_err());
        assert!(sample_from_json(1, &json!({"time_value": [1.0]})).is_err());
        assert!(sample_from_json(1, &json!({"time_unit": 5})).is_err());
    }

    #[test]
    fn json_non_object_element_is_rejected() {
        assert_eq!(
            sample_from_json(4, &json!([1, 2])).unwrap_err(),
            RecordError::NotAnObject { record: 4 }
        );
    }
}
