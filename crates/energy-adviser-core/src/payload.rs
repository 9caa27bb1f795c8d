//! Reading payload loader
//!
//! Accepts the shapes upstream collaborators actually send: a bare JSON array
//! of readings, the `{ "data": [...] }` body of the analysis endpoints, or a
//! sample-data document carrying `consumptionData`. Anything that is not an
//! ordered sequence is rejected with [`CoreError::InvalidInput`] rather than
//! being treated as empty.

use crate::error::{CoreError, Result};
use crate::models::Reading;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Envelope members that may carry the reading array, in lookup order
const ENVELOPE_KEYS: &[&str] = &["data", "consumptionData"];

/// Normalize a JSON payload into readings
pub fn readings_from_json(payload: &Value) -> Result<Vec<Reading>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(obj) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| obj.get(*key))
            .ok_or_else(|| {
                warn!("Payload object has no reading array");
                CoreError::invalid_input("expected a \"data\" array")
            })?
            .as_array()
            .ok_or_else(|| {
                warn!("Payload reading member is not an array");
                CoreError::invalid_input("reading member is not an array")
            })?,
        other => {
            warn!(kind = json_kind(other), "Rejected non-sequence payload");
            return Err(CoreError::invalid_input(format!(
                "expected an array, got {}",
                json_kind(other)
            )));
        }
    };

    let readings: Vec<Reading> = items.iter().map(Reading::from_value).collect();
    debug!(count = readings.len(), "Normalized readings");
    Ok(readings)
}

/// Parse an in-memory payload; `origin` is only used in error messages
pub fn parse_readings(content: &str, origin: &Path) -> Result<Vec<Reading>> {
    let payload: Value = serde_json::from_str(content).map_err(|e| CoreError::JsonParse {
        path: origin.to_path_buf(),
        message: e.to_string(),
        source: e,
    })?;
    readings_from_json(&payload)
}

/// Read and normalize a payload file
pub fn load_readings(path: &Path) -> Result<Vec<Reading>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_readings(&content, path)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let readings = readings_from_json(&json!([
            {"timestamp": "2024-01-01T00:00:00Z", "consumption": 1},
            {"timestamp": "2024-01-01T01:00:00Z", "value": 2}
        ]))
        .unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].consumption, 2.0);
    }

    #[test]
    fn test_data_envelope() {
        let readings = readings_from_json(&json!({"data": [{"consumption": 3}]})).unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[test]
    fn test_sample_data_envelope() {
        let readings = readings_from_json(&json!({
            "meters": [],
            "consumptionData": [{"date": "2024-01-01", "value": 9}]
        }))
        .unwrap();
        assert_eq!(readings[0].consumption, 9.0);
        assert_eq!(readings[0].hour(), Some(0));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(readings_from_json(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_sequence() {
        for payload in [
            json!(null),
            json!(42),
            json!("data"),
            json!({"data": {"a": 1}}),
            json!({}),
        ] {
            let err = readings_from_json(&payload).unwrap_err();
            assert!(err.is_invalid_input(), "{payload} should be rejected");
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_readings("[{", Path::new("<stdin>")).unwrap_err();
        assert!(matches!(err, CoreError::JsonParse { .. }));
    }
}
