//! Deserializers for fields the backend does not type consistently.
//!
//! The voting API serializes identifiers sometimes as numbers and sometimes as
//! strings, and `hasVoted` has been observed as `true`, `"true"` and `1`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `true`, `"true"` (any case) or `1` as true. Everything else,
/// including `null`, is false.
pub fn bool_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_u64() == Some(1),
        _ => false,
    })
}

/// Accepts an unsigned id encoded either as a JSON number or a numeric string.
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_id(&value).ok_or_else(|| D::Error::custom(format!("invalid id: {}", value)))
}

/// Optional variant of [`id`]; `null`, a missing field and an empty string map to `None`.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => parse_id(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid id: {}", v))),
    }
}

fn parse_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "bool_flag")]
        value: bool,
    }

    #[derive(Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "id")]
        required: u64,
        #[serde(default, deserialize_with = "opt_id")]
        optional: Option<u64>,
    }

    fn flag(json: &str) -> bool {
        serde_json::from_str::<Flag>(json).unwrap().value
    }

    #[test]
    fn test_bool_flag_variants() {
        assert!(flag(r#"{"value": true}"#));
        assert!(flag(r#"{"value": "true"}"#));
        assert!(flag(r#"{"value": "TRUE"}"#));
        assert!(flag(r#"{"value": 1}"#));
        assert!(!flag(r#"{"value": 0}"#));
        assert!(!flag(r#"{"value": "yes"}"#));
        assert!(!flag(r#"{"value": null}"#));
        assert!(!flag(r#"{}"#));
    }

    #[test]
    fn test_ids_from_numbers_and_strings() {
        let ids: Ids = serde_json::from_str(r#"{"required": "42", "optional": 7}"#).unwrap();
        assert_eq!(ids.required, 42);
        assert_eq!(ids.optional, Some(7));

        let ids: Ids = serde_json::from_str(r#"{"required": 3, "optional": ""}"#).unwrap();
        assert_eq!(ids.required, 3);
        assert_eq!(ids.optional, None);
    }

    #[test]
    fn test_invalid_id_rejected() {
        assert!(serde_json::from_str::<Ids>(r#"{"required": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Ids>(r#"{"required": -1}"#).is_err());
    }
}
