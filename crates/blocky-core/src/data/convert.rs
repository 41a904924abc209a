//! Conversions from JSON and TOML documents into records

use super::{Record, Value, VARIANT_KEY};
use crate::error::{BlockyError, Result};
use std::path::Path;

/// Interpret a `vari_idx` entry; `false` means "clear"
fn variant_from_json(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Bool(false) => Some(-1),
        serde_json::Value::Bool(true) => Some(1),
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn variant_from_toml(value: &toml::Value) -> Option<i64> {
    match value {
        toml::Value::Boolean(false) => Some(-1),
        toml::Value::Boolean(true) => Some(1),
        toml::Value::Integer(i) => Some(*i),
        toml::Value::Float(f) => Some(*f as i64),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(Record::from(map)),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut record = Record::new();
        for (name, value) in map {
            if name == VARIANT_KEY {
                record.set_variant(variant_from_json(&value));
            } else {
                record.insert(name, Value::from(value));
            }
        }
        record
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::Text(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::Text(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::Record(Record::from(table)),
        }
    }
}

impl From<toml::Table> for Record {
    fn from(table: toml::Table) -> Self {
        let mut record = Record::new();
        for (name, value) in table {
            if name == VARIANT_KEY {
                record.set_variant(variant_from_toml(&value));
            } else {
                record.insert(name, Value::from(value));
            }
        }
        record
    }
}

impl Record {
    /// Parse a JSON object into a record
    pub fn from_json_str(text: &str) -> Result<Self> {
        match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Object(map) => Ok(Record::from(map)),
            other => Err(BlockyError::DataParse(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Read a JSON object from a file into a record
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BlockyError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a TOML document into a record
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(text).map_err(|e| BlockyError::DataParse(e.to_string()))?;
        Ok(Record::from(table))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object_to_record() {
        let record = Record::from_json_str(
            r#"{"name": "apples", "qty": 2, "ratio": 0.5, "ok": true, "none": null,
                "tags": ["a", "b"], "sub": {"x": 1}}"#,
        )
        .unwrap();

        assert_eq!(record.get("name"), Some(&Value::Text("apples".to_string())));
        assert_eq!(record.get("qty"), Some(&Value::Int(2)));
        assert_eq!(record.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(record.get("ok"), Some(&Value::Bool(true)));
        assert_eq!(record.get("none"), Some(&Value::Null));
        assert_eq!(record.get("tags"), Some(&Value::from(vec!["a", "b"])));
        assert_eq!(
            record.get("sub"),
            Some(&Value::Record(Record::new().with("x", 1)))
        );
    }

    #[test]
    fn test_json_integral_float_keeps_decimal() {
        let record = Record::from_json_str(r#"{"qty": 1.0, "n": 1}"#).unwrap();
        assert_eq!(record.get("qty").map(|v| v.text().into_owned()), Some("1.0".to_string()));
        assert_eq!(record.get("n").map(|v| v.text().into_owned()), Some("1".to_string()));
    }

    #[test]
    fn test_json_variant_key() {
        let record = Record::from_json_str(r#"{"vari_idx": 2, "t": "u8"}"#).unwrap();
        assert_eq!(record.variant(), Some(2));
        assert!(record.get(VARIANT_KEY).is_none());

        let record = Record::from_json_str(r#"{"vari_idx": false}"#).unwrap();
        assert_eq!(record.variant(), Some(-1));
    }

    #[test]
    fn test_json_top_level_must_be_object() {
        let err = Record::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, BlockyError::DataParse(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_missing_json_file() {
        let err = Record::from_json_file("/nonexistent/data.json").unwrap_err();
        assert!(matches!(err, BlockyError::FileRead { .. }));
        assert!(err.to_string().starts_with("FILE_READ_ERROR"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Record::from_json_str("{").unwrap_err();
        assert!(err.to_string().starts_with("DATA_PARSE_ERROR"));
    }

    #[test]
    fn test_toml_to_record() {
        let record = Record::from_toml_str(
            r#"
title = "Report"
count = 3

[flag]
vari_idx = 1

[[rows]]
name = "a"
"#,
        )
        .unwrap();

        assert_eq!(record.get("title"), Some(&Value::from("Report")));
        assert_eq!(record.get("count"), Some(&Value::Int(3)));
        match record.get("flag") {
            Some(Value::Record(flag)) => assert_eq!(flag.variant(), Some(1)),
            other => panic!("unexpected flag value: {:?}", other),
        }
        match record.get("rows") {
            Some(Value::Sequence(rows)) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected rows value: {:?}", other),
        }
    }
}
