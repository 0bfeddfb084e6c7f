//! # Document Value Model
//!
//! The generic runtime representation of a parsed document: scalars,
//! sequences, string-keyed mappings, and null. Every schema in the registry
//! validates against this model and nothing else.
//!
//! ## Ingestion
//!
//! The document deserializer is an external collaborator. Three paths lead
//! into the model:
//!
//! - `serde` deserialization (untagged) from any self-describing format.
//! - `From<serde_json::Value>`, which is total.
//! - `TryFrom<&serde_yaml::Value>`, which stringifies scalar mapping keys,
//!   ignores tags, and rejects anything else.
//!
//! Mapping keys are kept in a `BTreeMap`, so iteration is sorted by key and
//! independent of the order the source document used.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiDeclError;

/// A node of a parsed document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicit `null`. A present null is a value, not an absent field.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar, integer or finite float.
    Number(serde_json::Number),
    /// A string scalar.
    String(String),
    /// An ordered list of values.
    Sequence(Vec<Value>),
    /// A string-keyed mapping.
    Mapping(BTreeMap<String, Value>),
}

/// The variant tag of a [`Value`], used in type checks and error reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `Value::Null`.
    Null,
    /// `Value::Bool`.
    Bool,
    /// `Value::Number`.
    Number,
    /// `Value::String`.
    String,
    /// `Value::Sequence`.
    Sequence,
    /// `Value::Mapping`.
    Mapping,
}

impl ValueKind {
    /// Returns the lowercase name used in violation reasons.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric payload as `f64`, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the elements, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is a mapping. Returns `None` for absent keys
    /// and for non-mapping values alike.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Convenience: the string at `key` of a mapping.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Parse a JSON text into the value model.
    pub fn from_json_str(text: &str) -> Result<Self, ApiDeclError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from(json))
    }

    /// Parse a YAML text into the value model.
    pub fn from_yaml_str(text: &str) -> Result<Self, ApiDeclError> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
        Self::try_from(&yaml)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Mapping(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl TryFrom<&serde_yaml::Value> for Value {
    type Error = ApiDeclError;

    /// Convert a YAML tree. Scalar keys are stringified; sequence, mapping
    /// and null keys have no string form and are rejected.
    fn try_from(yaml: &serde_yaml::Value) -> Result<Self, Self::Error> {
        match yaml {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Number(serde_json::Number::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Number(serde_json::Number::from(u)))
                } else if let Some(f) = n.as_f64() {
                    serde_json::Number::from_f64(f)
                        .map(Self::Number)
                        .ok_or_else(|| {
                            ApiDeclError::ValueConversion(format!("non-finite number {f}"))
                        })
                } else {
                    Err(ApiDeclError::ValueConversion(format!(
                        "unsupported YAML number: {n:?}"
                    )))
                }
            }
            serde_yaml::Value::String(s) => Ok(Self::String(s.clone())),
            serde_yaml::Value::Sequence(seq) => seq
                .iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            serde_yaml::Value::Mapping(map) => {
                let mut out = BTreeMap::new();
                for (k, v) in map {
                    let key = match k {
                        serde_yaml::Value::String(s) => s.clone(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => {
                            return Err(ApiDeclError::ValueConversion(format!(
                                "unsupported mapping key: {other:?}"
                            )))
                        }
                    };
                    out.insert(key, Self::try_from(v)?);
                }
                Ok(Self::Mapping(out))
            }
            serde_yaml::Value::Tagged(tagged) => Self::try_from(&tagged.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_each_variant() {
        let v = Value::from(json!({
            "n": null, "b": true, "x": 1.5, "s": "a", "seq": [], "map": {}
        }));
        let kinds: Vec<ValueKind> = v
            .as_mapping()
            .unwrap()
            .values()
            .map(Value::kind)
            .collect();
        // BTreeMap order: b, map, n, s, seq, x
        assert_eq!(
            kinds,
            vec![
                ValueKind::Bool,
                ValueKind::Mapping,
                ValueKind::Null,
                ValueKind::String,
                ValueKind::Sequence,
                ValueKind::Number,
            ]
        );
    }

    #[test]
    fn test_get_on_non_mapping_is_none() {
        assert!(Value::String("x".into()).get("x").is_none());
        assert!(Value::Null.get("x").is_none());
    }

    #[test]
    fn test_present_null_is_not_absent() {
        let v = Value::from(json!({"info": null}));
        assert_eq!(v.get("info"), Some(&Value::Null));
        assert_eq!(v.get("missing"), None);
    }

    #[test]
    fn test_yaml_conversion() {
        let v = Value::from_yaml_str(
            r#"
swaggerVersion: "1.2"
count: 42
enabled: true
apis:
  - path: /pets
"#,
        )
        .unwrap();
        assert_eq!(v.get_str("swaggerVersion"), Some("1.2"));
        assert_eq!(v.get("count").and_then(Value::as_f64), Some(42.0));
        assert_eq!(v.get("enabled").and_then(Value::as_bool), Some(true));
        let apis = v.get("apis").and_then(Value::as_sequence).unwrap();
        assert_eq!(apis[0].get_str("path"), Some("/pets"));
    }

    #[test]
    fn test_yaml_numeric_keys_stringified() {
        let v = Value::from_yaml_str("200: ok\ntrue: yes").unwrap();
        assert_eq!(v.get_str("200"), Some("ok"));
        assert!(v.get("true").is_some());
    }

    #[test]
    fn test_yaml_sequence_key_rejected() {
        let err = Value::from_yaml_str("? [a, b]\n: x").unwrap_err();
        assert!(matches!(err, ApiDeclError::ValueConversion(_)));
    }

    #[test]
    fn test_yaml_non_finite_rejected() {
        let err = Value::from_yaml_str("x: .nan").unwrap_err();
        assert!(matches!(err, ApiDeclError::ValueConversion(_)));
    }

    #[test]
    fn test_yaml_tags_ignored() {
        let v = Value::from_yaml_str("x: !custom hello").unwrap();
        assert_eq!(v.get_str("x"), Some("hello"));
    }

    #[test]
    fn test_untagged_deserialize() {
        let v: Value = serde_json::from_str(r#"{"a": [1, "two", false, null]}"#).unwrap();
        let items = v.get("a").and_then(Value::as_sequence).unwrap();
        assert_eq!(items[0].kind(), ValueKind::Number);
        assert_eq!(items[1].kind(), ValueKind::String);
        assert_eq!(items[2].kind(), ValueKind::Bool);
        assert_eq!(items[3].kind(), ValueKind::Null);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = Value::from_json_str("{\"a\":").unwrap_err();
        assert!(matches!(err, ApiDeclError::Serialization(_)));
    }
}
