//! # Constraint Primitives
//!
//! Reusable atomic checks applied to a single value. A scalar field carries
//! an ordered list of constraints; the validator evaluates them in order and
//! reports only the first failure, so a number in a string-typed enum field
//! yields one "wrong type" violation rather than a type and an enum one.
//!
//! There is no coercion anywhere: `"200"` is not a number and `5` is not a
//! string.

use std::fmt;

use regex::Regex;

use apidecl_core::{Value, ValueKind};

use crate::report::ViolationKind;

/// A literal member of an enum constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string member, compared case-sensitively.
    Str(String),
    /// A numeric member.
    Number(f64),
}

impl Literal {
    /// True if `value` is the same kind of scalar and equal to this literal.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Str(expected), Value::String(found)) => expected == found,
            (Self::Number(expected), Value::Number(found)) => found.as_f64() == Some(*expected),
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// An atomic check on one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The value's variant must be `kind`.
    TypeIs(ValueKind),
    /// A string value must not be empty. Non-strings pass.
    NonEmpty,
    /// The value must equal one of the listed literals.
    EnumOf(Vec<Literal>),
}

impl Constraint {
    /// Evaluate this constraint against `value`.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] describing why `value` was rejected.
    pub fn check(&self, value: &Value) -> Result<(), Failure> {
        match self {
            Self::TypeIs(kind) => {
                if value.kind() == *kind {
                    Ok(())
                } else {
                    Err(Failure::WrongType {
                        expected: *kind,
                        found: value.kind(),
                    })
                }
            }
            Self::NonEmpty => match value {
                Value::String(s) if s.is_empty() => Err(Failure::EmptyString),
                _ => Ok(()),
            },
            Self::EnumOf(allowed) => {
                if allowed.iter().any(|lit| lit.matches(value)) {
                    Ok(())
                } else {
                    Err(Failure::NotInEnum {
                        found: describe_scalar(value),
                        allowed: allowed.clone(),
                    })
                }
            }
        }
    }
}

/// Why a single constraint rejected a value. Carries no path; the
/// validator supplies it when turning a failure into a violation.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The value had the wrong variant.
    WrongType {
        /// Kind the schema asked for.
        expected: ValueKind,
        /// Kind the document contained.
        found: ValueKind,
    },
    /// An empty string where one is not tolerated.
    EmptyString,
    /// A value outside the allowed set.
    NotInEnum {
        /// Rendered form of the offending value.
        found: String,
        /// The allowed members.
        allowed: Vec<Literal>,
    },
}

impl Failure {
    /// The violation category this failure maps to.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::WrongType { .. } => ViolationKind::WrongType,
            Self::EmptyString => ViolationKind::EmptyString,
            Self::NotInEnum { .. } => ViolationKind::NotInEnum,
        }
    }

    /// Human-readable reason, with `at` naming the location.
    pub fn reason(&self, at: &dyn fmt::Display) -> String {
        match self {
            Self::WrongType { expected, found } => {
                format!("wrong type at {at}: expected {expected}, found {found}")
            }
            Self::EmptyString => format!("empty string is not allowed at {at}"),
            Self::NotInEnum { found, allowed } => {
                let allowed: Vec<String> = allowed.iter().map(Literal::to_string).collect();
                format!("value {found} at {at} is not one of [{}]", allowed.join(", "))
            }
        }
    }
}

/// Key filter of an open map field.
///
/// The Swagger 1.2 maps (`models`, `properties`) accept every string key,
/// which is what [`KeyPattern::Any`] expresses without a regex. Node tables
/// for other formats can restrict keys with [`KeyPattern::Matching`].
#[derive(Debug, Clone, Default)]
pub enum KeyPattern {
    /// Any string key.
    #[default]
    Any,
    /// Keys must match the regex (unanchored, `Regex::is_match` semantics).
    Matching(Regex),
}

impl KeyPattern {
    /// True if `key` is admitted by this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Matching(re) => re.is_match(key),
        }
    }

    /// The regex source, or `None` for [`KeyPattern::Any`].
    pub fn as_regex_str(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Matching(re) => Some(re.as_str()),
        }
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_regex_str() == other.as_regex_str()
    }
}

/// Short rendering of a value for enum-mismatch reasons.
fn describe_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_type_is() {
        let c = Constraint::TypeIs(ValueKind::String);
        assert!(c.check(&v(json!("x"))).is_ok());
        let err = c.check(&v(json!(5))).unwrap_err();
        assert_eq!(
            err,
            Failure::WrongType {
                expected: ValueKind::String,
                found: ValueKind::Number
            }
        );
    }

    #[test]
    fn test_type_is_rejects_null() {
        let c = Constraint::TypeIs(ValueKind::Bool);
        assert!(c.check(&Value::Null).is_err());
    }

    #[test]
    fn test_no_coercion() {
        assert!(Constraint::TypeIs(ValueKind::Number).check(&v(json!("200"))).is_err());
        assert!(Constraint::TypeIs(ValueKind::Bool).check(&v(json!("true"))).is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(
            Constraint::NonEmpty.check(&v(json!(""))),
            Err(Failure::EmptyString)
        );
        assert!(Constraint::NonEmpty.check(&v(json!(" "))).is_ok());
        assert!(Constraint::NonEmpty.check(&v(json!(3))).is_ok());
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let c = Constraint::EnumOf(vec!["GET".into(), "POST".into()]);
        assert!(c.check(&v(json!("GET"))).is_ok());
        let err = c.check(&v(json!("get"))).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::NotInEnum);
    }

    #[test]
    fn test_enum_numeric_members() {
        let c = Constraint::EnumOf(vec![Literal::Number(200.0), Literal::Number(404.0)]);
        assert!(c.check(&v(json!(404))).is_ok());
        assert!(c.check(&v(json!("404"))).is_err());
    }

    #[test]
    fn test_enum_reason_lists_members() {
        let c = Constraint::EnumOf(vec!["1.2".into()]);
        let err = c.check(&v(json!("2.0"))).unwrap_err();
        assert_eq!(
            err.reason(&".swaggerVersion"),
            r#"value "2.0" at .swaggerVersion is not one of ["1.2"]"#
        );
    }

    #[test]
    fn test_key_pattern() {
        assert!(KeyPattern::Any.matches(""));
        assert!(KeyPattern::Any.matches("any key at all"));
        let p = KeyPattern::Matching(Regex::new("^x-").unwrap());
        assert!(p.matches("x-internal"));
        assert!(!p.matches("internal"));
        assert_eq!(p.as_regex_str(), Some("^x-"));
    }
}
