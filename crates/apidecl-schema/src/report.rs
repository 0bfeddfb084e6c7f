//! # Validation Reports
//!
//! The outcome of one validation call. A document is either wholly valid or
//! carries a non-empty, ordered list of violations (depth-first, in field
//! declaration order). There is no partial success.
//!
//! For external reporting a [`Report`] serializes as `{"valid": true}` or
//! `{"valid": false, "violations": [{"path": ..., "reason": ...}, ...]}`.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Category of a violation. Not part of the serialized contract; lets
/// callers filter without parsing reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A required field is absent.
    MissingRequired,
    /// A value has the wrong variant.
    WrongType,
    /// An empty string where one is not tolerated.
    EmptyString,
    /// A value outside its enum.
    NotInEnum,
    /// A map key rejected by the field's key pattern.
    KeyMismatch,
    /// An undeclared field, reported only in strict mode.
    UnknownField,
    /// A semantic rule from the lint pass.
    Semantic,
}

/// A single mismatch between a document and a schema.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    /// Location in the document, e.g. `.apis[0].operations[1].method`.
    /// Empty for the document root.
    pub path: String,
    /// Human-readable description.
    pub reason: String,
    /// Category.
    #[serde(skip)]
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.reason)
        } else {
            write!(f, "  {}: {}", self.path, self.reason)
        }
    }
}

/// A non-empty collection of violations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false for a report-produced value.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// No violations at any depth.
    Valid,
    /// At least one violation.
    Invalid(Violations),
}

impl Report {
    /// Build a report from accumulated violations; empty means valid.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(Violations { violations })
        }
    }

    /// True if the document had no violations.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// All violations, empty for a valid report.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(v) => v.violations(),
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    ///
    /// # Errors
    ///
    /// Returns the violations if the report is invalid.
    pub fn into_result(self) -> Result<(), Violations> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(v) => Err(v),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid(v) => write!(f, "invalid ({} violations):\n{v}", v.len()),
        }
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid => {
                let mut s = serializer.serialize_struct("Report", 1)?;
                s.serialize_field("valid", &true)?;
                s.end()
            }
            Self::Invalid(violations) => {
                let mut s = serializer.serialize_struct("Report", 2)?;
                s.serialize_field("valid", &false)?;
                s.serialize_field("violations", violations)?;
                s.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violation(path: &str, reason: &str) -> Violation {
        Violation {
            path: path.to_string(),
            reason: reason.to_string(),
            kind: ViolationKind::MissingRequired,
        }
    }

    #[test]
    fn test_empty_violations_is_valid() {
        assert_eq!(Report::from_violations(Vec::new()), Report::Valid);
        assert!(Report::Valid.violations().is_empty());
        assert!(Report::Valid.into_result().is_ok());
    }

    #[test]
    fn test_serialize_valid() {
        assert_eq!(serde_json::to_value(Report::Valid).unwrap(), json!({"valid": true}));
    }

    #[test]
    fn test_serialize_invalid_omits_kind() {
        let report = Report::from_violations(vec![violation(".apis", "missing required field .apis")]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "valid": false,
                "violations": [{"path": ".apis", "reason": "missing required field .apis"}]
            })
        );
    }

    #[test]
    fn test_violation_display_root() {
        let v = violation("", "wrong type at (root): expected mapping, found string");
        assert!(v.to_string().contains("(root)"));
    }

    #[test]
    fn test_report_display_counts() {
        let report = Report::from_violations(vec![violation(".a", "x"), violation(".b", "y")]);
        let text = report.to_string();
        assert!(text.starts_with("invalid (2 violations)"));
        assert!(text.contains("  .b: y"));
    }
}
