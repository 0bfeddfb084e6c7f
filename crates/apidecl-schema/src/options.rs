//! # Validation Options
//!
//! Knobs for one validation call. The defaults reproduce the permissive
//! behavior of the Swagger 1.2 tooling: undeclared fields are ignored and
//! semantic rules are not checked.
//!
//! Options deserialize from YAML or JSON, e.g.
//!
//! ```yaml
//! unknown_fields: reject
//! semantic_checks: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use apidecl_core::ApiDeclError;

/// Treatment of fields a node does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Ignore them (permissive mode).
    #[default]
    Allow,
    /// Report each one as a violation (strict mode).
    Reject,
}

/// Configuration for a validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Permissive or strict handling of undeclared fields.
    pub unknown_fields: UnknownFields,
    /// Run the semantic lint pass after a structurally valid result.
    pub semantic_checks: bool,
}

impl ValidationOptions {
    /// Permissive structural validation only. Same as `Default`.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Reject undeclared fields and run the semantic lint pass.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
            semantic_checks: true,
        }
    }

    /// Load options from a file: `.yaml`/`.yml` as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiDeclError::Io`] if the file cannot be read and
    /// [`ApiDeclError::Serialization`] if it does not parse into options.
    pub fn from_path(path: &Path) -> Result<Self, ApiDeclError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(serde_json::from_str(&content)?),
        }
    }
}
