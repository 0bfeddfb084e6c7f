//! # Schema Registry
//!
//! The complete, immutable graph of the eleven Swagger 1.2 schema nodes.
//! Built once by [`Registry::new`] in dependency order (leaves first), then
//! only read. [`Registry::global`] holds a process-wide instance.
//!
//! Each node has its own slot and [`Registry::node`] matches exhaustively on
//! [`SchemaName`], so a typed lookup cannot miss. String lookups go through
//! [`SchemaName::from_str`] and fail with [`ApiDeclError::UnknownSchema`].

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use apidecl_core::{ApiDeclError, Value};

use crate::lint;
use crate::node::SchemaNode;
use crate::options::ValidationOptions;
use crate::report::Report;
use crate::validator::Validator;

/// The only `swaggerVersion` accepted by this document family.
pub const SWAGGER_VERSION: &str = "1.2";

/// Names of the registered schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaName {
    /// Element type descriptor for arrays.
    Items,
    /// One documented response of an operation.
    ResponseMessage,
    /// One input of an operation.
    Parameter,
    /// One HTTP method on a path.
    Operation,
    /// One path and its operations.
    #[serde(rename = "API")]
    Api,
    /// One field of a model.
    Property,
    /// A named data type definition.
    Model,
    /// Pointer from a resource listing to a declaration.
    #[serde(rename = "APIReference")]
    ApiReference,
    /// API metadata.
    Info,
    /// Top-level index of an API.
    ResourceListing,
    /// Full description of one resource's operations.
    #[serde(rename = "APIDeclaration")]
    ApiDeclaration,
}

impl SchemaName {
    /// All schema names in registration (dependency) order.
    pub fn all() -> &'static [SchemaName] {
        &[
            Self::Items,
            Self::ResponseMessage,
            Self::Parameter,
            Self::Operation,
            Self::Api,
            Self::Property,
            Self::Model,
            Self::ApiReference,
            Self::Info,
            Self::ResourceListing,
            Self::ApiDeclaration,
        ]
    }

    /// The document-format label, e.g. `"APIDeclaration"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Items => "Items",
            Self::ResponseMessage => "ResponseMessage",
            Self::Parameter => "Parameter",
            Self::Operation => "Operation",
            Self::Api => "API",
            Self::Property => "Property",
            Self::Model => "Model",
            Self::ApiReference => "APIReference",
            Self::Info => "Info",
            Self::ResourceListing => "ResourceListing",
            Self::ApiDeclaration => "APIDeclaration",
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = ApiDeclError;

    /// Parse an exact, case-sensitive label as produced by [`SchemaName::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ApiDeclError::UnknownSchema(s.to_string()))
    }
}

/// The immutable set of schema nodes for the document family.
#[derive(Debug)]
pub struct Registry {
    pub(crate) items: Arc<SchemaNode>,
    pub(crate) response_message: Arc<SchemaNode>,
    pub(crate) parameter: Arc<SchemaNode>,
    pub(crate) operation: Arc<SchemaNode>,
    pub(crate) api: Arc<SchemaNode>,
    pub(crate) property: Arc<SchemaNode>,
    pub(crate) model: Arc<SchemaNode>,
    pub(crate) api_reference: Arc<SchemaNode>,
    pub(crate) info: Arc<SchemaNode>,
    pub(crate) resource_listing: Arc<SchemaNode>,
    pub(crate) api_declaration: Arc<SchemaNode>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Build every node in dependency order.
    pub fn new() -> Self {
        let registry = crate::definitions::swagger_1_2();
        tracing::debug!(nodes = SchemaName::all().len(), "schema registry built");
        registry
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// The node registered under `name`.
    pub fn node(&self, name: SchemaName) -> &Arc<SchemaNode> {
        match name {
            SchemaName::Items => &self.items,
            SchemaName::ResponseMessage => &self.response_message,
            SchemaName::Parameter => &self.parameter,
            SchemaName::Operation => &self.operation,
            SchemaName::Api => &self.api,
            SchemaName::Property => &self.property,
            SchemaName::Model => &self.model,
            SchemaName::ApiReference => &self.api_reference,
            SchemaName::Info => &self.info,
            SchemaName::ResourceListing => &self.resource_listing,
            SchemaName::ApiDeclaration => &self.api_declaration,
        }
    }

    /// Look up a node by its label.
    ///
    /// # Errors
    ///
    /// Returns [`ApiDeclError::UnknownSchema`] for labels not in the registry.
    pub fn resolve(&self, label: &str) -> Result<&Arc<SchemaNode>, ApiDeclError> {
        Ok(self.node(label.parse()?))
    }

    /// Registered nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = (SchemaName, &Arc<SchemaNode>)> {
        SchemaName::all().iter().map(move |&name| (name, self.node(name)))
    }

    /// Validate `document` against the schema labelled `schema_name` with
    /// permissive options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiDeclError::UnknownSchema`] if `schema_name` is not
    /// registered. Document violations are reported in the [`Report`].
    pub fn validate(&self, schema_name: &str, document: &Value) -> Result<Report, ApiDeclError> {
        let name: SchemaName = schema_name.parse()?;
        Ok(self.validate_as(name, document))
    }

    /// Validate `document` against `name` with permissive options.
    pub fn validate_as(&self, name: SchemaName, document: &Value) -> Report {
        self.validate_with(name, document, &ValidationOptions::default())
    }

    /// Validate `document` against `name` with explicit options.
    ///
    /// The semantic lint pass runs only when enabled and the structural pass
    /// found nothing.
    pub fn validate_with(&self, name: SchemaName, document: &Value, options: &ValidationOptions) -> Report {
        let mut violations = Validator::new(options).validate(self.node(name), document);
        if violations.is_empty() && options.semantic_checks {
            tracing::trace!(schema = %name, "running semantic checks");
            violations = lint::check(name, document);
        }
        tracing::debug!(schema = %name, violations = violations.len(), "validated document");
        Report::from_violations(violations)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Shape;

    #[test]
    fn test_all_names_count_and_unique() {
        let names = SchemaName::all();
        assert_eq!(names.len(), 11);
        let mut seen = std::collections::HashSet::new();
        for n in names {
            assert!(seen.insert(n), "Duplicate schema name: {n}");
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for name in SchemaName::all() {
            let parsed: SchemaName = name.as_str().parse().unwrap();
            assert_eq!(*name, parsed);
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("Api".parse::<SchemaName>().is_err());
        assert!("apideclaration".parse::<SchemaName>().is_err());
        assert!("".parse::<SchemaName>().is_err());
    }

    #[test]
    fn test_serde_uses_format_labels() {
        for name in SchemaName::all() {
            let json = serde_json::to_string(name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.as_str()));
        }
    }

    #[test]
    fn test_node_labels_match_names() {
        let registry = Registry::new();
        for (name, node) in registry.nodes() {
            assert_eq!(node.label(), name.as_str());
        }
    }

    #[test]
    fn test_resolve_unknown_is_contract_fault() {
        let err = Registry::new().resolve("Widget").unwrap_err();
        assert!(matches!(err, ApiDeclError::UnknownSchema(ref n) if n == "Widget"));
    }

    #[test]
    fn test_validate_unknown_schema_is_error_not_report() {
        let err = Registry::new().validate("Pet", &Value::Null).unwrap_err();
        assert!(matches!(err, ApiDeclError::UnknownSchema(_)));
    }

    #[test]
    fn test_global_is_built_once() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
    }

    fn items_of(shape: &Shape) -> Option<&Arc<SchemaNode>> {
        match shape {
            Shape::Node(n) => Some(n),
            _ => None,
        }
    }

    #[test]
    fn test_items_node_is_shared() {
        let registry = Registry::new();
        let from_parameter = registry
            .parameter
            .field("items")
            .and_then(|f| items_of(&f.shape))
            .unwrap();
        let from_property = registry
            .property
            .field("items")
            .and_then(|f| items_of(&f.shape))
            .unwrap();
        let from_operation = registry
            .operation
            .field("items")
            .and_then(|f| items_of(&f.shape))
            .unwrap();
        assert!(Arc::ptr_eq(from_parameter, &registry.items));
        assert!(Arc::ptr_eq(from_property, &registry.items));
        assert!(Arc::ptr_eq(from_operation, &registry.items));
    }

    #[test]
    fn test_required_fields_per_node() {
        let registry = Registry::new();
        let req = |n: SchemaName| registry.node(n).required_fields().collect::<Vec<_>>();
        assert_eq!(req(SchemaName::ResourceListing), vec!["swaggerVersion", "apis"]);
        assert_eq!(req(SchemaName::ApiReference), vec!["path"]);
        assert_eq!(req(SchemaName::Info), vec!["title", "description"]);
        assert_eq!(req(SchemaName::ApiDeclaration), vec!["swaggerVersion", "apis"]);
        assert_eq!(req(SchemaName::Api), vec!["path"]);
        assert_eq!(req(SchemaName::Operation), vec!["method", "nickname", "type"]);
        assert_eq!(req(SchemaName::Parameter), vec!["paramType", "name", "type"]);
        assert_eq!(req(SchemaName::ResponseMessage), vec!["code", "message"]);
        assert!(req(SchemaName::Items).is_empty());
        assert_eq!(req(SchemaName::Model), vec!["id"]);
        assert!(req(SchemaName::Property).is_empty());
    }
}
