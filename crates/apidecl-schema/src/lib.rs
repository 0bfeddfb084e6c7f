//! # apidecl-schema: Schema Composition & Validation
//!
//! Declares the graph of named schema nodes that make up the Swagger 1.2
//! document family (a resource listing plus per-resource API declarations)
//! and validates arbitrary [`Value`] trees against any of them.
//!
//! ## Pieces
//!
//! - [`constraint`]: atomic checks on a single value (type, non-empty, enum)
//!   and the key patterns of open maps.
//! - [`node`]: [`SchemaNode`], an ordered table of fields, each with a
//!   [`Shape`] and a required flag. Nodes reference other nodes by `Arc`.
//! - [`registry`]: the fixed, immutable graph of the eleven nodes, built
//!   once in dependency order.
//! - [`validator`]: one generic interpreter that walks a node and a value in
//!   parallel and accumulates every violation.
//! - [`report`]: [`Report`], either valid or a non-empty ordered violation list.
//! - [`lint`]: opt-in semantic rules the structural layer cannot express
//!   (path parameters must be required, no inheritance cycles, ...).
//! - [`export`]: renders any node as a JSON Schema document.
//!
//! ## Usage
//!
//! ```
//! use apidecl_core::Value;
//! use apidecl_schema::{Registry, SchemaName};
//!
//! let doc = Value::from(serde_json::json!({
//!     "swaggerVersion": "1.2",
//!     "apis": [{ "path": "/pets" }]
//! }));
//! let report = Registry::global().validate_as(SchemaName::ResourceListing, &doc);
//! assert!(report.is_valid());
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `apidecl-core` internally.
//! - Validation never returns an error for a document: mismatches are data
//!   in the [`Report`]. Errors are reserved for contract faults such as an
//!   unknown schema name.
//! - The registry is immutable after construction and shared freely across
//!   threads.

pub mod constraint;
mod definitions;
pub mod export;
pub mod lint;
pub mod node;
pub mod options;
pub mod registry;
pub mod report;
pub mod validator;

pub use apidecl_core::{ApiDeclError, Value, ValueKind};
pub use constraint::{Constraint, Failure, KeyPattern, Literal};
pub use node::{FieldSpec, SchemaNode, SchemaNodeBuilder, Shape};
pub use options::{UnknownFields, ValidationOptions};
pub use registry::{Registry, SchemaName, SWAGGER_VERSION};
pub use report::{Report, Violation, ViolationKind, Violations};
pub use validator::{FieldPath, Validator};

/// Validate `document` against the schema called `schema_name` using the
/// process-wide registry and permissive options.
///
/// # Errors
///
/// Returns [`ApiDeclError::UnknownSchema`] if `schema_name` is not one of
/// the registered schema names. Document violations are never errors.
pub fn validate(schema_name: &str, document: &Value) -> Result<Report, ApiDeclError> {
    Registry::global().validate(schema_name, document)
}
