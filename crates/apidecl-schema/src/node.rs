//! # Schema Nodes
//!
//! A [`SchemaNode`] is a named, declarative rule for one mapping-shaped
//! entity: an ordered list of fields, each with a [`Shape`] and a required
//! flag. Nodes are plain data. The one generic interpreter in
//! [`crate::validator`] gives them meaning.
//!
//! Nodes reference each other through `Arc<SchemaNode>`, so a shared node
//! (e.g. `Items`, used by `Parameter`, `Operation` and `Property`) exists
//! exactly once and every referrer points at the same allocation. Building
//! leaves first means every reference is to an already-built node.

use std::sync::Arc;

use apidecl_core::ValueKind;

use crate::constraint::{Constraint, KeyPattern, Literal};

/// What a field's value must look like.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Anything, including `null`.
    Any,
    /// A scalar checked by the constraints in order.
    Scalar(Vec<Constraint>),
    /// A mapping validated against another node.
    Node(Arc<SchemaNode>),
    /// A sequence whose every element has the inner shape.
    ArrayOf(Box<Shape>),
    /// A mapping with free keys (filtered by `keys`) whose every value has
    /// the inner shape.
    MapOf {
        /// Filter applied to each key.
        keys: KeyPattern,
        /// Shape of each value.
        values: Box<Shape>,
    },
}

impl Shape {
    /// A non-empty string.
    pub fn string() -> Self {
        Self::Scalar(vec![Constraint::TypeIs(ValueKind::String), Constraint::NonEmpty])
    }

    /// Any string, the empty string included.
    pub fn string_allow_empty() -> Self {
        Self::Scalar(vec![Constraint::TypeIs(ValueKind::String)])
    }

    /// A number.
    pub fn number() -> Self {
        Self::Scalar(vec![Constraint::TypeIs(ValueKind::Number)])
    }

    /// A boolean.
    pub fn boolean() -> Self {
        Self::Scalar(vec![Constraint::TypeIs(ValueKind::Bool)])
    }

    /// A non-empty string equal to one of `allowed`.
    pub fn one_of(allowed: &[&str]) -> Self {
        Self::Scalar(vec![
            Constraint::TypeIs(ValueKind::String),
            Constraint::NonEmpty,
            Constraint::EnumOf(allowed.iter().copied().map(Literal::from).collect()),
        ])
    }

    /// A mapping checked against `node`.
    pub fn node(node: &Arc<SchemaNode>) -> Self {
        Self::Node(Arc::clone(node))
    }

    /// A sequence of `inner`.
    pub fn array_of(inner: Shape) -> Self {
        Self::ArrayOf(Box::new(inner))
    }

    /// A mapping from any string key to `inner`.
    pub fn map_of(inner: Shape) -> Self {
        Self::MapOf {
            keys: KeyPattern::Any,
            values: Box::new(inner),
        }
    }

    /// A mapping from keys admitted by `keys` to `inner`.
    pub fn map_of_keys(keys: KeyPattern, inner: Shape) -> Self {
        Self::MapOf {
            keys,
            values: Box::new(inner),
        }
    }
}

/// One declared field of a node.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Key of the field in the document mapping.
    pub name: String,
    /// Shape the value must have when present.
    pub shape: Shape,
    /// Whether absence is a violation.
    pub required: bool,
    /// Human description carried for documentation and export.
    pub description: Option<String>,
}

/// A named validation rule for one mapping-shaped entity.
#[derive(Debug)]
pub struct SchemaNode {
    label: String,
    fields: Vec<FieldSpec>,
}

impl SchemaNode {
    /// Start declaring a node called `label`.
    pub fn builder(label: impl Into<String>) -> SchemaNodeBuilder {
        SchemaNodeBuilder {
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// The node's name, used in reports and exports.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if `name` is a declared field.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of required fields in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name.as_str())
    }
}

/// Incremental declaration of a [`SchemaNode`].
#[derive(Debug)]
pub struct SchemaNodeBuilder {
    label: String,
    fields: Vec<FieldSpec>,
}

impl SchemaNodeBuilder {
    /// Declare a required field. An empty `description` means none.
    pub fn required(self, name: &str, shape: Shape, description: &str) -> Self {
        self.field(name, shape, true, description)
    }

    /// Declare an optional field. An empty `description` means none.
    pub fn optional(self, name: &str, shape: Shape, description: &str) -> Self {
        self.field(name, shape, false, description)
    }

    /// Re-declaring a name replaces the earlier declaration in place.
    fn field(mut self, name: &str, shape: Shape, required: bool, description: &str) -> Self {
        let spec = FieldSpec {
            name: name.to_string(),
            shape,
            required,
            description: (!description.is_empty()).then(|| description.to_string()),
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    /// Freeze the node.
    pub fn build(self) -> Arc<SchemaNode> {
        Arc::new(SchemaNode {
            label: self.label,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let node = SchemaNode::builder("Thing")
            .optional("b", Shape::string(), "")
            .required("a", Shape::number(), "the a")
            .optional("c", Shape::Any, "")
            .build();
        let names: Vec<&str> = node.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(node.required_fields().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(node.field("a").unwrap().description.as_deref(), Some("the a"));
        assert!(node.field("b").unwrap().description.is_none());
    }

    #[test]
    fn test_redeclaration_replaces_in_place() {
        let node = SchemaNode::builder("Thing")
            .optional("a", Shape::string(), "")
            .optional("b", Shape::string(), "")
            .required("a", Shape::number(), "")
            .build();
        assert_eq!(node.fields().len(), 2);
        assert_eq!(node.fields()[0].name, "a");
        assert!(node.fields()[0].required);
    }

    #[test]
    fn test_node_shape_shares_allocation() {
        let leaf = SchemaNode::builder("Leaf").build();
        let a = Shape::node(&leaf);
        let b = Shape::node(&leaf);
        match (a, b) {
            (Shape::Node(x), Shape::Node(y)) => assert!(Arc::ptr_eq(&x, &y)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_declares() {
        let node = SchemaNode::builder("Thing")
            .optional("$ref", Shape::string(), "")
            .build();
        assert!(node.declares("$ref"));
        assert!(!node.declares("ref"));
        assert_eq!(node.label(), "Thing");
    }
}
