//! # Validator
//!
//! The single interpreter for every [`SchemaNode`]. Given a node and a value
//! it walks both in parallel:
//!
//! 1. A non-mapping where a node is expected is one "wrong type" violation;
//!    the subtree is not descended into.
//! 2. Each declared field, in declaration order: absent and required is a
//!    violation; present is checked against the field's [`Shape`],
//!    recursing through nodes, sequences (`.f[i]`) and open maps (`.f.key`).
//! 3. Undeclared fields are ignored unless the options reject them, in which
//!    case they are reported after the declared fields, sorted by key.
//!
//! Nothing short-circuits across fields: every violation at every depth is
//! collected in one pass. The walk is pure and holds no state beyond the
//! output buffer, so one [`Validator`] may be used from many threads.

use std::fmt;

use apidecl_core::{Value, ValueKind};

use crate::constraint::Failure;
use crate::node::{SchemaNode, Shape};
use crate::options::{UnknownFields, ValidationOptions};
use crate::report::{Violation, ViolationKind};

/// Location inside a document, rendered as `.field[index].key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The path of field `name` under this path.
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    /// The path of element `index` of the sequence at this path.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// The path of the value under `key` in the open map at this path.
    pub fn key(&self, key: &str) -> Self {
        self.field(key)
    }

    /// Raw form; empty for the root.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Structural validator parameterized by [`ValidationOptions`].
#[derive(Debug, Clone, Copy)]
pub struct Validator<'o> {
    options: &'o ValidationOptions,
}

impl<'o> Validator<'o> {
    /// Create a validator using `options`.
    pub fn new(options: &'o ValidationOptions) -> Self {
        Self { options }
    }

    /// Validate `value` against `node`, returning every violation in
    /// depth-first, declaration order. Empty means valid.
    pub fn validate(&self, node: &SchemaNode, value: &Value) -> Vec<Violation> {
        let mut out = Vec::new();
        self.visit_node(node, value, &FieldPath::root(), &mut out);
        out
    }

    fn visit_node(&self, node: &SchemaNode, value: &Value, path: &FieldPath, out: &mut Vec<Violation>) {
        let Some(map) = value.as_mapping() else {
            out.push(wrong_type(path, ValueKind::Mapping, value));
            return;
        };

        for field in node.fields() {
            let child = path.field(&field.name);
            match map.get(&field.name) {
                Some(v) => self.visit_shape(&field.shape, v, &child, out),
                None if field.required => out.push(Violation {
                    reason: format!("missing required field {child}"),
                    path: child.0,
                    kind: ViolationKind::MissingRequired,
                }),
                None => {}
            }
        }

        if self.options.unknown_fields == UnknownFields::Reject {
            for key in map.keys().filter(|k| !node.declares(k)) {
                let child = path.field(key);
                out.push(Violation {
                    reason: format!("unknown field {child} is not declared by {}", node.label()),
                    path: child.0,
                    kind: ViolationKind::UnknownField,
                });
            }
        }
    }

    fn visit_shape(&self, shape: &Shape, value: &Value, path: &FieldPath, out: &mut Vec<Violation>) {
        match shape {
            Shape::Any => {}
            Shape::Scalar(constraints) => {
                if let Some(failure) = constraints.iter().find_map(|c| c.check(value).err()) {
                    out.push(from_failure(path, &failure));
                }
            }
            Shape::Node(node) => self.visit_node(node, value, path, out),
            Shape::ArrayOf(inner) => match value.as_sequence() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        self.visit_shape(inner, item, &path.index(i), out);
                    }
                }
                None => out.push(wrong_type(path, ValueKind::Sequence, value)),
            },
            Shape::MapOf { keys, values } => match value.as_mapping() {
                Some(map) => {
                    for (key, item) in map {
                        let child = path.key(key);
                        if keys.matches(key) {
                            self.visit_shape(values, item, &child, out);
                        } else {
                            out.push(Violation {
                                reason: format!(
                                    "key {key:?} at {path} does not match pattern {:?}",
                                    keys.as_regex_str().unwrap_or_default()
                                ),
                                path: child.0,
                                kind: ViolationKind::KeyMismatch,
                            });
                        }
                    }
                }
                None => out.push(wrong_type(path, ValueKind::Mapping, value)),
            },
        }
    }
}

fn from_failure(path: &FieldPath, failure: &Failure) -> Violation {
    Violation {
        path: path.as_str().to_string(),
        reason: failure.reason(path),
        kind: failure.kind(),
    }
}

fn wrong_type(path: &FieldPath, expected: ValueKind, value: &Value) -> Violation {
    from_failure(
        path,
        &Failure::WrongType {
            expected,
            found: value.kind(),
        },
    )
}
