//! # JSON Schema Export
//!
//! Renders a registered node, and every node reachable from it, as a JSON
//! Schema (Draft 2020-12) document so tools outside this crate can consume
//! the same rules. Nodes become `$defs` entries referenced by `$ref`; field
//! descriptions are carried over.
//!
//! The export describes the structural layer only. Semantic lint rules have
//! no JSON Schema form and are not represented.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value as Json};

use apidecl_core::ValueKind;

use crate::constraint::{Constraint, Literal};
use crate::node::{SchemaNode, Shape};
use crate::options::{UnknownFields, ValidationOptions};
use crate::registry::{Registry, SchemaName};

/// Dialect URI written to `$schema`.
pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Export `name` from `registry`. `options.unknown_fields` decides whether
/// nodes close with `additionalProperties: false`.
pub fn to_json_schema(registry: &Registry, name: SchemaName, options: &ValidationOptions) -> Json {
    let mut exporter = Exporter {
        closed: options.unknown_fields == UnknownFields::Reject,
        defs: BTreeMap::new(),
    };
    let root = registry.node(name);
    exporter.define(root);
    let defs: Map<String, Json> = exporter.defs.into_iter().collect();

    json!({
        "$schema": DRAFT_2020_12,
        "title": root.label(),
        "$ref": def_ref(root.label()),
        "$defs": defs,
    })
}

struct Exporter {
    closed: bool,
    defs: BTreeMap<String, Json>,
}

impl Exporter {
    fn define(&mut self, node: &SchemaNode) {
        if self.defs.contains_key(node.label()) {
            return;
        }
        // Placeholder first so a node reachable from itself terminates.
        self.defs.insert(node.label().to_string(), Json::Null);

        let mut properties = Map::new();
        for field in node.fields() {
            let mut schema = self.shape(&field.shape);
            if let (Some(desc), Json::Object(obj)) = (&field.description, &mut schema) {
                obj.insert("description".to_string(), Json::String(desc.clone()));
            }
            properties.insert(field.name.clone(), schema);
        }

        let mut def = Map::new();
        def.insert("title".to_string(), json!(node.label()));
        def.insert("type".to_string(), json!("object"));
        def.insert("properties".to_string(), Json::Object(properties));
        let required: Vec<&str> = node.required_fields().collect();
        if !required.is_empty() {
            def.insert("required".to_string(), json!(required));
        }
        def.insert("additionalProperties".to_string(), json!(!self.closed));

        self.defs.insert(node.label().to_string(), Json::Object(def));
    }

    fn shape(&mut self, shape: &Shape) -> Json {
        match shape {
            Shape::Any => json!({}),
            Shape::Scalar(constraints) => {
                let mut obj = Map::new();
                for c in constraints {
                    match c {
                        Constraint::TypeIs(kind) => {
                            obj.insert("type".to_string(), json!(json_type(*kind)));
                        }
                        Constraint::NonEmpty => {
                            obj.insert("minLength".to_string(), json!(1));
                        }
                        Constraint::EnumOf(allowed) => {
                            let members: Vec<Json> = allowed.iter().map(literal).collect();
                            obj.insert("enum".to_string(), Json::Array(members));
                        }
                    }
                }
                Json::Object(obj)
            }
            Shape::Node(node) => {
                self.define(node);
                json!({ "$ref": def_ref(node.label()) })
            }
            Shape::ArrayOf(inner) => json!({ "type": "array", "items": self.shape(inner) }),
            Shape::MapOf { keys, values } => {
                let values = self.shape(values);
                match keys.as_regex_str() {
                    None => json!({ "type": "object", "additionalProperties": values }),
                    Some(re) => json!({
                        "type": "object",
                        "patternProperties": { (re): values },
                        "additionalProperties": false,
                    }),
                }
            }
        }
    }
}

fn def_ref(label: &str) -> String {
    format!("#/$defs/{label}")
}

fn json_type(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Null => "null",
        ValueKind::Bool => "boolean",
        ValueKind::Number => "number",
        ValueKind::String => "string",
        ValueKind::Sequence => "array",
        ValueKind::Mapping => "object",
    }
}

fn literal(lit: &Literal) -> Json {
    match lit {
        Literal::Str(s) => Json::String(s.clone()),
        Literal::Number(n) => serde_json::Number::from_f64(*n).map_or(Json::Null, Json::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_items_is_self_contained() {
        let schema = to_json_schema(&Registry::new(), SchemaName::Items, &ValidationOptions::default());
        assert_eq!(schema["$ref"], "#/$defs/Items");
        assert_eq!(schema["$defs"].as_object().unwrap().len(), 1);
        assert_eq!(schema["$defs"]["Items"]["properties"]["$ref"]["type"], "string");
        assert_eq!(schema["$defs"]["Items"]["additionalProperties"], true);
        assert!(schema["$defs"]["Items"].get("required").is_none());
    }

    #[test]
    fn test_export_declaration_reaches_all_its_nodes() {
        let schema = to_json_schema(
            &Registry::new(),
            SchemaName::ApiDeclaration,
            &ValidationOptions::default(),
        );
        let defs: Vec<&String> = schema["$defs"].as_object().unwrap().keys().collect();
        assert_eq!(
            defs,
            vec![
                "API",
                "APIDeclaration",
                "Items",
                "Model",
                "Operation",
                "Parameter",
                "Property",
                "ResponseMessage",
            ]
        );
    }

    #[test]
    fn test_export_constraints() {
        let schema = to_json_schema(&Registry::new(), SchemaName::Operation, &ValidationOptions::default());
        let method = &schema["$defs"]["Operation"]["properties"]["method"];
        assert_eq!(method["type"], "string");
        assert_eq!(method["minLength"], 1);
        assert_eq!(method["enum"].as_array().unwrap().len(), 7);
        assert!(method["description"].as_str().unwrap().contains("uppercase"));

        let notes = &schema["$defs"]["Operation"]["properties"]["notes"];
        assert!(notes.get("minLength").is_none());

        let params = &schema["$defs"]["Operation"]["properties"]["parameters"];
        assert_eq!(params["items"]["$ref"], "#/$defs/Parameter");

        let auth = &schema["$defs"]["Operation"]["properties"]["authorizations"];
        assert!(auth["description"].as_str().unwrap().starts_with("Provides"));
    }

    #[test]
    fn test_export_strict_closes_objects() {
        let schema = to_json_schema(&Registry::new(), SchemaName::Model, &ValidationOptions::strict());
        assert_eq!(schema["$defs"]["Model"]["additionalProperties"], false);
        let props = &schema["$defs"]["Model"]["properties"]["properties"];
        assert_eq!(props["type"], "object");
        assert_eq!(props["additionalProperties"]["$ref"], "#/$defs/Property");
    }
}
