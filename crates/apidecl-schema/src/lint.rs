//! # Semantic Lint Pass
//!
//! Rules stated by the Swagger 1.2 format that a structural schema cannot
//! express. They are not part of default validation; [`Registry::validate_with`]
//! runs this pass only when `semantic_checks` is enabled and the document is
//! already structurally valid, so every field read here has its declared type.
//!
//! ## Rules
//!
//! | Scope | Rule |
//! |-------|------|
//! | Parameter | `paramType: path` requires `required: true` |
//! | Parameter | `allowMultiple` only with paramType query, header or path |
//! | Operation | parameter names are unique |
//! | Operation | `nickname` is ASCII alphanumerics and underscores |
//! | API | at most one operation per method |
//! | APIDeclaration | at most one API per path; `resourcePath` starts with `/` |
//! | Model | `required` entries name declared properties |
//! | Model | `discriminator` needs `subTypes`, names a property, and is required |
//! | models map | `id` equals the map key |
//! | models map | `subTypes` name models of the same declaration |
//! | models map | no multiple inheritance, no inheritance cycles |
//! | models map | sub-models declare no `discriminator` and override no inherited property |
//!
//! [`Registry::validate_with`]: crate::Registry::validate_with

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use apidecl_core::Value;

use crate::registry::SchemaName;
use crate::report::{Violation, ViolationKind};
use crate::validator::FieldPath;

const MULTI_VALUE_PARAM_TYPES: &[&str] = &["query", "header", "path"];

/// Run every rule that applies below the `schema` root of `document`.
///
/// Schemas without semantic rules (`ResourceListing`, `APIReference`,
/// `Info`, `ResponseMessage`, `Items`, `Property`) always yield nothing.
pub fn check(schema: SchemaName, document: &Value) -> Vec<Violation> {
    let mut lint = Lint::default();
    let root = FieldPath::root();
    match schema {
        SchemaName::ApiDeclaration => lint.declaration(document, &root),
        SchemaName::Api => lint.api(document, &root),
        SchemaName::Operation => lint.operation(document, &root),
        SchemaName::Parameter => lint.parameter(document, &root),
        SchemaName::Model => lint.model(document, &root),
        SchemaName::ResourceListing
        | SchemaName::ApiReference
        | SchemaName::Info
        | SchemaName::ResponseMessage
        | SchemaName::Items
        | SchemaName::Property => {}
    }
    lint.out
}

#[derive(Default)]
struct Lint {
    out: Vec<Violation>,
}

impl Lint {
    fn report(&mut self, path: &FieldPath, reason: String) {
        self.out.push(Violation {
            path: path.as_str().to_string(),
            reason,
            kind: ViolationKind::Semantic,
        });
    }

    fn declaration(&mut self, doc: &Value, path: &FieldPath) {
        if let Some(rp) = doc.get_str("resourcePath") {
            if !rp.starts_with('/') {
                self.report(
                    &path.field("resourcePath"),
                    format!("resourcePath {rp:?} must start with \"/\""),
                );
            }
        }

        if let Some(apis) = doc.get("apis").and_then(Value::as_sequence) {
            let apis_path = path.field("apis");
            self.unique_by(apis, &apis_path, "path", "API path");
            for (i, api) in apis.iter().enumerate() {
                self.api(api, &apis_path.index(i));
            }
        }

        if let Some(models) = doc.get("models").and_then(Value::as_mapping) {
            self.models(models, &path.field("models"));
        }
    }

    fn api(&mut self, api: &Value, path: &FieldPath) {
        let Some(operations) = api.get("operations").and_then(Value::as_sequence) else {
            return;
        };
        let ops_path = path.field("operations");
        self.unique_by(operations, &ops_path, "method", "operation method");
        for (i, op) in operations.iter().enumerate() {
            self.operation(op, &ops_path.index(i));
        }
    }

    fn operation(&mut self, op: &Value, path: &FieldPath) {
        if let Some(nickname) = op.get_str("nickname") {
            if !nickname.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.report(
                    &path.field("nickname"),
                    format!("nickname {nickname:?} must contain only ASCII letters, digits and underscores"),
                );
            }
        }

        let Some(params) = op.get("parameters").and_then(Value::as_sequence) else {
            return;
        };
        let params_path = path.field("parameters");
        self.unique_by(params, &params_path, "name", "parameter name");
        for (i, param) in params.iter().enumerate() {
            self.parameter(param, &params_path.index(i));
        }
    }

    fn parameter(&mut self, param: &Value, path: &FieldPath) {
        let param_type = param.get_str("paramType");

        if param_type == Some("path") && param.get("required").and_then(Value::as_bool) != Some(true) {
            let name = param.get_str("name").unwrap_or_default();
            self.report(
                &path.field("required"),
                format!("path parameter {name:?} must declare required: true"),
            );
        }

        if param.get("allowMultiple").is_some()
            && !param_type.is_some_and(|t| MULTI_VALUE_PARAM_TYPES.contains(&t))
        {
            self.report(
                &path.field("allowMultiple"),
                format!(
                    "allowMultiple is only allowed for query, header or path parameters, not {:?}",
                    param_type.unwrap_or_default()
                ),
            );
        }
    }

    fn model(&mut self, model: &Value, path: &FieldPath) {
        let props = property_names(model);
        let required = indexed_strings(model.get("required"));

        for (i, name) in &required {
            if !props.contains(name) {
                self.report(
                    &path.field("required").index(*i),
                    format!("required property {name:?} is not declared in properties"),
                );
            }
        }

        if let Some(d) = model.get_str("discriminator") {
            let at = path.field("discriminator");
            if model.get("subTypes").is_none() {
                self.report(&at, format!("discriminator {d:?} requires subTypes"));
            }
            if !props.contains(d) {
                self.report(&at, format!("discriminator {d:?} does not name a property of this model"));
            } else if !required.iter().any(|(_, r)| *r == d) {
                self.report(&at, format!("discriminator {d:?} must be listed in required"));
            }
        }
    }

    fn models(&mut self, models: &BTreeMap<String, Value>, path: &FieldPath) {
        for (key, model) in models {
            let model_path = path.key(key);
            if let Some(id) = model.get_str("id") {
                if id != key {
                    self.report(
                        &model_path.field("id"),
                        format!("model id {id:?} does not match its key {key:?}"),
                    );
                }
            }
            self.model(model, &model_path);
        }
        self.inheritance(models, path);
    }

    fn inheritance(&mut self, models: &BTreeMap<String, Value>, path: &FieldPath) {
        // sub-model -> the first model listing it in subTypes
        let mut parent_of: BTreeMap<&str, &str> = BTreeMap::new();

        for (key, model) in models {
            let subs_path = path.key(key).field("subTypes");
            for (j, sub) in indexed_strings(model.get("subTypes")) {
                let at = subs_path.index(j);
                if !models.contains_key(sub) {
                    self.report(&at, format!("subType {sub:?} is not a model of this declaration"));
                    continue;
                }
                match parent_of.get(sub) {
                    Some(parent) if *parent != key.as_str() => self.report(
                        &at,
                        format!("model {sub:?} already inherits from {parent:?}; multiple inheritance is not allowed"),
                    ),
                    Some(_) => {}
                    None => {
                        parent_of.insert(sub, key);
                    }
                }
            }
        }

        for start in models.keys().map(String::as_str) {
            let mut chain = vec![start];
            let mut current = start;
            while let Some(&parent) = parent_of.get(current) {
                if parent == start {
                    // Report each cycle once, at its smallest member.
                    if chain.iter().all(|m| start <= *m) {
                        let mut order = vec![start];
                        order.extend(chain[1..].iter().rev());
                        order.push(start);
                        self.report(
                            &path.key(start).field("subTypes"),
                            format!("inheritance cycle: {}", order.join(" -> ")),
                        );
                    }
                    break;
                }
                if chain.contains(&parent) {
                    break;
                }
                chain.push(parent);
                current = parent;
            }
        }

        for (&sub, &parent) in &parent_of {
            let Some(model) = models.get(sub) else { continue };
            let sub_path = path.key(sub);

            if model.get("discriminator").is_some() {
                self.report(
                    &sub_path.field("discriminator"),
                    format!("sub-model {sub:?} of {parent:?} must not declare a discriminator"),
                );
            }

            let ancestors = ancestors_of(sub, &parent_of);
            for prop in property_names(model) {
                let overridden = ancestors.iter().find(|a| {
                    models
                        .get(**a)
                        .is_some_and(|m| property_names(m).contains(prop))
                });
                if let Some(ancestor) = overridden {
                    self.report(
                        &sub_path.field("properties").key(prop),
                        format!("property {prop:?} overrides the one inherited from {ancestor:?}"),
                    );
                }
            }
        }
    }

    /// Flag every element whose `key` string repeats an earlier element's.
    fn unique_by(&mut self, items: &[Value], items_path: &FieldPath, key: &str, what: &str) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            let Some(v) = item.get_str(key) else { continue };
            match seen.entry(v) {
                Entry::Occupied(first) => self.report(
                    &items_path.index(i).field(key),
                    format!(
                        "duplicate {what} {v:?}, first declared at {}",
                        items_path.index(*first.get()).field(key)
                    ),
                ),
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
        }
    }
}

fn property_names(model: &Value) -> BTreeSet<&str> {
    model
        .get("properties")
        .and_then(Value::as_mapping)
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// String elements of a sequence together with their original indices.
fn indexed_strings(value: Option<&Value>) -> Vec<(usize, &str)> {
    value
        .and_then(Value::as_sequence)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.as_str().map(|s| (i, s)))
                .collect()
        })
        .unwrap_or_default()
}

/// Nearest-first ancestors of `model`, stopping at a cycle.
fn ancestors_of<'a>(model: &'a str, parent_of: &BTreeMap<&'a str, &'a str>) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut seen = HashSet::from([model]);
    let mut current = model;
    while let Some(&parent) = parent_of.get(current) {
        if !seen.insert(parent) {
            break;
        }
        out.push(parent);
        current = parent;
    }
    out
}
