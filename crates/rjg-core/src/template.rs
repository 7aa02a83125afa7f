//! Compiled template AST.
//!
//! A raw JSON template is compiled once into a [`Template`] tree. Objects are
//! classified deterministically as directive nodes or plain objects, strings
//! are split into literals, directive tokens and variable references, and
//! arrays are kept verbatim unless they sit in a directive's top-level
//! parameter position.

use serde_json::{Map, Value};
use tracing::warn;

use crate::directive::DirectiveKind;
use crate::error::{Result, TemplateError};
use crate::prefix::Prefix;

/// Node of a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Returned unchanged: null, booleans, numbers, unprefixed strings and
    /// arrays outside a directive's parameter list.
    Literal(Value),
    /// Reference to a user variable, stored without its prefix.
    Variable(String),
    /// Directive invocation.
    Directive(DirectiveNode),
    /// Object whose keys and values are resolved recursively.
    Object(Vec<ObjectEntry>),
}

/// Key/value pair of a plain object node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    pub key: Template,
    pub value: Template,
}

/// A directive together with its compiled parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveNode {
    pub kind: DirectiveKind,
    pub params: Params,
}

/// Compiled directive parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Bare string form, e.g. `"$bool"`.
    Absent,
    /// Array parameter of a list-accepting directive.
    List(Vec<Template>),
    /// Any other parameter value.
    Value(Box<Template>),
}

impl Template {
    /// Parse JSON text and compile it.
    pub fn parse(text: &str, prefix: &Prefix) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::compile(&value, prefix)
    }

    /// Compile an already parsed JSON value.
    pub fn compile(value: &Value, prefix: &Prefix) -> Result<Self> {
        match value {
            Value::String(text) => Ok(compile_string(text, prefix)),
            Value::Object(map) => compile_object(map, prefix),
            other => Ok(Template::Literal(other.clone())),
        }
    }

    /// Look up a field of a plain object node by its literal key.
    pub fn field(&self, key: &str) -> Option<&Template> {
        let Template::Object(entries) = self else {
            return None;
        };
        entries
            .iter()
            .find(|entry| matches!(&entry.key, Template::Literal(Value::String(k)) if k == key))
            .map(|entry| &entry.value)
    }

    /// True when the node was written as a JSON object.
    pub fn is_object_form(&self) -> bool {
        match self {
            Template::Object(_) => true,
            Template::Directive(node) => !matches!(node.params, Params::Absent),
            _ => false,
        }
    }

    /// True when no directive or variable appears anywhere in the tree.
    pub fn is_static(&self) -> bool {
        match self {
            Template::Literal(_) => true,
            Template::Variable(_) | Template::Directive(_) => false,
            Template::Object(entries) => entries
                .iter()
                .all(|entry| entry.key.is_static() && entry.value.is_static()),
        }
    }
}

fn compile_string(text: &str, prefix: &Prefix) -> Template {
    let Some(name) = prefix.strip(text) else {
        return Template::Literal(Value::String(text.to_string()));
    };
    match DirectiveKind::from_name(name) {
        Some(kind) => Template::Directive(DirectiveNode {
            kind,
            params: Params::Absent,
        }),
        None => Template::Variable(name.to_string()),
    }
}

fn compile_object(map: &Map<String, Value>, prefix: &Prefix) -> Result<Template> {
    let directive_keys: Vec<(&String, DirectiveKind)> = map
        .keys()
        .filter_map(|key| {
            prefix
                .strip(key)
                .and_then(DirectiveKind::from_name)
                .map(|kind| (key, kind))
        })
        .collect();

    match directive_keys.as_slice() {
        [] => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                entries.push(ObjectEntry {
                    key: compile_string(key, prefix),
                    value: Template::compile(value, prefix)?,
                });
            }
            Ok(Template::Object(entries))
        }
        [(key, kind)] => {
            if map.len() > 1 {
                let ignored: Vec<&str> = map
                    .keys()
                    .filter(|other| other != key)
                    .map(String::as_str)
                    .collect();
                warn!(
                    directive = %key,
                    ignored = ?ignored,
                    "object keys next to a directive are ignored"
                );
            }
            let params = match map.get(key.as_str()) {
                Some(raw) => compile_params(*kind, raw, prefix)?,
                None => Params::Absent,
            };
            Ok(Template::Directive(DirectiveNode {
                kind: *kind,
                params,
            }))
        }
        _ => Err(TemplateError::AmbiguousDirective {
            keys: directive_keys
                .iter()
                .map(|(key, _)| key.to_string())
                .collect(),
        }),
    }
}

fn compile_params(kind: DirectiveKind, raw: &Value, prefix: &Prefix) -> Result<Params> {
    match raw {
        Value::Array(items) if kind.accepts_list() => {
            let mut compiled = Vec::with_capacity(items.len());
            for item in items {
                compiled.push(Template::compile(item, prefix)?);
            }
            Ok(Params::List(compiled))
        }
        other => Ok(Params::Value(Box::new(Template::compile(other, prefix)?))),
    }
}
