//! The built-in leaf descriptor generator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SchemaDocument, SchemaGenerator, ScopeDescriptor};
use crate::error::BoxError;

/// Format label of documents produced by [`DescriptorGenerator`].
pub const SCHEMA_FORMAT_DESCRIPTORS: &str = "descriptors";

/// A leaf path and its inferred type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Dot path of the field.
    pub path: String,
    /// Type label such as `bool`, `int`, `[]string`, or `map[string]any`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Lists every leaf of a snapshot, sorted by path.
///
/// Objects are descended into; arrays, empty objects, and scalars are leaves.
/// The body is a JSON array of [`FieldDescriptor`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct DescriptorGenerator;

impl DescriptorGenerator {
    /// Describe the leaves of `value`.
    #[must_use]
    pub fn describe(value: &Value) -> Vec<FieldDescriptor> {
        let mut fields = Vec::new();
        walk(value, "", &mut fields);
        fields.sort_by(|left, right| left.path.cmp(&right.path));
        fields
    }
}

impl SchemaGenerator for DescriptorGenerator {
    fn generate(
        &self,
        value: &Value,
        scopes: &[ScopeDescriptor],
    ) -> Result<SchemaDocument, BoxError> {
        Ok(SchemaDocument {
            format: SCHEMA_FORMAT_DESCRIPTORS.to_owned(),
            body: serde_json::to_value(Self::describe(value))?,
            scopes: scopes.to_vec(),
        })
    }
}

fn walk(value: &Value, prefix: &str, out: &mut Vec<FieldDescriptor>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                walk(child, &join(prefix, key), out);
            }
        }
        _ if prefix.is_empty() => {}
        other => out.push(FieldDescriptor {
            path: prefix.to_owned(),
            kind: type_label(other),
        }),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn type_label(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_owned(),
        Value::Bool(_) => "bool".to_owned(),
        Value::Number(number) if number.is_i64() => "int".to_owned(),
        Value::Number(number) if number.is_u64() => "uint".to_owned(),
        Value::Number(_) => "float".to_owned(),
        Value::String(_) => "string".to_owned(),
        Value::Array(items) => format!("[]{}", element_label(items.iter())),
        Value::Object(map) => format!("map[string]{}", element_label(map.values())),
    }
}

/// Label shared by every element, or `any` for empty or mixed collections.
fn element_label<'v>(mut items: impl Iterator<Item = &'v Value>) -> String {
    let Some(first) = items.next() else {
        return "any".to_owned();
    };
    let label = type_label(first);
    if items.all(|item| type_label(item) == label) {
        label
    } else {
        "any".to_owned()
    }
}
