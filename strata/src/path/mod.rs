//! Dot-path parsing and navigation over serialised snapshots.
//!
//! Paths address values inside the serde projection of a snapshot: a
//! [`serde_json::Value`] tree. Objects are addressed by key and arrays by a
//! non-negative decimal index.
//!
//! ```
//! use serde_json::json;
//! use strata::path;
//!
//! let mut doc = json!({"channels": [{"name": "email"}]});
//! assert_eq!(path::get(&doc, "channels.0.name")?, &json!("email"));
//!
//! path::set(&mut doc, "limits.daily", json!(10))?;
//! assert_eq!(doc["limits"]["daily"], json!(10));
//! # Ok::<(), strata::PathError>(())
//! ```

use serde_json::{Map, Value};

use crate::error::PathError;
use crate::layering::{PathStep, Shape};

/// Split `path` into its segments.
///
/// Segments are separated by `.` with no escaping, so a map key that
/// contains `.` cannot be addressed.
///
/// # Errors
///
/// Returns [`PathError::Empty`] for an empty path and
/// [`PathError::EmptySegment`] when any segment is empty.
pub fn parse(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(PathError::EmptySegment {
            path: path.to_owned(),
        });
    }
    Ok(segments)
}

/// Resolve `path` against `root`.
///
/// A `null` at the final segment is returned as-is; a `null` part-way along
/// the path is an error.
///
/// # Errors
///
/// Returns a [`PathError`] when the path is malformed or cannot be followed.
pub fn get<'v>(root: &'v Value, path: &str) -> Result<&'v Value, PathError> {
    let segments = parse(path)?;
    lookup(root, path, &segments)
}

/// Assign `value` at `path`, creating missing intermediate objects.
///
/// Missing keys and `null` values along the way become empty objects. Arrays
/// and scalars cannot gain members, so writing through them fails.
///
/// # Errors
///
/// Returns a [`PathError`] when the path is malformed or an intermediate
/// value is not an object.
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    let steps: Vec<PathStep> = parse(path)?
        .into_iter()
        .map(|segment| PathStep::new(segment, Shape::Dynamic))
        .collect();
    assign(root, path, &steps, value)
}

/// Follow `segments` from `root`, reporting failures against `path`.
pub(crate) fn lookup<'v, S: AsRef<str>>(
    root: &'v Value,
    path: &str,
    segments: &[S],
) -> Result<&'v Value, PathError> {
    segments.iter().try_fold(root, |current, segment| {
        navigate(current, path, segment.as_ref())
    })
}

fn navigate<'v>(current: &'v Value, path: &str, segment: &str) -> Result<&'v Value, PathError> {
    match current {
        Value::Object(map) => map.get(segment).ok_or_else(|| PathError::MissingKey {
            path: path.to_owned(),
            segment: segment.to_owned(),
        }),
        Value::Array(items) => {
            let index = parse_index(path, segment)?;
            items.get(index).ok_or_else(|| PathError::IndexOutOfRange {
                path: path.to_owned(),
                segment: segment.to_owned(),
                len: items.len(),
            })
        }
        Value::Null => Err(PathError::Null {
            path: path.to_owned(),
            segment: segment.to_owned(),
        }),
        other => Err(PathError::Unsupported {
            path: path.to_owned(),
            segment: segment.to_owned(),
            kind: kind(other),
        }),
    }
}

fn parse_index(path: &str, segment: &str) -> Result<usize, PathError> {
    // `usize::from_str` accepts a leading `+`, which is not an index.
    if !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(PathError::InvalidIndex {
            path: path.to_owned(),
            segment: segment.to_owned(),
        });
    }
    segment.parse().map_err(|_| PathError::InvalidIndex {
        path: path.to_owned(),
        segment: segment.to_owned(),
    })
}

/// Write `value` along `steps`, honouring the container shape of each step.
///
/// Struct members may be overwritten but never added, except that an unset
/// (`null`) struct is created empty. Sequences are never writable. Map and
/// dynamic containers gain missing keys on demand.
pub(crate) fn assign(
    root: &mut Value,
    path: &str,
    steps: &[PathStep],
    value: Value,
) -> Result<(), PathError> {
    let Some((last, parents)) = steps.split_last() else {
        return Err(PathError::Empty);
    };
    let mut current = root;
    for step in parents {
        let map = writable_map(current, path, step)?;
        current = map.entry(step.key()).or_insert(Value::Null);
    }
    writable_map(current, path, last)?.insert(last.key().to_owned(), value);
    Ok(())
}

fn writable_map<'v>(
    value: &'v mut Value,
    path: &str,
    step: &PathStep,
) -> Result<&'v mut Map<String, Value>, PathError> {
    let not_writable = |kind: &'static str| PathError::NotWritable {
        path: path.to_owned(),
        segment: step.key().to_owned(),
        kind,
    };
    match step.container() {
        Shape::Sequence => return Err(not_writable(Shape::Sequence.label())),
        Shape::Struct => {
            if value.is_null() {
                *value = Value::Object(Map::new());
            } else if value
                .as_object()
                .is_some_and(|map| !map.contains_key(step.key()))
            {
                return Err(not_writable(Shape::Struct.label()));
            }
        }
        Shape::Map | Shape::Dynamic => {
            if value.is_null() {
                *value = Value::Object(Map::new());
            }
        }
    }
    match value {
        Value::Object(map) => Ok(map),
        other => Err(not_writable(kind(other))),
    }
}

/// Short label for the JSON kind of `value`, used in diagnostics.
pub(crate) const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests;
