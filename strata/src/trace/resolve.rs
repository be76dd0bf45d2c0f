//! Trace resolution and leaf enumeration over an [`Options`] wrapper.

use serde::Serialize;
use serde_json::Value;

use super::{LeafProvenance, Origin, Provenance, Trace};
use crate::error::StrataResult;
use crate::layering::Layered;
use crate::options::{Options, keys, steps_for};
use crate::path;

/// Serialised views of a wrapper, computed once per query.
struct Projection<'o, T> {
    options: &'o Options<T>,
    merged: Value,
    layers: Vec<Value>,
}

impl<'o, T: Serialize> Projection<'o, T> {
    fn new(options: &'o Options<T>) -> StrataResult<Self> {
        let merged = serde_json::to_value(options.value())?;
        let layers = options
            .layers()
            .iter()
            .map(|layer| serde_json::to_value(layer.snapshot()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            options,
            merged,
            layers,
        })
    }

    fn merged_at(&self, path: &str, key_path: &[&str]) -> StrataResult<Value> {
        Ok(path::lookup(&self.merged, path, key_path)?.clone())
    }

    /// Trace `key_path` across the raw layers.
    ///
    /// The strongest layer holding a non-null value supplies the result. When
    /// none does, the merged value is consulted instead.
    fn trace(&self, path: &str, key_path: &[&str]) -> StrataResult<(Value, Trace)> {
        if self.layers.is_empty() {
            let value = self.merged_at(path, key_path)?;
            let entry = Provenance {
                scope: self.options.config().scope().cloned().unwrap_or_default(),
                snapshot_id: String::new(),
                path: path.to_owned(),
                value: value.clone(),
                found: true,
            };
            let trace = Trace {
                path: path.to_owned(),
                layers: vec![entry],
            };
            return Ok((value, trace));
        }

        let entries: Vec<Provenance> = self
            .options
            .layers()
            .iter()
            .zip(&self.layers)
            .map(|(layer, projected)| {
                let hit = path::lookup(projected, path, key_path)
                    .ok()
                    .filter(|value| !value.is_null());
                Provenance {
                    scope: layer.scope().clone(),
                    snapshot_id: layer.snapshot_id().to_owned(),
                    path: path.to_owned(),
                    value: hit.cloned().unwrap_or(Value::Null),
                    found: hit.is_some(),
                }
            })
            .collect();
        let effective = entries
            .iter()
            .find(|entry| entry.found)
            .map(|entry| entry.value.clone());
        let value = effective.map_or_else(|| self.merged_at(path, key_path), Ok)?;
        tracing::debug!(
            path,
            layers = entries.len(),
            found = entries.iter().filter(|entry| entry.found).count(),
            "traced path"
        );
        let trace = Trace {
            path: path.to_owned(),
            layers: entries,
        };
        Ok((value, trace))
    }
}

impl<T: Layered + Serialize> Options<T> {
    /// Resolve `path` and report which layers define it.
    ///
    /// Each retained layer's raw snapshot is examined, strongest first; a
    /// layer whose value at the path is `null` does not define it. The
    /// strongest defining layer supplies the returned value. When no layer
    /// defines the path, the value comes from the merged snapshot. Wrappers
    /// without retained layers report a single entry for the active scope,
    /// or the unset scope when none is configured.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Path`](crate::StrataError::Path) for malformed
    /// paths or when the merged snapshot cannot be navigated, and
    /// [`StrataError::Projection`](crate::StrataError::Projection) if a
    /// snapshot cannot be serialised.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use serde::Serialize;
    /// use strata::{Layer, Layered, OptionsConfig, Scope, Stack};
    ///
    /// #[derive(Clone, Default, Serialize, Layered)]
    /// struct Settings {
    ///     labels: BTreeMap<String, String>,
    /// }
    ///
    /// let layer = |scope: Scope, env: &str| {
    ///     Layer::new(scope, Settings {
    ///         labels: BTreeMap::from([("env".to_owned(), env.to_owned())]),
    ///     })
    /// };
    /// let stack = Stack::new(vec![
    ///     layer(Scope::new("defaults", 10), "prod"),
    ///     layer(Scope::new("user", 20), "staging"),
    /// ])?;
    /// let options = stack.merge(OptionsConfig::new())?;
    ///
    /// let (value, trace) = options.resolve_with_trace("labels.env")?;
    /// assert_eq!(value, "staging");
    /// assert_eq!(trace.layers[0].scope.name(), "user");
    /// assert!(trace.layers[1].found);
    /// # Ok::<(), strata::StrataError>(())
    /// ```
    pub fn resolve_with_trace(&self, path: &str) -> StrataResult<(Value, Trace)> {
        let steps = steps_for::<T>(path)?;
        Projection::new(self)?.trace(path, &keys(&steps))
    }

    /// Enumerate every leaf of the resolved value with its attribution.
    ///
    /// Objects and non-empty arrays are descended into; scalars, `null`, and
    /// empty containers are leaves. Leaves are reported depth first in key
    /// order. A scalar root has no addressable leaves. Map keys that are
    /// empty or contain `.` cannot be written as a path segment, so their
    /// subtrees are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Projection`](crate::StrataError::Projection) if
    /// a snapshot cannot be serialised.
    pub fn flatten_with_provenance(&self) -> StrataResult<Vec<LeafProvenance>> {
        let projection = Projection::new(self)?;
        let mut leaves = Vec::new();
        collect_leaves(&projection.merged, &mut Vec::new(), &mut leaves);

        leaves
            .into_iter()
            .map(|segments| {
                let key_path: Vec<&str> = segments.iter().map(String::as_str).collect();
                let leaf_path = segments.join(".");
                let (value, trace) = projection.trace(&leaf_path, &key_path)?;
                let origin = match trace.effective() {
                    Some(entry) => Origin::Layer(entry.clone()),
                    None if value.is_null() => Origin::Unset,
                    None => Origin::Merged,
                };
                Ok(LeafProvenance {
                    path: leaf_path,
                    value,
                    origin,
                    trace,
                })
            })
            .collect()
    }
}

/// Depth-first walk collecting the key segments of every leaf under `value`.
///
/// Owned JSON trees cannot contain cycles, so no visited set is kept.
fn collect_leaves(value: &Value, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map.iter().filter(|(key, _)| addressable(key)) {
                prefix.push(key.clone());
                collect_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                prefix.push(index.to_string());
                collect_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        _ if prefix.is_empty() => {}
        _ => out.push(prefix.clone()),
    }
}

fn addressable(key: &str) -> bool {
    !key.is_empty() && !key.contains('.')
}
