//! Provenance reports: which layer supplied the value at a path.

mod resolve;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Scope;
use crate::error::StrataResult;

/// What one layer held at a traced path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Scope of the layer.
    pub scope: Scope,
    /// Snapshot identifier of the layer; empty when none was recorded.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub snapshot_id: String,
    /// Traced path.
    pub path: String,
    /// Value the layer holds at the path; `null` when not found.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    /// Whether the layer defines the path.
    pub found: bool,
}

/// Every layer's contribution to one path, strongest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Traced path.
    pub path: String,
    /// One entry per retained layer, strongest first.
    pub layers: Vec<Provenance>,
}

impl Trace {
    /// The strongest layer that defines the path, if any.
    #[must_use]
    pub fn effective(&self) -> Option<&Provenance> {
        self.layers.iter().find(|entry| entry.found)
    }

    /// Serialise the trace as JSON for logs or transport.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Projection`](crate::StrataError::Projection) if
    /// serialisation fails.
    pub fn to_json(&self) -> StrataResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a trace previously produced by [`Trace::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Projection`](crate::StrataError::Projection) for
    /// malformed input.
    pub fn from_json(payload: &str) -> StrataResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Attribution of a leaf in the resolved value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The strongest layer that defines the leaf.
    Layer(Provenance),
    /// No single layer defines the leaf, but the merged value holds a
    /// non-null value there.
    Merged,
    /// The leaf is `null` in every layer and in the merged value.
    Unset,
}

/// One leaf path of the resolved value with its attribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafProvenance {
    /// Dot path of the leaf, built from serialised keys.
    pub path: String,
    /// Resolved value at the leaf.
    pub value: Value,
    /// Where the value came from.
    pub origin: Origin,
    /// Full trace of the leaf across every layer.
    pub trace: Trace,
}

impl LeafProvenance {
    /// Best-effort single attribution.
    ///
    /// Returns the defining layer when there is one and otherwise falls back
    /// to the weakest layer's entry, which then has `found == false`.
    #[must_use]
    pub fn provenance(&self) -> Option<&Provenance> {
        match &self.origin {
            Origin::Layer(entry) => Some(entry),
            Origin::Merged | Origin::Unset => self.trace.layers.last(),
        }
    }
}

#[cfg(test)]
mod tests;
