//! Schema documents describing a resolved snapshot.
//!
//! Schema generation is pluggable through [`SchemaGenerator`]. Without a
//! configured generator, [`Options::schema`] uses [`DescriptorGenerator`],
//! which lists every leaf path with a coarse type label.

mod descriptor;

pub use descriptor::{DescriptorGenerator, FieldDescriptor, SCHEMA_FORMAT_DESCRIPTORS};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Layer;
use crate::error::{BoxError, StrataError, StrataResult};
use crate::options::Options;

/// Public view of a retained layer's scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDescriptor {
    /// Scope name.
    pub name: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// Scope priority.
    pub priority: i64,
    /// Snapshot identifier of the layer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub snapshot_id: String,
    /// Scope metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl<T> From<&Layer<T>> for ScopeDescriptor {
    fn from(layer: &Layer<T>) -> Self {
        let scope = layer.scope();
        Self {
            name: scope.name().to_owned(),
            label: scope.label().to_owned(),
            priority: scope.priority(),
            snapshot_id: layer.snapshot_id().to_owned(),
            metadata: scope.metadata().clone(),
        }
    }
}

/// A generated schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Format label, such as [`SCHEMA_FORMAT_DESCRIPTORS`].
    pub format: String,
    /// Generator-specific document body.
    pub body: Value,
    /// Retained scopes, strongest first; empty unless requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<ScopeDescriptor>,
}

/// Produces a [`SchemaDocument`] for a snapshot.
pub trait SchemaGenerator: Send + Sync {
    /// Generate a schema for the serialised snapshot `value`.
    ///
    /// `scopes` lists the retained scopes when scope inclusion is enabled and
    /// is empty otherwise. Implementations must accept a `null` or empty
    /// value and return an empty but valid document.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the document.
    fn generate(
        &self,
        value: &Value,
        scopes: &[ScopeDescriptor],
    ) -> Result<SchemaDocument, BoxError>;
}

impl<T: Serialize> Options<T> {
    /// Generate a schema for the resolved snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Projection`] if the snapshot cannot be
    /// serialised and [`StrataError::Schema`] when the generator fails.
    pub fn schema(&self) -> StrataResult<SchemaDocument> {
        let value = serde_json::to_value(self.value())?;
        let scopes: Vec<ScopeDescriptor> = if self.config().scope_schema() {
            self.layers().iter().map(ScopeDescriptor::from).collect()
        } else {
            Vec::new()
        };
        let generator = self
            .config()
            .schema_generator()
            .unwrap_or(&DescriptorGenerator);
        generator
            .generate(&value, &scopes)
            .map_err(StrataError::Schema)
    }
}

#[cfg(test)]
mod tests;
