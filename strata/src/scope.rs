//! Named precedence buckets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Priority of the built-in `system` scope.
pub const SCOPE_PRIORITY_SYSTEM: i64 = 100;
/// Priority of the built-in `tenant` scope.
pub const SCOPE_PRIORITY_TENANT: i64 = 200;
/// Priority of the built-in `org` scope.
pub const SCOPE_PRIORITY_ORG: i64 = 300;
/// Priority of the built-in `team` scope.
pub const SCOPE_PRIORITY_TEAM: i64 = 400;
/// Priority of the built-in `user` scope.
pub const SCOPE_PRIORITY_USER: i64 = 500;

/// A named, prioritised precedence bucket such as `tenant` or `user`.
///
/// Higher priorities are stronger. Scopes own their metadata, so no two
/// scopes share storage. Validation happens when scopes are assembled into a
/// [`Stack`](crate::Stack), not here.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::Scope;
///
/// let scope = Scope::new("tenant", 200)
///     .with_label("Tenant")
///     .with_metadata([("tenant_id", json!("acme"))]);
/// assert_eq!(scope.name(), "tenant");
/// assert_eq!(scope.metadata_value("tenant_id"), Some(&json!("acme")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    label: String,
    priority: i64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, Value>,
}

impl Scope {
    /// Create a scope called `name` with the given `priority`.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: i64) -> Self {
        Self {
            name: name.into(),
            priority,
            ..Self::default()
        }
    }

    /// Attach a human-readable label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Attach metadata entries, replacing any existing value for the same key.
    #[must_use]
    pub fn with_metadata<K, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        self.metadata
            .extend(entries.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }

    /// Scope name, unique within a stack.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label. Empty when none was supplied.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Precedence of this scope. Higher wins.
    #[must_use]
    pub const fn priority(&self) -> i64 {
        self.priority
    }

    /// Opaque metadata attached by the caller.
    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Look up a single metadata entry.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Returns `true` for the zero scope used by unattributed provenance.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.name.is_empty()
            && self.label.is_empty()
            && self.priority == 0
            && self.metadata.is_empty()
    }
}
