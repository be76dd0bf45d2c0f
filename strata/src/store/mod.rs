//! Persisted snapshots and their resolution into layered options.
//!
//! A [`SnapshotStore`] holds one snapshot per domain and scope. The
//! [`Resolver`] loads every requested scope, skips those without data, and
//! merges the rest through a [`Stack`](crate::Stack).

mod memory;
mod resolver;

pub use memory::MemoryStore;
pub use resolver::{DEFAULTS_SCOPE, Resolver};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoxError, StrataError, StrataResult};
use crate::scope::Scope;

/// Identifies one stored snapshot: a settings domain within a scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotRef {
    /// Settings domain, such as `notifications`.
    pub domain: String,
    /// Scope the snapshot belongs to.
    pub scope: Scope,
}

impl SnapshotRef {
    /// Reference `domain` within `scope`.
    #[must_use]
    pub fn new(domain: impl Into<String>, scope: Scope) -> Self {
        Self {
            domain: domain.into(),
            scope,
        }
    }

    /// Deterministic storage key for the reference.
    ///
    /// `system` maps to `system/<domain>`. `tenant`, `org`, `team`, and
    /// `user` map to `<scope>/<id>/<domain>`, where `<id>` is the non-empty
    /// string stored under the `<scope>_id` metadata key.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::InvalidReference`] for other scope names or a
    /// missing identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use strata::{Scope, store::SnapshotRef};
    ///
    /// let scope = Scope::new("user", 500).with_metadata([("user_id", json!("u-1"))]);
    /// let reference = SnapshotRef::new("notifications", scope);
    /// assert_eq!(reference.identifier()?, "user/u-1/notifications");
    /// # Ok::<(), strata::StrataError>(())
    /// ```
    pub fn identifier(&self) -> StrataResult<String> {
        let name = self.scope.name();
        match name {
            "system" => Ok(format!("system/{}", self.domain)),
            "tenant" | "org" | "team" | "user" => {
                let key = format!("{name}_id");
                match self.scope.metadata_value(&key) {
                    Some(Value::String(id)) if !id.is_empty() => {
                        Ok(format!("{name}/{id}/{}", self.domain))
                    }
                    _ => Err(self.invalid(format!("missing metadata key '{key}'"))),
                }
            }
            _ => Err(self.invalid(format!("unsupported scope name '{name}'"))),
        }
    }

    fn invalid(&self, message: String) -> StrataError {
        StrataError::InvalidReference {
            scope: self.scope.name().to_owned(),
            message,
        }
    }
}

/// Storage-owned metadata kept alongside a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Identifier recorded on the resolved layer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub snapshot_id: String,
    /// Concurrency token compared by [`Resolver::mutate`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    /// Free-form store metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl SnapshotMeta {
    /// Overlay the non-empty members of `update` onto `self`.
    #[must_use]
    pub fn overlay(&self, update: &Self) -> Self {
        let pick = |strong: &String, weak: &String| {
            if strong.is_empty() {
                weak.clone()
            } else {
                strong.clone()
            }
        };
        Self {
            snapshot_id: pick(&update.snapshot_id, &self.snapshot_id),
            etag: pick(&update.etag, &self.etag),
            extra: if update.extra.is_empty() {
                self.extra.clone()
            } else {
                update.extra.clone()
            },
        }
    }
}

/// Loads and saves one snapshot per [`SnapshotRef`].
///
/// Implementations provide their own thread safety.
pub trait SnapshotStore<T>: Send + Sync {
    /// Load the snapshot for `reference`, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the backing storage.
    fn load(&self, reference: &SnapshotRef) -> Result<Option<(T, SnapshotMeta)>, BoxError>;

    /// Store `snapshot` for `reference`, returning the metadata as saved.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the backing storage.
    fn save(
        &self,
        reference: &SnapshotRef,
        snapshot: T,
        meta: SnapshotMeta,
    ) -> Result<SnapshotMeta, BoxError>;
}
