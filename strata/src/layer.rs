//! A scope paired with the snapshot contributed at that precedence level.

use crate::Scope;

/// One snapshot of `T` contributed by a [`Scope`].
///
/// The layer owns its snapshot. Moving a value into [`Layer::new`] is the
/// defensive copy: callers that keep using their original must clone it first,
/// and nothing reachable through a layer can be mutated from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer<T> {
    scope: Scope,
    snapshot: T,
    snapshot_id: String,
}

impl<T> Layer<T> {
    /// Pair `snapshot` with `scope`.
    #[must_use]
    pub const fn new(scope: Scope, snapshot: T) -> Self {
        Self {
            scope,
            snapshot,
            snapshot_id: String::new(),
        }
    }

    /// Attach an opaque identifier used to correlate the snapshot in audits.
    #[must_use]
    pub fn with_snapshot_id(mut self, snapshot_id: impl Into<String>) -> Self {
        self.snapshot_id = snapshot_id.into();
        self
    }

    /// Scope that contributed this layer.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Raw snapshot as supplied.
    #[must_use]
    pub const fn snapshot(&self) -> &T {
        &self.snapshot
    }

    /// Caller-supplied snapshot identifier. Empty when none was set.
    #[must_use]
    pub fn snapshot_id(&self) -> &str {
        &self.snapshot_id
    }

    /// Split the layer into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Scope, T, String) {
        (self.scope, self.snapshot, self.snapshot_id)
    }
}
