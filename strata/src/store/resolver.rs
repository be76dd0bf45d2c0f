//! Resolution of stored snapshots into merged options.

use crate::error::{BoxError, StrataError, StrataResult};
use crate::layer::Layer;
use crate::layering::Layered;
use crate::options::{Options, OptionsConfig, Validate};
use crate::scope::Scope;
use crate::stack::Stack;

use super::{SnapshotMeta, SnapshotRef, SnapshotStore};

/// Scope name reserved for the in-memory defaults layer.
pub const DEFAULTS_SCOPE: &str = "defaults";

/// Loads scoped snapshots from a store and merges them.
///
/// Resolved wrappers always include scope descriptors in their schema.
#[derive(Clone, Debug, Default)]
pub struct Resolver<S> {
    store: S,
}

impl<S> Resolver<S> {
    /// Resolve against `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Merge the snapshots stored for `domain` in each of `scopes`.
    ///
    /// Scopes without stored data are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::DomainRequired`] for an empty domain,
    /// [`StrataError::NoLayers`] when no scope has data, and any reference,
    /// store, or stack error encountered on the way.
    pub fn resolve<T>(&self, domain: &str, scopes: &[Scope]) -> StrataResult<Options<T>>
    where
        T: Layered,
        S: SnapshotStore<T>,
    {
        if domain.is_empty() {
            return Err(StrataError::DomainRequired);
        }
        let layers = self.load_layers(domain, scopes)?;
        if layers.is_empty() {
            return Err(StrataError::NoLayers {
                domain: domain.to_owned(),
            });
        }
        merge(layers)
    }

    /// Merge the stored snapshots over `defaults`.
    ///
    /// `defaults` becomes a layer in the reserved [`DEFAULTS_SCOPE`], one
    /// priority step below the weakest supplied scope (or at priority 0 when
    /// no scope is supplied), so the result never lacks a layer.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::DomainRequired`] for an empty domain,
    /// [`StrataError::ReservedScope`] when a supplied scope is called
    /// `defaults`, and any reference, store, or stack error.
    pub fn resolve_with_defaults<T>(
        &self,
        domain: &str,
        defaults: T,
        scopes: &[Scope],
    ) -> StrataResult<Options<T>>
    where
        T: Layered,
        S: SnapshotStore<T>,
    {
        if domain.is_empty() {
            return Err(StrataError::DomainRequired);
        }
        if scopes.iter().any(|scope| scope.name() == DEFAULTS_SCOPE) {
            return Err(StrataError::ReservedScope {
                name: DEFAULTS_SCOPE.to_owned(),
            });
        }
        let priority = scopes
            .iter()
            .map(Scope::priority)
            .min()
            .map_or(0, |weakest| weakest.saturating_sub(1));

        let mut layers = self.load_layers(domain, scopes)?;
        layers.push(Layer::new(
            Scope::new(DEFAULTS_SCOPE, priority).with_label("Defaults"),
            defaults,
        ));
        merge(layers)
    }

    /// Apply `change` to the stored snapshot for `reference` and save it.
    ///
    /// A missing snapshot starts from `T::default()`. When both `meta` and
    /// the stored metadata carry an etag they must match. Non-empty members
    /// of `meta` override the stored metadata on save. Returns a wrapper over
    /// the saved snapshot and the metadata as saved.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::ETagMismatch`] on a concurrent change, any
    /// error from `change` or [`Validate::validate`], and any reference or
    /// store error. Nothing is saved when an error is returned.
    pub fn mutate<T, F>(
        &self,
        reference: &SnapshotRef,
        meta: &SnapshotMeta,
        change: F,
    ) -> StrataResult<(Options<T>, SnapshotMeta)>
    where
        T: Layered + Default + Validate,
        S: SnapshotStore<T>,
        F: FnOnce(&mut T) -> StrataResult<()>,
    {
        if reference.domain.is_empty() {
            return Err(StrataError::DomainRequired);
        }
        if reference.scope.name().is_empty() {
            return Err(StrataError::ScopeNameRequired);
        }
        let identifier = reference.identifier()?;
        let (mut snapshot, stored) = self
            .store
            .load(reference)
            .map_err(|source| store_error("load", &identifier, source))?
            .unwrap_or_default();

        if !meta.etag.is_empty() && !stored.etag.is_empty() && meta.etag != stored.etag {
            return Err(StrataError::ETagMismatch {
                expected: meta.etag.clone(),
                actual: stored.etag,
            });
        }
        change(&mut snapshot)?;
        snapshot.validate()?;

        let saved = self
            .store
            .save(reference, snapshot.clone(), stored.overlay(meta))
            .map_err(|source| store_error("save", &identifier, source))?;
        tracing::debug!(identifier = %identifier, "saved mutated snapshot");
        let layer = Layer::new(reference.scope.clone(), snapshot)
            .with_snapshot_id(saved.snapshot_id.clone());
        Ok((merge(vec![layer])?, saved))
    }

    fn load_layers<T>(&self, domain: &str, scopes: &[Scope]) -> StrataResult<Vec<Layer<T>>>
    where
        S: SnapshotStore<T>,
    {
        let mut layers = Vec::with_capacity(scopes.len() + 1);
        for scope in scopes {
            let reference = SnapshotRef::new(domain, scope.clone());
            let identifier = reference.identifier()?;
            let Some((snapshot, meta)) = self
                .store
                .load(&reference)
                .map_err(|source| store_error("load", &identifier, source))?
            else {
                tracing::debug!(identifier = %identifier, "no stored snapshot; skipping scope");
                continue;
            };
            layers.push(Layer::new(reference.scope, snapshot).with_snapshot_id(meta.snapshot_id));
        }
        Ok(layers)
    }
}

fn merge<T: Layered>(layers: Vec<Layer<T>>) -> StrataResult<Options<T>> {
    Stack::new(layers)?.merge(OptionsConfig::new().with_scope_schema(true))
}

fn store_error(
    operation: &'static str,
    identifier: &str,
    source: BoxError,
) -> StrataError {
    StrataError::Store {
        operation,
        identifier: identifier.to_owned(),
        source,
    }
}
