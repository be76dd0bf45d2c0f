//! Validated, strongest-first collections of layers.

mod presets;

pub use presets::system_tenant_org_team_user;

use std::collections::BTreeSet;

use crate::error::{StrataError, StrataResult};
use crate::layer::Layer;
use crate::layering::{Layered, fold_layers};
use crate::options::{Options, OptionsConfig};

/// Layers ordered from strongest (highest priority) to weakest.
///
/// Construction enforces that every scope name is non-empty and unique and
/// that priorities are pairwise distinct. A stack is immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Stack<T> {
    layers: Vec<Layer<T>>,
}

impl<T> Stack<T> {
    /// Validate `layers` and order them strongest first.
    ///
    /// Names are checked in input order, so the first offending layer is the
    /// one reported. Priorities are checked after sorting by priority
    /// (descending) and name (ascending). An empty input yields an empty
    /// stack.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::ScopeNameRequired`],
    /// [`StrataError::DuplicateScopeName`], or [`StrataError::PriorityOrder`].
    pub fn new(layers: Vec<Layer<T>>) -> StrataResult<Self> {
        validate_names(&layers)?;

        let mut sorted = layers;
        sorted.sort_by(|left, right| {
            right
                .scope()
                .priority()
                .cmp(&left.scope().priority())
                .then_with(|| left.scope().name().cmp(right.scope().name()))
        });
        let tie = sorted.windows(2).find_map(|pair| match pair {
            [stronger, weaker] if stronger.scope().priority() <= weaker.scope().priority() => {
                Some(weaker.scope().priority())
            }
            _ => None,
        });
        if let Some(priority) = tie {
            return Err(StrataError::PriorityOrder { priority });
        }
        Ok(Self { layers: sorted })
    }

    /// Layers, strongest first.
    #[must_use]
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when the stack has no layers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<T: Layered> Stack<T> {
    /// Fold the layers into one snapshot wrapped with `config`.
    ///
    /// The wrapper retains a copy of every layer, strongest first, for
    /// provenance queries.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::EmptyStack`] when the stack has no layers.
    pub fn merge(&self, config: OptionsConfig) -> StrataResult<Options<T>> {
        let snapshots: Vec<T> = self
            .layers
            .iter()
            .map(|layer| layer.snapshot().clone())
            .collect();
        let merged = fold_layers(&snapshots).ok_or(StrataError::EmptyStack)?;
        tracing::debug!(
            layers = self.layers.len(),
            strongest = self.layers.first().map(|layer| layer.scope().name()),
            "merged layer stack"
        );
        Ok(Options::from_layers(merged, self.layers.clone(), config))
    }
}

/// Reject empty and repeated scope names, in input order.
fn validate_names<T>(layers: &[Layer<T>]) -> StrataResult<()> {
    let mut seen = BTreeSet::new();
    for layer in layers {
        let name = layer.scope().name();
        if name.is_empty() {
            return Err(StrataError::ScopeNameRequired);
        }
        if !seen.insert(name) {
            return Err(StrataError::DuplicateScopeName {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}
