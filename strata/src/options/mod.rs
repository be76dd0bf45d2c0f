//! The resolved-configuration wrapper.
//!
//! [`Options`] holds the effective snapshot produced by a
//! [`Stack`](crate::Stack) together with the raw layers it was folded from,
//! so provenance queries can re-examine each contribution. Wrappers built
//! directly with [`Options::new`] carry no layers.

mod config;

pub use config::OptionsConfig;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StrataError, StrataResult};
use crate::layer::Layer;
use crate::layering::{Layered, PathStep, describe_path, fold_layers};
use crate::path;

/// A hook run on snapshots loaded through [`Options::load`].
pub trait Validate {
    /// Check the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found, typically built
    /// with [`StrataError::validation`].
    fn validate(&self) -> StrataResult<()>;
}

/// A resolved snapshot, its retained layers, and collaborator wiring.
#[derive(Clone, Debug)]
pub struct Options<T> {
    value: T,
    layers: Vec<Layer<T>>,
    config: OptionsConfig,
}

impl<T> Options<T> {
    /// Wrap `value` with an empty configuration.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_config(value, OptionsConfig::default())
    }

    /// Wrap `value` with `config`.
    #[must_use]
    pub const fn with_config(value: T, config: OptionsConfig) -> Self {
        Self {
            value,
            layers: Vec::new(),
            config,
        }
    }

    pub(crate) const fn from_layers(
        value: T,
        layers: Vec<Layer<T>>,
        config: OptionsConfig,
    ) -> Self {
        Self {
            value,
            layers,
            config,
        }
    }

    /// Resolved snapshot.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper, returning the resolved snapshot.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Raw layers the value was resolved from, strongest first.
    ///
    /// Empty when the wrapper was constructed directly.
    #[must_use]
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    /// Collaborator wiring.
    #[must_use]
    pub const fn config(&self) -> &OptionsConfig {
        &self.config
    }

    /// New wrapper holding `value` and this wrapper's configuration.
    ///
    /// Retained layers describe the old value, so they are not carried over.
    #[must_use]
    pub fn with_value(&self, value: T) -> Self {
        Self::with_config(value, self.config.clone())
    }
}

impl<T: Validate> Options<T> {
    /// Wrap `value` after running its [`Validate`] hook.
    ///
    /// # Errors
    ///
    /// Returns the error reported by [`Validate::validate`].
    pub fn load(value: T, config: OptionsConfig) -> StrataResult<Self> {
        value.validate()?;
        Ok(Self::with_config(value, config))
    }

    /// Run the [`Validate`] hook on the resolved snapshot.
    ///
    /// # Errors
    ///
    /// Returns the error reported by [`Validate::validate`].
    pub fn validate(&self) -> StrataResult<()> {
        self.value.validate()
    }
}

impl<T: Layered> Options<T> {
    /// Merge `layers`, ordered strongest to weakest, over the current value.
    ///
    /// The current value is the weakest layer. The result is a new wrapper
    /// with this wrapper's configuration.
    #[must_use]
    pub fn layer_with<I>(&self, layers: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut combined: Vec<T> = layers.into_iter().collect();
        combined.push(self.value.clone());
        tracing::debug!(layers = combined.len(), "layering over resolved value");
        let merged = fold_layers(&combined).unwrap_or_else(|| self.value.clone());
        self.with_value(merged)
    }
}

impl<T: Layered + Serialize> Options<T> {
    /// Read the value at `path` from the resolved snapshot.
    ///
    /// Struct fields may be addressed by their Rust name or their serialised
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Path`] when the path cannot be followed and
    /// [`StrataError::Projection`] when the snapshot cannot be serialised.
    pub fn get(&self, path: &str) -> StrataResult<Value> {
        let steps = steps_for::<T>(path)?;
        let projected = serde_json::to_value(&self.value)?;
        let found = path::lookup(&projected, path, &keys(&steps))?;
        Ok(found.clone())
    }
}

impl<T: Layered + Serialize + DeserializeOwned> Options<T> {
    /// New wrapper whose snapshot holds `value` at `path`.
    ///
    /// Maps gain missing keys on demand; struct fields may be overwritten but
    /// never added; sequences cannot be written through. The result is built
    /// with [`Options::with_value`], so it carries no layers and traces
    /// report the written value. `self` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Path`] when the path cannot be written,
    /// [`StrataError::Projection`] when the result no longer deserialises into
    /// `T`, and [`StrataError::SetRejected`] when `T` discards the value.
    pub fn set(&self, path: &str, value: Value) -> StrataResult<Self> {
        let steps = steps_for::<T>(path)?;
        let key_path = keys(&steps);
        let mut projected = serde_json::to_value(&self.value)?;
        path::assign(&mut projected, path, &steps, value)?;
        let updated: T = serde_json::from_value(projected.clone())?;

        let readback = serde_json::to_value(&updated)?;
        let retained = path::lookup(&readback, path, &key_path).ok();
        if retained.is_none() || retained != path::lookup(&projected, path, &key_path).ok() {
            return Err(StrataError::SetRejected {
                path: path.to_owned(),
            });
        }
        Ok(self.with_value(updated))
    }
}

/// Parse `path` and translate it into the serialised keys of `T`.
pub(crate) fn steps_for<T: Layered>(path: &str) -> StrataResult<Vec<PathStep>> {
    let segments = path::parse(path)?;
    Ok(describe_path::<T>(&segments))
}

pub(crate) fn keys(steps: &[PathStep]) -> Vec<&str> {
    steps.iter().map(PathStep::key).collect()
}

/// Return `value`, or `defaults` when `value` equals `T::default()`.
///
/// # Examples
///
/// ```
/// use strata::apply_defaults;
///
/// assert_eq!(apply_defaults(String::new(), "fallback".to_owned()), "fallback");
/// assert_eq!(apply_defaults(3_u8, 9), 3);
/// ```
#[must_use]
pub fn apply_defaults<T>(value: T, defaults: T) -> T
where
    T: Default + PartialEq,
{
    if value == T::default() {
        defaults
    } else {
        value
    }
}
