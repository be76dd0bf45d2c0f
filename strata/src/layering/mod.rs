//! Structural merge primitive shared by every layered snapshot.
//!
//! [`Layered`] describes how a value of one type absorbs a weaker value of the
//! same type. The rules are fixed per shape:
//!
//! - `Option<T>`: `None` inherits the weaker value; `Some` recurses so a
//!   partially populated nested value still inherits unset sub-fields.
//! - structs (via `#[derive(Layered)]`): always recurse field by field.
//! - maps: key-wise. Every weaker key is kept and keys present on both sides
//!   merge recursively.
//! - `Vec<T>`: replaced wholesale by the stronger side.
//! - `[T; N]`: merged index by index.
//! - scalars: the stronger value always wins, including `false`, `0`, and
//!   `""`. Model a scalar as `Option<T>` when it must be able to inherit.
//! - [`serde_json::Value`]: `null` inherits, objects merge key-wise, anything
//!   else replaces.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use strata::{Layered, merge_layers};
//!
//! #[derive(Clone, Debug, Default, PartialEq, Layered)]
//! struct Notifications {
//!     enabled: bool,
//!     retries: Option<u32>,
//!     labels: BTreeMap<String, String>,
//! }
//!
//! let user = Notifications {
//!     enabled: false,
//!     retries: None,
//!     labels: BTreeMap::from([("team".into(), "core".into())]),
//! };
//! let defaults = Notifications {
//!     enabled: true,
//!     retries: Some(3),
//!     labels: BTreeMap::from([("env".into(), "prod".into())]),
//! };
//!
//! let merged = merge_layers(&[user, defaults]);
//! assert!(!merged.enabled);
//! assert_eq!(merged.retries, Some(3));
//! assert_eq!(merged.labels.len(), 2);
//! ```

mod impls;
mod shape;

pub use shape::{PathStep, Shape, describe_opaque, describe_path};

/// A value that can be merged over a weaker value of the same type.
///
/// Implementations must not alias storage between the inputs and the result;
/// the returned value is freshly owned.
pub trait Layered: Clone {
    /// Merge `self` (the stronger value) over `weaker`.
    #[must_use]
    fn merge(&self, weaker: &Self) -> Self;

    /// Translate dot-path `segments` into the serialised keys of this type.
    ///
    /// Each pushed [`PathStep`] records the key used in the serde projection
    /// and the shape of the container that holds it. Types without static
    /// structure describe the remaining segments as [`Shape::Dynamic`].
    fn describe_path(segments: &[&str], steps: &mut Vec<PathStep>) {
        describe_opaque(segments, steps);
    }
}

/// Fold `layers`, ordered strongest to weakest, into one value.
///
/// The weakest layer forms the baseline and every stronger layer is merged
/// over the accumulated result in turn. An empty slice yields
/// `T::default()`.
#[must_use]
pub fn merge_layers<T>(layers: &[T]) -> T
where
    T: Layered + Default,
{
    fold_layers(layers).unwrap_or_default()
}

/// Fold `layers` like [`merge_layers`], returning `None` for an empty slice.
pub(crate) fn fold_layers<T: Layered>(layers: &[T]) -> Option<T> {
    let (weakest, stronger) = layers.split_last()?;
    Some(
        stronger
            .iter()
            .rev()
            .fold(weakest.clone(), |merged, layer| layer.merge(&merged)),
    )
}
