//! Path descriptions recovered from a type's static structure.

use super::Layered;

/// Shape of the container that holds a path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Shape {
    /// A struct field. Structs cannot gain members dynamically.
    Struct,
    /// A string-keyed map entry.
    Map,
    /// A `Vec` or fixed-size array element.
    Sequence,
    /// Unknown statically; decided by the projected value at runtime.
    Dynamic,
}

impl Shape {
    /// Human-readable label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Map => "map",
            Self::Sequence => "sequence",
            Self::Dynamic => "value",
        }
    }
}

/// One resolved segment of a dot path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    key: String,
    container: Shape,
}

impl PathStep {
    /// Create a step for `key` held by a container of shape `container`.
    #[must_use]
    pub fn new(key: impl Into<String>, container: Shape) -> Self {
        Self {
            key: key.into(),
            container,
        }
    }

    /// Key of this segment in the serialised projection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Shape of the container holding this segment.
    #[must_use]
    pub const fn container(&self) -> Shape {
        self.container
    }
}

/// Describe every remaining segment as [`Shape::Dynamic`], verbatim.
pub fn describe_opaque(segments: &[&str], steps: &mut Vec<PathStep>) {
    steps.extend(
        segments
            .iter()
            .map(|segment| PathStep::new(*segment, Shape::Dynamic)),
    );
}

/// Describe `segments` against the structure of `T`.
#[must_use]
pub fn describe_path<T: Layered>(segments: &[&str]) -> Vec<PathStep> {
    let mut steps = Vec::with_capacity(segments.len());
    T::describe_path(segments, &mut steps);
    steps
}
