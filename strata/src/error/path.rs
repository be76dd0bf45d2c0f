//! Errors raised while parsing and following dot paths.

use thiserror::Error;

/// Failure to parse, follow, or write a dot-separated path.
///
/// Every variant except [`PathError::Empty`] carries the full requested path
/// and the segment at which the operation failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    /// The path was empty.
    #[error("path must not be empty")]
    Empty,

    /// The path contained an empty segment (`a..b`, `.a`, `a.`).
    #[error("path '{path}' contains an empty segment")]
    EmptySegment {
        /// Requested path.
        path: String,
    },

    /// Navigation reached a `null` value before the final segment.
    #[error("path '{path}': cannot resolve '{segment}' through a null value")]
    Null {
        /// Requested path.
        path: String,
        /// Segment that could not be resolved.
        segment: String,
    },

    /// An object did not contain the requested key.
    #[error("path '{path}': key '{segment}' not found")]
    MissingKey {
        /// Requested path.
        path: String,
        /// Missing key.
        segment: String,
    },

    /// A sequence segment was not a non-negative integer.
    #[error("path '{path}': '{segment}' is not a valid index")]
    InvalidIndex {
        /// Requested path.
        path: String,
        /// Offending segment.
        segment: String,
    },

    /// A sequence index was past the end of the sequence.
    #[error("path '{path}': index {segment} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested path.
        path: String,
        /// Offending segment.
        segment: String,
        /// Length of the sequence.
        len: usize,
    },

    /// The value at this point cannot be descended into.
    #[error("path '{path}': cannot resolve '{segment}' inside a {kind}")]
    Unsupported {
        /// Requested path.
        path: String,
        /// Segment that could not be resolved.
        segment: String,
        /// Kind of value encountered.
        kind: &'static str,
    },

    /// Assignment would have to add a member to a non-map container.
    #[error("path '{path}': cannot assign '{segment}' inside a {kind}")]
    NotWritable {
        /// Requested path.
        path: String,
        /// Segment that could not be assigned.
        segment: String,
        /// Kind of container encountered.
        kind: &'static str,
    },
}

impl PathError {
    /// Returns the segment at which the operation failed, if any.
    #[must_use]
    pub fn segment(&self) -> Option<&str> {
        match self {
            Self::Empty | Self::EmptySegment { .. } => None,
            Self::Null { segment, .. }
            | Self::MissingKey { segment, .. }
            | Self::InvalidIndex { segment, .. }
            | Self::IndexOutOfRange { segment, .. }
            | Self::Unsupported { segment, .. }
            | Self::NotWritable { segment, .. } => Some(segment),
        }
    }

    /// Returns the requested path, if the error carries one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::EmptySegment { path }
            | Self::Null { path, .. }
            | Self::MissingKey { path, .. }
            | Self::InvalidIndex { path, .. }
            | Self::IndexOutOfRange { path, .. }
            | Self::Unsupported { path, .. }
            | Self::NotWritable { path, .. } => Some(path),
        }
    }
}
