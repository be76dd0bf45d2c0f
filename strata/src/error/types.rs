//! Primary error enum for the crate.

use thiserror::Error;

use super::PathError;

/// Boxed error type used for failures raised by external collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type StrataResult<T> = Result<T, StrataError>;

/// Errors that can occur while assembling or querying layered configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// A layer was supplied whose scope has an empty name.
    #[error("scope: name must be provided")]
    ScopeNameRequired,

    /// Two layers in the same stack share a scope name.
    #[error("scope: names must be unique: {name}")]
    DuplicateScopeName {
        /// Name that appeared more than once.
        name: String,
    },

    /// Two layers in the same stack share a priority.
    #[error("scope: priorities must be strictly ordered: {priority}")]
    PriorityOrder {
        /// Priority shared by at least two layers.
        priority: i64,
    },

    /// A stack without layers cannot be resolved.
    #[error("scope: stack must include at least one layer")]
    EmptyStack,

    /// Path parsing, navigation, or assignment failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A snapshot could not be projected to or from its serialised form.
    #[error("failed to project snapshot: {0}")]
    Projection(#[from] serde_json::Error),

    /// A value written through a path did not survive deserialisation.
    #[error("path '{path}': assigned value was not retained by the snapshot type")]
    SetRejected {
        /// Requested path.
        path: String,
    },

    /// Validation failures reported by a snapshot's validation hook.
    #[error("Validation failed for '{key}': {message}")]
    Validation {
        /// Field or path that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },

    /// Evaluation was requested on a wrapper without an evaluator.
    #[error("evaluator not configured")]
    NoEvaluator,

    /// Evaluation was requested with an empty expression.
    #[error("expression must not be empty")]
    EmptyExpression,

    /// The configured evaluator rejected or failed an expression.
    #[error("{engine} evaluator expr={expr:?} scope={scope}: {source}")]
    Evaluation {
        /// Engine label reported by the evaluator.
        engine: String,
        /// Expression that failed.
        expr: String,
        /// Name of the scope bound into the evaluation context.
        scope: String,
        /// Underlying evaluator error.
        #[source]
        source: BoxError,
    },

    /// The configured schema generator failed.
    #[error("schema generation failed: {0}")]
    Schema(#[source] BoxError),

    /// A layer could not be extracted from a configuration provider.
    #[error("Failed to load layer for scope '{scope}': {source}")]
    Source {
        /// Scope the layer was being loaded for.
        scope: String,
        /// Underlying provider error.
        #[source]
        source: Box<figment::Error>,
    },

    /// A snapshot reference could not be turned into a storage identifier.
    #[error("state: invalid reference for scope '{scope}': {message}")]
    InvalidReference {
        /// Scope named by the reference.
        scope: String,
        /// Explanation of what is missing.
        message: String,
    },

    /// A resolver request omitted the domain.
    #[error("state: domain is required")]
    DomainRequired,

    /// A resolver request referenced no scope with stored data.
    #[error("state: no layers found for domain '{domain}'")]
    NoLayers {
        /// Domain that produced no layers.
        domain: String,
    },

    /// A caller-supplied scope used a name reserved by the resolver.
    #[error("state: scope name '{name}' is reserved")]
    ReservedScope {
        /// Reserved name.
        name: String,
    },

    /// A mutation was attempted against a snapshot whose etag has changed.
    #[error("state: etag mismatch: expected '{expected}', got '{actual}'")]
    ETagMismatch {
        /// Etag supplied by the caller.
        expected: String,
        /// Etag currently stored.
        actual: String,
    },

    /// The snapshot store failed to load or save.
    #[error("state: {operation} '{identifier}' failed: {source}")]
    Store {
        /// Operation being attempted (`load` or `save`).
        operation: &'static str,
        /// Storage identifier of the reference.
        identifier: String,
        /// Underlying store error.
        #[source]
        source: BoxError,
    },
}

impl StrataError {
    /// Construct a validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::StrataError;
    /// let e = StrataError::validation("port", "must be positive");
    /// assert!(matches!(e, StrataError::Validation { .. }));
    /// ```
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct a source error for `scope` from a [`figment::Error`].
    #[must_use]
    pub fn from_provider(scope: impl Into<String>, source: figment::Error) -> Self {
        Self::Source {
            scope: scope.into(),
            source: Box::new(source),
        }
    }

    /// Returns `true` when the error reports a violated stack invariant.
    #[must_use]
    pub const fn is_scope_violation(&self) -> bool {
        matches!(
            self,
            Self::ScopeNameRequired | Self::DuplicateScopeName { .. } | Self::PriorityOrder { .. }
        )
    }
}
