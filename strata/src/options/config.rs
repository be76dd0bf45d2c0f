//! Per-wrapper collaborator wiring.

use std::fmt;
use std::sync::Arc;

use crate::Scope;
use crate::evaluate::Evaluator;
use crate::schema::SchemaGenerator;

/// Collaborators and flags attached to an [`Options`](crate::Options) wrapper.
///
/// Everything is decided when the configuration is built; wrappers never
/// install collaborators lazily. Clones share the same evaluator and schema
/// generator.
///
/// # Examples
///
/// ```
/// use strata::{OptionsConfig, Scope};
///
/// let config = OptionsConfig::new()
///     .with_scope_schema(true)
///     .with_scope(Scope::new("user", 500));
/// assert!(config.scope_schema());
/// assert!(config.evaluator().is_none());
/// ```
#[derive(Clone, Default)]
pub struct OptionsConfig {
    evaluator: Option<Arc<dyn Evaluator>>,
    schema_generator: Option<Arc<dyn SchemaGenerator>>,
    scope_schema: bool,
    scope: Option<Scope>,
}

impl OptionsConfig {
    /// Configuration with no collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `evaluator` for [`Options::evaluate`](crate::Options::evaluate).
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Use `generator` for [`Options::schema`](crate::Options::schema) instead
    /// of the built-in descriptor generator.
    #[must_use]
    pub fn with_schema_generator(mut self, generator: Arc<dyn SchemaGenerator>) -> Self {
        self.schema_generator = Some(generator);
        self
    }

    /// Include scope descriptors of the retained layers in schema documents.
    #[must_use]
    pub const fn with_scope_schema(mut self, enabled: bool) -> Self {
        self.scope_schema = enabled;
        self
    }

    /// Scope bound into evaluation contexts that do not name one.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Configured evaluator, if any.
    #[must_use]
    pub fn evaluator(&self) -> Option<&dyn Evaluator> {
        self.evaluator.as_deref()
    }

    /// Configured schema generator, if any.
    #[must_use]
    pub fn schema_generator(&self) -> Option<&dyn SchemaGenerator> {
        self.schema_generator.as_deref()
    }

    /// Whether schema documents list the retained scopes.
    #[must_use]
    pub const fn scope_schema(&self) -> bool {
        self.scope_schema
    }

    /// Active scope, if any.
    #[must_use]
    pub const fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }
}

impl fmt::Debug for OptionsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsConfig")
            .field(
                "evaluator",
                &self.evaluator.as_ref().map(|evaluator| evaluator.engine()),
            )
            .field(
                "schema_generator",
                &self.schema_generator.as_ref().map(|_| "<generator>"),
            )
            .field("scope_schema", &self.scope_schema)
            .field("scope", &self.scope.as_ref().map(Scope::name))
            .finish()
    }
}
