//! Scoped, prioritised configuration layers.
//!
//! `strata` composes one effective configuration value from several named
//! layers, such as system defaults overridden per tenant or user. Each
//! layer belongs to a [`Scope`] with a priority; a [`Stack`] orders the
//! layers strongest first and folds them with the [`Layered`] merge rules.
//! The resulting [`Options`] wrapper keeps the raw layers, so any path can be
//! traced back to the scope that supplied it.
//!
//! ```
//! use serde::Serialize;
//! use strata::{Layer, Layered, OptionsConfig, Scope, Stack};
//!
//! #[derive(Clone, Debug, Default, Serialize, Layered)]
//! struct Notifications {
//!     enabled: Option<bool>,
//!     channel: Option<String>,
//! }
//!
//! let stack = Stack::new(vec![
//!     Layer::new(
//!         Scope::new("system", 100),
//!         Notifications { enabled: Some(true), channel: Some("email".into()) },
//!     ),
//!     Layer::new(
//!         Scope::new("user", 500),
//!         Notifications { enabled: Some(false), channel: None },
//!     ),
//! ])?;
//! let options = stack.merge(OptionsConfig::new())?;
//!
//! assert_eq!(options.value().enabled, Some(false));
//! assert_eq!(options.value().channel.as_deref(), Some("email"));
//!
//! let (_, trace) = options.resolve_with_trace("channel")?;
//! assert_eq!(trace.effective().map(|entry| entry.scope.name()), Some("system"));
//! # Ok::<(), strata::StrataError>(())
//! ```

extern crate self as strata;

pub use strata_macros::Layered;

mod error;
pub mod evaluate;
mod layer;
mod layering;
mod options;
pub mod path;
pub mod schema;
mod scope;
pub mod source;
mod stack;
pub mod store;
pub mod trace;

pub use error::{BoxError, PathError, StrataError, StrataResult};
pub use evaluate::{Evaluator, RuleContext};
pub use layer::Layer;
pub use layering::{Layered, PathStep, Shape, describe_opaque, describe_path, merge_layers};
pub use options::{Options, OptionsConfig, Validate, apply_defaults};
pub use schema::{SchemaDocument, SchemaGenerator};
pub use scope::{
    SCOPE_PRIORITY_ORG, SCOPE_PRIORITY_SYSTEM, SCOPE_PRIORITY_TEAM, SCOPE_PRIORITY_TENANT,
    SCOPE_PRIORITY_USER, Scope,
};
pub use stack::{Stack, system_tenant_org_team_user};
pub use trace::{LeafProvenance, Origin, Provenance, Trace};
