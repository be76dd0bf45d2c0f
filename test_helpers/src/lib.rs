//! Shared test helpers for crates in the strata workspace.
//!
//! [`fixtures`] builds the canonical scope hierarchy with storage
//! identifiers. [`text`] parses scalar literals out of behavioural scenarios.

pub mod figment;
pub mod fixtures;
pub mod text;
