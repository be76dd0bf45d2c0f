//! `rstest-bdd` behaviour tests for layered stacks.
//!
//! Feature files live under `tests/features`; [`scenarios`] binds them to the
//! fixtures in [`fixtures`] and the step registry in [`steps`].

mod fixtures;
mod scenarios;
mod steps;
