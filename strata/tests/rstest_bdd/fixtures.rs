//! Shared fixtures for the behavioural scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use strata::{Layer, Options, Trace};

/// Scenario state shared between stack steps.
#[derive(Debug, Default, ScenarioState)]
pub struct StackContext {
    /// Layers declared so far, in declaration order.
    pub layers: Slot<Vec<Layer<Value>>>,
    /// Result of merging the declared layers.
    pub options: Slot<Options<Value>>,
    /// Message of the last merge failure.
    pub failure: Slot<String>,
    /// Trace captured by the last trace step.
    pub trace: Slot<Trace>,
}

/// Creates an empty stack context for each scenario.
#[fixture]
pub fn stack_context() -> StackContext {
    StackContext::default()
}
