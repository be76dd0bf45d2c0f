//! Steps for building, merging, and tracing layer stacks.

use anyhow::{Context, Result, anyhow, ensure};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};
use strata::{Layer, OptionsConfig, Scope, Stack, path};
use test_helpers::text::parse_scalar;

use crate::fixtures::StackContext;

#[given("a {scope} layer with priority {priority:i64}")]
fn declare_layer(stack_context: &StackContext, scope: String, priority: i64) {
    let mut layers = stack_context.layers.take().unwrap_or_default();
    layers.push(Layer::new(Scope::new(scope, priority), json!({})));
    stack_context.layers.set(layers);
}

#[given("the {scope} layer sets {key} to {value}")]
fn assign_in_layer(
    stack_context: &StackContext,
    scope: String,
    key: String,
    value: String,
) -> Result<()> {
    let layers = stack_context
        .layers
        .take()
        .ok_or_else(|| anyhow!("no layers declared"))?;
    let mut updated = Vec::with_capacity(layers.len());
    let mut matched = false;
    for layer in layers {
        if layer.scope().name() == scope {
            let (layer_scope, mut snapshot, id) = layer.into_parts();
            path::set(&mut snapshot, &key, parse_scalar(&value))?;
            updated.push(Layer::new(layer_scope, snapshot).with_snapshot_id(id));
            matched = true;
        } else {
            updated.push(layer);
        }
    }
    stack_context.layers.set(updated);
    ensure!(matched, "no layer named {scope}");
    Ok(())
}

#[when("the stack is merged")]
fn merge_stack(stack_context: &StackContext) {
    let layers = stack_context.layers.get().unwrap_or_default();
    match Stack::new(layers).and_then(|stack| stack.merge(OptionsConfig::default())) {
        Ok(options) => stack_context.options.set(options),
        Err(err) => stack_context.failure.set(err.to_string()),
    }
}

#[when("{key} is set to {value}")]
fn set_merged(stack_context: &StackContext, key: String, value: String) -> Result<()> {
    let options = stack_context
        .options
        .take()
        .ok_or_else(|| anyhow!("stack has not been merged"))?;
    stack_context.options.set(options.set(&key, parse_scalar(&value))?);
    Ok(())
}

#[when("{key} is traced")]
fn trace_path(stack_context: &StackContext, key: String) -> Result<()> {
    let trace = stack_context
        .options
        .with_ref(|options| options.resolve_with_trace(&key))
        .ok_or_else(|| anyhow!("stack has not been merged"))??
        .1;
    stack_context.trace.set(trace);
    Ok(())
}

#[then("the merged value at {key} is {expected}")]
fn check_merged(stack_context: &StackContext, key: String, expected: String) -> Result<()> {
    let actual: Value = stack_context
        .options
        .with_ref(|options| options.get(&key))
        .ok_or_else(|| anyhow!("stack has not been merged"))??;
    let wanted = parse_scalar(&expected);
    ensure!(actual == wanted, "expected {wanted} at {key}, found {actual}");
    Ok(())
}

#[then("the trace lists scopes {scopes}")]
fn check_trace_scopes(stack_context: &StackContext, scopes: String) -> Result<()> {
    let trace = stack_context.trace.get().context("no trace captured")?;
    let actual: Vec<&str> = trace.layers.iter().map(|p| p.scope.name()).collect();
    let expected: Vec<&str> = scopes.split(',').map(str::trim).collect();
    ensure!(actual == expected, "trace scopes {actual:?} != {expected:?}");
    Ok(())
}

#[then("the trace is supplied by the {scope} layer")]
fn check_trace_effective(stack_context: &StackContext, scope: String) -> Result<()> {
    let trace = stack_context.trace.get().context("no trace captured")?;
    let effective = trace.effective().context("no layer supplied the value")?;
    ensure!(
        effective.scope.name() == scope,
        "supplied by {} rather than {scope}",
        effective.scope.name()
    );
    Ok(())
}

#[then("the traced value is {expected}")]
fn check_traced_value(stack_context: &StackContext, expected: String) -> Result<()> {
    let trace = stack_context.trace.get().context("no trace captured")?;
    let effective = trace.effective().context("no layer supplied the value")?;
    let wanted = parse_scalar(&expected);
    ensure!(
        effective.value == wanted,
        "traced {} rather than {wanted}",
        effective.value
    );
    Ok(())
}

#[then("merging fails with {message}")]
fn check_failure(stack_context: &StackContext, message: String) -> Result<()> {
    ensure!(stack_context.options.is_empty(), "merge unexpectedly succeeded");
    let failure = stack_context.failure.get().context("no merge failure recorded")?;
    ensure!(failure == message, "unexpected failure: {failure}");
    Ok(())
}
