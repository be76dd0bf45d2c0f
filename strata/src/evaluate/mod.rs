//! Expression evaluation against a resolved snapshot.
//!
//! The crate ships no expression engine. Applications plug one in through the
//! [`Evaluator`] trait and register it on [`OptionsConfig`](crate::OptionsConfig);
//! [`Options::evaluate`](crate::Options::evaluate) then hands the engine a
//! [`RuleContext`] built from the merged snapshot.

use std::collections::BTreeMap;
use std::time::{Duration, Instant, SystemTime};

use serde::Serialize;
use serde_json::Value;

use crate::error::{BoxError, StrataError, StrataResult};
use crate::options::Options;

/// Scope label reported when a context names no scope.
const UNKNOWN_SCOPE: &str = "unknown";

/// Inputs available to an expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleContext {
    /// Snapshot the expression is evaluated against.
    pub snapshot: Option<Value>,
    /// Evaluation time. Filled with the current time when absent.
    pub now: Option<SystemTime>,
    /// Caller-supplied arguments.
    pub args: BTreeMap<String, Value>,
    /// Caller-supplied metadata.
    pub metadata: BTreeMap<String, Value>,
    /// Name of the scope bound into the evaluation.
    pub scope: String,
}

impl RuleContext {
    /// Context bound to `snapshot`.
    #[must_use]
    pub fn for_snapshot(snapshot: Value) -> Self {
        Self {
            snapshot: Some(snapshot),
            ..Self::default()
        }
    }

    /// Bind the context to the scope called `scope`.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Add a named argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    /// Pin the evaluation time.
    #[must_use]
    pub const fn with_now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Evaluation time, defaulting to the current time.
    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        self.now.unwrap_or_else(SystemTime::now)
    }

    /// Scope name for diagnostics; `unknown` when unbound.
    #[must_use]
    pub fn scope_label(&self) -> &str {
        if self.scope.is_empty() {
            UNKNOWN_SCOPE
        } else {
            &self.scope
        }
    }
}

/// An expression engine.
pub trait Evaluator: Send + Sync {
    /// Short engine label used in diagnostics, such as `expr` or `cel`.
    fn engine(&self) -> &str {
        "custom"
    }

    /// Evaluate `expr` against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the engine while compiling or running the
    /// expression.
    fn evaluate(&self, ctx: &RuleContext, expr: &str) -> Result<Value, BoxError>;
}

impl<T: Serialize> Options<T> {
    /// Evaluate `expr` against the resolved snapshot.
    ///
    /// The context is bound to the configured active scope, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::EmptyExpression`], [`StrataError::NoEvaluator`],
    /// [`StrataError::Projection`] when the snapshot cannot be serialised, or
    /// [`StrataError::Evaluation`] when the engine fails.
    pub fn evaluate(&self, expr: &str) -> StrataResult<Value> {
        self.evaluate_with(RuleContext::default(), expr)
    }

    /// Evaluate `expr` against `ctx`.
    ///
    /// The resolved snapshot fills `ctx.snapshot` when it is absent, and the
    /// configured active scope fills `ctx.scope` when it is empty.
    ///
    /// # Errors
    ///
    /// As for [`Options::evaluate`].
    pub fn evaluate_with(&self, mut ctx: RuleContext, expr: &str) -> StrataResult<Value> {
        if expr.is_empty() {
            return Err(StrataError::EmptyExpression);
        }
        let evaluator = self
            .config()
            .evaluator()
            .ok_or(StrataError::NoEvaluator)?;
        if ctx.snapshot.is_none() {
            ctx.snapshot = Some(serde_json::to_value(self.value())?);
        }
        if ctx.scope.is_empty()
            && let Some(scope) = self.config().scope()
        {
            ctx.scope = scope.name().to_owned();
        }
        ctx.now = Some(ctx.timestamp());

        let started = Instant::now();
        let outcome = evaluator.evaluate(&ctx, expr);
        log_evaluation(evaluator.engine(), expr, &ctx, started.elapsed(), &outcome);
        outcome.map_err(|source| StrataError::Evaluation {
            engine: evaluator.engine().to_owned(),
            expr: expr.to_owned(),
            scope: ctx.scope_label().to_owned(),
            source,
        })
    }
}

fn log_evaluation(
    engine: &str,
    expr: &str,
    ctx: &RuleContext,
    elapsed: Duration,
    outcome: &Result<Value, BoxError>,
) {
    match outcome {
        Ok(_) => tracing::debug!(
            engine,
            expr,
            scope = ctx.scope_label(),
            elapsed_us = elapsed.as_micros(),
            "evaluated expression"
        ),
        Err(err) => tracing::warn!(
            engine,
            expr,
            scope = ctx.scope_label(),
            elapsed_us = elapsed.as_micros(),
            error = %err,
            "expression evaluation failed"
        ),
    }
}
