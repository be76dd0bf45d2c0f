//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{StackContext, stack_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/layered_stack.feature",
    fixtures = [stack_context: StackContext]
);
