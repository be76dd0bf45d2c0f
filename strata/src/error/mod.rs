//! Error types produced while building and querying layer stacks.

mod path;
mod types;

pub use path::PathError;
pub use types::{BoxError, StrataError, StrataResult};

#[cfg(test)]
mod tests;
