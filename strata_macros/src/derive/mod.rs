//! Implementation of the `Layered` derive.

mod expand;
mod input;
mod serde_attrs;

pub(crate) use expand::expand;
