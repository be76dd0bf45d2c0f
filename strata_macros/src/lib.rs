//! Procedural macros for `strata`.
//!
//! The [`Layered`](macro@Layered) derive implements `strata::Layered` for
//! structs and enums. Structs merge field by field, delegating each field to
//! its own `Layered` implementation; enums are replaced wholesale by the
//! stronger value.
//!
//! Field attributes:
//!
//! - `#[layered(replace)]` takes the stronger field verbatim instead of
//!   recursing. The field type then only needs to implement `Clone`.
//!
//! Path descriptions honour `#[serde(rename = "...")]`, container-level
//! `#[serde(rename_all = "...")]`, and skip fields that serde never
//! serialises, so dot paths resolve against the same keys serde emits.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `strata::Layered`.
#[proc_macro_derive(Layered, attributes(layered))]
pub fn derive_layered(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
