//! Token generation for the `Layered` derive.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_quote};

use super::input::{FieldSpec, LayeredInput, Layout};

/// Expand `#[derive(Layered)]` for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = LayeredInput::parse(input)?;
    let ident = &input.ident;
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::strata::Layered));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let merge_fn = merge_tokens(&parsed);
    let describe_fn = describe_tokens(&parsed);

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::strata::Layered for #ident #ty_generics #where_clause {
            #merge_fn
            #describe_fn
        }
    })
}

/// Generate the `merge` method.
///
/// Structs rebuild `Self` from per-field merges; enums and unit structs have
/// no fields to inherit and take the stronger value verbatim.
fn merge_tokens(parsed: &LayeredInput<'_>) -> TokenStream {
    if matches!(parsed.layout, Layout::Enum | Layout::Unit) || parsed.fields.is_empty() {
        return quote! {
            fn merge(&self, _weaker: &Self) -> Self {
                ::core::clone::Clone::clone(self)
            }
        };
    }
    let inits = parsed.fields.iter().map(|field| {
        let member = &field.member;
        if field.replace {
            quote! { #member: ::core::clone::Clone::clone(&self.#member) }
        } else {
            quote! { #member: ::strata::Layered::merge(&self.#member, &weaker.#member) }
        }
    });
    quote! {
        fn merge(&self, weaker: &Self) -> Self {
            Self { #( #inits, )* }
        }
    }
}

/// Generate the `describe_path` method, or nothing when the default opaque
/// description applies.
fn describe_tokens(parsed: &LayeredInput<'_>) -> TokenStream {
    match parsed.layout {
        Layout::Named => describe_named(&parsed.fields),
        Layout::Tuple => describe_tuple(&parsed.fields),
        Layout::Unit | Layout::Enum => TokenStream::new(),
    }
}

fn child_description(field: &FieldSpec<'_>, rest: &syn::Ident) -> TokenStream {
    if field.replace {
        quote! { ::strata::describe_opaque(#rest, steps); }
    } else {
        let ty = field.ty;
        quote! { <#ty as ::strata::Layered>::describe_path(#rest, steps); }
    }
}

/// Named structs match Rust field names first and serde keys second; an
/// unknown segment is kept verbatim so navigation reports the missing key.
fn describe_named(fields: &[FieldSpec<'_>]) -> TokenStream {
    let rest = format_ident!("rest");
    let serialised: Vec<&FieldSpec<'_>> = fields
        .iter()
        .filter(|field| field.serde_key.is_some())
        .collect();

    let by_rust_name = serialised.iter().filter_map(|field| {
        let name = field.rust_name.as_deref()?;
        let key = field.serde_key.as_deref()?;
        let child = child_description(field, &rest);
        Some(quote! {
            if head == #name {
                steps.push(::strata::PathStep::new(#key, ::strata::Shape::Struct));
                #child
                return;
            }
        })
    });
    let by_serde_key = serialised.iter().filter_map(|field| {
        let key = field.serde_key.as_deref()?;
        if field.rust_name.as_deref() == Some(key) {
            return None;
        }
        let child = child_description(field, &rest);
        Some(quote! {
            if head == #key {
                steps.push(::strata::PathStep::new(#key, ::strata::Shape::Struct));
                #child
                return;
            }
        })
    });

    quote! {
        fn describe_path(
            segments: &[&str],
            steps: &mut ::std::vec::Vec<::strata::PathStep>,
        ) {
            let ::core::option::Option::Some((first, #rest)) = segments.split_first() else {
                return;
            };
            let head: &str = first;
            #( #by_rust_name )*
            #( #by_serde_key )*
            steps.push(::strata::PathStep::new(head, ::strata::Shape::Struct));
            ::strata::describe_opaque(#rest, steps);
        }
    }
}

/// Newtypes serialise transparently and delegate to their inner type; other
/// tuple structs serialise as sequences addressed by index.
fn describe_tuple(fields: &[FieldSpec<'_>]) -> TokenStream {
    let rest = format_ident!("rest");
    if let [inner] = fields {
        let child = child_description(inner, &format_ident!("segments"));
        return quote! {
            fn describe_path(
                segments: &[&str],
                steps: &mut ::std::vec::Vec<::strata::PathStep>,
            ) {
                #child
            }
        };
    }
    let arms = fields.iter().filter_map(|field| {
        let key = field.serde_key.as_deref()?;
        let child = child_description(field, &rest);
        Some(quote! {
            if head == #key {
                steps.push(::strata::PathStep::new(#key, ::strata::Shape::Sequence));
                #child
                return;
            }
        })
    });
    quote! {
        fn describe_path(
            segments: &[&str],
            steps: &mut ::std::vec::Vec<::strata::PathStep>,
        ) {
            let ::core::option::Option::Some((first, #rest)) = segments.split_first() else {
                return;
            };
            let head: &str = first;
            #( #arms )*
            steps.push(::strata::PathStep::new(head, ::strata::Shape::Sequence));
            ::strata::describe_opaque(#rest, steps);
        }
    }
}
