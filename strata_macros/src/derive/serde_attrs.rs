//! Serialised key names recovered from serde attributes.
//!
//! Dot paths resolve against the serde projection of a snapshot, so the
//! derive needs the key serde emits for each field. Only the serialising
//! side of `rename` and `rename_all` matters here.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token, parenthesized};

/// A container-level `rename_all` rule.
#[derive(Clone, Copy)]
pub(crate) struct SerdeRenameAll(fn(&str) -> String);

const RENAME_RULES: [(&str, fn(&str) -> String); 8] = [
    ("lowercase", str::to_ascii_lowercase),
    ("UPPERCASE", str::to_ascii_uppercase),
    ("PascalCase", <str as ToUpperCamelCase>::to_upper_camel_case),
    ("camelCase", <str as ToLowerCamelCase>::to_lower_camel_case),
    ("snake_case", <str as ToSnakeCase>::to_snake_case),
    ("SCREAMING_SNAKE_CASE", <str as ToShoutySnakeCase>::to_shouty_snake_case),
    ("kebab-case", <str as ToKebabCase>::to_kebab_case),
    ("SCREAMING-KEBAB-CASE", <str as ToShoutyKebabCase>::to_shouty_kebab_case),
];

impl SerdeRenameAll {
    fn from_literal(value: &LitStr) -> syn::Result<Self> {
        let requested = value.value();
        RENAME_RULES
            .iter()
            .find(|(name, _)| *name == requested)
            .map(|(_, rule)| Self(*rule))
            .ok_or_else(|| {
                let known: Vec<&str> = RENAME_RULES.iter().map(|(name, _)| *name).collect();
                syn::Error::new(
                    value.span(),
                    format!(
                        "unsupported serde rename_all value '{requested}'; expected one of {}",
                        known.join(", ")
                    ),
                )
            })
    }

    pub(crate) fn apply(self, field_name: &str) -> String {
        (self.0)(field_name)
    }
}

/// Serde settings of a single field that affect its serialised key.
#[derive(Debug, Default)]
pub(crate) struct SerdeFieldAttrs {
    pub rename: Option<String>,
    pub skipped: bool,
    pub flattened: bool,
}

/// The container's `rename_all` rule, if it sets one for serialisation.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut rule = None;
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename_all") {
                return skip_value(&meta);
            }
            if let Some(value) = serialize_literal(&meta)? {
                rule = Some(SerdeRenameAll::from_literal(&value)?);
            }
            Ok(())
        })?;
    }
    Ok(rule)
}

/// The serde attributes of one field.
pub(crate) fn serde_field_attrs(attrs: &[Attribute]) -> syn::Result<SerdeFieldAttrs> {
    let mut field = SerdeFieldAttrs::default();
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            let path = &meta.path;
            if path.is_ident("skip") || path.is_ident("skip_serializing") {
                field.skipped = true;
                Ok(())
            } else if path.is_ident("flatten") {
                field.flattened = true;
                Ok(())
            } else if path.is_ident("rename") {
                if let Some(value) = serialize_literal(&meta)? {
                    field.rename = Some(value.value());
                }
                Ok(())
            } else {
                skip_value(&meta)
            }
        })?;
    }
    Ok(field)
}

/// Read `key = "..."` or the `serialize` half of `key(serialize = "...")`.
fn serialize_literal(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }
    let mut found = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            found = Some(nested.value()?.parse()?);
            Ok(())
        } else {
            skip_value(&nested)
        }
    })?;
    Ok(found)
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Consume the value of a nested item this derive does not interpret.
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}
