//! Parsed representation of a type deriving `Layered`.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Member, Type};

use super::serde_attrs::{SerdeRenameAll, serde_field_attrs, serde_rename_all};

/// Layout of the deriving type's fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Layout {
    Named,
    Tuple,
    Unit,
    Enum,
}

/// A single struct field and how it participates in merging.
pub(crate) struct FieldSpec<'a> {
    pub member: Member,
    pub ty: &'a Type,
    /// Rust field name (without `r#`) for named fields.
    pub rust_name: Option<String>,
    /// Key serde emits for this field, or `None` when it is not serialised
    /// under its own key.
    pub serde_key: Option<String>,
    /// Take the stronger value verbatim instead of recursing.
    pub replace: bool,
}

pub(crate) struct LayeredInput<'a> {
    pub layout: Layout,
    pub fields: Vec<FieldSpec<'a>>,
}

impl<'a> LayeredInput<'a> {
    pub(crate) fn parse(input: &'a DeriveInput) -> syn::Result<Self> {
        reject_container_attrs(input)?;
        let Data::Struct(data) = &input.data else {
            if let Data::Union(data) = &input.data {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "Layered cannot be derived for unions",
                ));
            }
            return Ok(Self {
                layout: Layout::Enum,
                fields: Vec::new(),
            });
        };

        let rename_all = serde_rename_all(&input.attrs)?;
        let layout = match &data.fields {
            Fields::Named(_) => Layout::Named,
            Fields::Unnamed(_) => Layout::Tuple,
            Fields::Unit => Layout::Unit,
        };
        let fields = data
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| parse_field(index, field, rename_all))
            .collect::<syn::Result<Vec<_>>>()?;
        Ok(Self { layout, fields })
    }
}

fn parse_field(
    index: usize,
    field: &Field,
    rename_all: Option<SerdeRenameAll>,
) -> syn::Result<FieldSpec<'_>> {
    let replace = parse_layered_field_attrs(field)?;
    let serde = serde_field_attrs(&field.attrs)?;
    let (member, rust_name) = field.ident.as_ref().map_or_else(
        || (Member::from(index), None),
        |ident| {
            let name = ident.unraw().to_string();
            (Member::Named(ident.clone()), Some(name))
        },
    );
    let serde_key = if serde.skipped || serde.flattened {
        None
    } else if let Some(rename) = serde.rename {
        Some(rename)
    } else {
        Some(rust_name.as_deref().map_or_else(
            || index.to_string(),
            |name| rename_all.map_or_else(|| name.to_owned(), |rule| rule.apply(name)),
        ))
    };
    Ok(FieldSpec {
        member,
        ty: &field.ty,
        rust_name,
        serde_key,
        replace,
    })
}

fn parse_layered_field_attrs(field: &Field) -> syn::Result<bool> {
    let mut replace = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("layered")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("replace") {
                replace = true;
                Ok(())
            } else {
                Err(meta.error("unsupported layered attribute; expected `replace`"))
            }
        })?;
    }
    Ok(replace)
}

fn reject_container_attrs(input: &DeriveInput) -> syn::Result<()> {
    input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("layered"))
        .map_or(Ok(()), |attr| {
            Err(syn::Error::new_spanned(
                attr,
                "#[layered(...)] is only supported on fields",
            ))
        })
}
