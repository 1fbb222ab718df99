//! Input parsing for the `Configurable` derive macro.
//!
//! This module gathers the struct identifier, generics, fields and attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A named field and its `#[conf(...)]` metadata.
pub(crate) struct ParsedField {
    /// Field identifier as written, used to access the field.
    pub member: syn::Ident,
    /// The field type.
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

impl ParsedField {
    /// The identifier without any `r#` prefix, as fed to name resolution.
    pub(crate) fn ident_name(&self) -> String {
        self.member.unraw().to_string()
    }
}

/// Everything the generator needs from the user's struct.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

/// Gathers information from the user-provided struct.
///
/// Enums, unions, tuple structs and unit structs are rejected: binding
/// derives keys from field names, so only named fields make sense.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configurable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Configurable can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(member) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        fields.push(ParsedField {
            member,
            ty: field.ty.clone(),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }

    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        fields,
    })
}
