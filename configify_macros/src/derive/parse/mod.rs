//! Parsing of `#[derive(Configurable)]` input and `#[conf(...)]` attributes.

use syn::parenthesized;
use syn::{Attribute, LitStr, Token};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::{ParsedField, ParsedInput, parse_input};
use literals::lit_str;

/// Struct-level `#[conf(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[conf(crate = "my_alias")]`, generated code references
    /// types through `my_alias::` instead of `::configify::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Configurable)]`.
///
/// - `name` replaces the derived lookup name verbatim.
/// - `flatten` binds a nested aggregate at its parent's level.
/// - `skip` leaves the field out of the generated table.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub name: Option<LitStr>,
    pub flatten: bool,
    pub skip: bool,
}

/// Iterate all `#[conf(...)]` attributes once and apply a callback.
fn parse_conf<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("conf")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Skips an unrecognised `key = expr` or `key(...)` entry, leaving the
/// rest of the list for the caller.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let inner;
        parenthesized!(inner in meta.input);
        inner.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[conf(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised. Unknown keys are ignored so callers keep
/// compiling when new attributes appear, at the cost of accepting typos.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_conf(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[conf(...)]` attributes.
///
/// Recognised keys are `name`, `flatten` and `skip`. Unknown keys are
/// ignored, matching [`parse_struct_attrs`]. Giving a flattened field a
/// `name` is rejected because a flattened field contributes no key segment
/// for the name to replace.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_conf(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => {
                out.name = Some(lit_str(meta, "name")?);
                Ok(())
            }
            Some("flatten") => {
                out.flatten = true;
                Ok(())
            }
            Some("skip") => {
                out.skip = true;
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    if let (true, Some(name)) = (out.flatten, out.name.as_ref()) {
        return Err(syn::Error::new(
            name.span(),
            "`name` has no effect on a `flatten` field",
        ));
    }
    Ok(out)
}
