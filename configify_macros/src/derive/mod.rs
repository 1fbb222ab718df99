//! Expansion of `#[derive(Configurable)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
pub(crate) mod generate;
pub(crate) mod parse;

/// Parse `input` and produce the trait impls, or the first error found.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::configurable_impls(&parsed, &krate))
}
