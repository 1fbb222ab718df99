//! Crate path resolution for dependency aliasing support.
//!
//! Generated code names runtime items as `::configify::...`. A crate that
//! depends on `configify` under another name sets `#[conf(crate = "...")]`
//! and the path given there is used instead.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the path generated code uses to reach the runtime crate.
///
/// Defaults to the absolute `::configify`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::configify }, |path| quote! { #path })
}
