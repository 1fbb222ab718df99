//! Procedural macros for `configify`.
//!
//! The [`Configurable`] derive writes the field table the binder walks, so a
//! plain struct of named fields can be overlaid from any `configify::Source`
//! without runtime reflection.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `configify::Configurable` and `configify::Bindable` for a struct
/// with named fields.
///
/// Field attributes, all under `#[conf(...)]`:
///
/// - `name = "KEY"` looks the field up under `KEY` verbatim instead of the
///   upper snake case form of its identifier.
/// - `flatten` merges a nested aggregate's fields into the parent's key
///   space.
/// - `skip` leaves the field out of binding entirely; its type need not be
///   bindable.
///
/// The struct attribute `#[conf(crate = "path")]` points generated code at a
/// renamed `configify` dependency. Unknown keys are ignored.
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(configify::Configurable)]
/// struct Database {
///     #[conf(name = "DATABASE_URL")]
///     url: String,
///     pool_size: u32,
///     #[conf(skip)]
///     pool: Option<Pool>,
/// }
/// ```
#[proc_macro_derive(Configurable, attributes(conf))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[cfg(test)]
mod tests;
