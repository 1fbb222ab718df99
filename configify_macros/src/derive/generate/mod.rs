//! Token generation for `#[derive(Configurable)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{ParsedField, ParsedInput};

/// Generate the `Configurable` and `Bindable` impls for a parsed struct.
///
/// `Configurable::fields` lists every non-skipped field in declaration
/// order. `Bindable` makes the struct usable as a nested field, both by
/// value and behind `Option`.
pub(crate) fn configurable_impls(input: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let entries = input
        .fields
        .iter()
        .filter(|field| !field.attrs.skip)
        .map(|field| field_entry(field, krate));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Configurable for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<#krate::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::Bindable for #ident #ty_generics #where_clause {
            fn slot(&mut self) -> #krate::Slot<'_> {
                #krate::Slot::Nested(self)
            }

            fn optional_slot(
                value: &mut ::core::option::Option<Self>,
            ) -> #krate::Slot<'_> {
                #krate::Slot::OptionalNested(
                    value
                        .as_mut()
                        .map(|nested| nested as &mut dyn #krate::Configurable),
                )
            }
        }
    }
}

/// Build the `Field` expression for one struct field.
///
/// Field types without a `Bindable` impl still compile: `SlotOf` falls back
/// to an unsupported slot and the binder skips them. Flattened fields go
/// through `Field::embedded`, which only accepts aggregates.
fn field_entry(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    let member = &field.member;
    let ty = &field.ty;
    let ident = field.ident_name();
    if field.attrs.flatten {
        return quote! {
            #krate::Field::embedded(#ident, &mut self.#member)
        };
    }
    let entry = quote! {
        #krate::Field::new(#ident, #krate::SlotOf::<#ty>::new(&mut self.#member).slot())
    };
    match &field.attrs.name {
        Some(name) => quote! { #entry.renamed(#name) },
        None => entry,
    }
}

/// Require every type parameter to be `Bindable` so its fields can be
/// walked.
fn bounded_generics(generics: &syn::Generics, krate: &TokenStream) -> syn::Generics {
    let mut bounded = generics.clone();
    let params: Vec<syn::Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    if params.is_empty() {
        return bounded;
    }
    let where_clause = bounded.make_where_clause();
    for param in params {
        where_clause
            .predicates
            .push(syn::parse_quote! { #param: #krate::Bindable });
    }
    bounded
}
