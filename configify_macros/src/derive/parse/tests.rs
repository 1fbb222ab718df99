//! Tests for `#[conf(...)]` parsing behaviour.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

#[rstest]
fn parses_struct_and_field_attributes() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[conf(crate = "my_conf")]
        struct Demo {
            #[conf(name = "DUDE")]
            renamed: Inner,
            #[conf(flatten)]
            embedded: Base,
            #[conf(skip)]
            handle: Handle,
            plain: u16,
        }
    };

    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.ident == "Demo", "expected Demo ident");
    ensure!(parsed.fields.len() == 4, "every field is kept for generation");
    ensure!(
        parsed.struct_attrs.crate_path.is_some(),
        "crate override not recorded"
    );

    let [renamed, embedded, handle, plain] = parsed.fields.as_slice() else {
        return Err(anyhow!("unexpected field count"));
    };
    ensure!(renamed.attrs.name.as_ref().map(LitStr::value).as_deref() == Some("DUDE"));
    ensure!(embedded.attrs.flatten && !embedded.attrs.skip);
    ensure!(handle.attrs.skip);
    ensure!(plain.attrs.name.is_none() && !plain.attrs.flatten && !plain.attrs.skip);
    Ok(())
}

#[rstest]
fn unknown_keys_are_ignored() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[conf(future = "thing", other(a, b))]
        struct Demo {
            #[conf(validate = "range(1..10)", hint(port), name = "PORT")]
            port: u16,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let field = parsed.fields.first().ok_or_else(|| anyhow!("missing field"))?;
    ensure!(field.attrs.name.as_ref().map(LitStr::value).as_deref() == Some("PORT"));
    Ok(())
}

#[rstest]
fn attributes_accumulate_across_lists() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[conf(skip)]
            #[conf(name = "X")]
            field: u8,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let field = parsed.fields.first().ok_or_else(|| anyhow!("missing field"))?;
    ensure!(field.attrs.skip && field.attrs.name.is_some());
    Ok(())
}

#[rstest]
fn raw_identifiers_are_unrawed() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            r#type: String,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let field = parsed.fields.first().ok_or_else(|| anyhow!("missing field"))?;
    ensure!(field.ident_name() == "type", "got {}", field.ident_name());
    Ok(())
}

#[rstest]
#[case::tuple(parse_quote! { struct Demo(u8); }, "Configurable requires named fields")]
#[case::unit(parse_quote! { struct Demo; }, "Configurable requires named fields")]
#[case::enumeration(
    parse_quote! { enum Demo { A } },
    "Configurable can only be derived for structs"
)]
#[case::non_string_name(
    parse_quote! { struct Demo { #[conf(name = 5)] port: u16 } },
    "name must be a string"
)]
#[case::bad_crate_path(
    parse_quote! { #[conf(crate = "not a path")] struct Demo { port: u16 } },
    "expected"
)]
#[case::renamed_flatten(
    parse_quote! { struct Demo { #[conf(flatten, name = "X")] base: Base } },
    "`name` has no effect on a `flatten` field"
)]
fn rejects_malformed_input(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("input should be rejected"));
    };
    ensure!(
        err.to_string().contains(message),
        "unexpected error: {err}"
    );
    Ok(())
}
