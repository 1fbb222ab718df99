//! Unit tests for derive expansion as a whole.

use crate::derive::expand;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

#[rstest]
fn expands_with_crate_override() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[conf(crate = "renamed_conf")]
        struct Demo {
            port: u16,
        }
    };
    let output = expand(&input).map_err(|err| anyhow!(err))?.to_string();
    ensure!(
        output.contains("renamed_conf :: Field :: new (\"port\""),
        "unexpected expansion: {output}"
    );
    Ok(())
}

#[rstest]
fn errors_point_at_the_offending_tokens() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo(u8);
    };
    let Err(err) = expand(&input) else {
        return Err(anyhow!("tuple structs should be rejected"));
    };
    let rendered = err.into_compile_error().to_string();
    ensure!(
        rendered.contains("compile_error"),
        "expected a compile_error! invocation: {rendered}"
    );
    Ok(())
}
