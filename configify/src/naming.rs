//! Field name resolution.
//!
//! Keys are derived from field identifiers unless the field carries an
//! explicit `#[conf(name = "...")]` override.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and is covered by unit tests"
)]
static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(.)([A-Z][a-z]+)").expect("valid capitalised-word pattern"));

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and is covered by unit tests"
)]
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("valid case-boundary pattern"));

/// Convert an identifier to `UPPER_SNAKE_CASE`.
///
/// Two boundary passes run before upper-casing: the first splits before any
/// capitalised word that follows another character, the second splits
/// between a lowercase letter or digit and the uppercase letter after it.
/// Runs of capitals are not treated as acronyms beyond what those two passes
/// produce. A leading `r#` (raw identifier) is ignored.
///
/// # Examples
///
/// ```rust
/// use configify::upper_snake;
///
/// assert_eq!(upper_snake("FirstName"), "FIRST_NAME");
/// assert_eq!(upper_snake("first_name"), "FIRST_NAME");
/// assert_eq!(upper_snake("HTTPHost"), "HTTP_HOST");
/// assert_eq!(upper_snake("ID"), "ID");
/// ```
#[must_use]
pub fn upper_snake(ident: &str) -> String {
    let bare = ident.strip_prefix("r#").unwrap_or(ident);
    let words = FIRST_CAP.replace_all(bare, "${1}_${2}");
    ALL_CAP.replace_all(&words, "${1}_${2}").to_uppercase()
}

/// Resolve the unqualified lookup name for a field.
///
/// A non-empty `rename` wins verbatim; otherwise the identifier is converted
/// with [`upper_snake`].
#[must_use]
pub fn resolve_name<'a>(ident: &str, rename: Option<&'a str>) -> Cow<'a, str> {
    match rename {
        Some(name) if !name.is_empty() => Cow::Borrowed(name),
        _ => Cow::Owned(upper_snake(ident)),
    }
}
