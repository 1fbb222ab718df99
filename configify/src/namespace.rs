//! Key composition for namespaced lookups.
//!
//! A namespace is a fixed prefix applied to every key a source resolves, so
//! components sharing one backing store (the process environment, usually)
//! do not trample each other: `PORT` in the `HTTP` namespace is looked up as
//! `HTTP_PORT`.

/// Delimiter used when a namespace does not configure its own.
pub const DEFAULT_DELIMITER: &str = "_";

/// Prefix and delimiter applied to every key a source resolves.
///
/// Both fields default to the empty string, which means "no prefix" and
/// [`DEFAULT_DELIMITER`] respectively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix segment placed before every key. Empty disables qualification.
    pub name: String,
    /// Separator placed between segments. Blank falls back to `"_"`.
    pub delimiter: String,
}

impl Namespace {
    /// A namespace with no prefix and the default delimiter.
    #[must_use]
    pub const fn unnamed() -> Self {
        Self {
            name: String::new(),
            delimiter: String::new(),
        }
    }

    /// A namespace called `name` using the default delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use configify::Namespace;
    ///
    /// assert_eq!(Namespace::named("HTTP").qualify("PORT"), "HTTP_PORT");
    /// ```
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delimiter: String::new(),
        }
    }

    /// Replace the delimiter used to join segments.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// The delimiter actually used when joining, after trimming.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        match self.delimiter.trim() {
            "" => DEFAULT_DELIMITER,
            delimiter => delimiter,
        }
    }

    /// Turn an unqualified key such as `PORT` into `HTTP_PORT`.
    ///
    /// Keys pass through untouched when the namespace has no name.
    #[must_use]
    pub fn qualify(&self, key: &str) -> String {
        if self.name.is_empty() {
            return key.to_owned();
        }
        self.join([self.name.as_str(), key])
    }

    /// Join `segments` with the delimiter, skipping blank segments.
    ///
    /// Each segment is trimmed first, so the result never carries leading,
    /// trailing or doubled delimiters. The namespace name is *not* added;
    /// use [`Namespace::qualify`] for that.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use configify::Namespace;
    ///
    /// let ns = Namespace::named("APP").with_delimiter(".");
    /// assert_eq!(ns.join(["", " http ", "", "port"]), "http.port");
    /// ```
    #[must_use]
    pub fn join<I, S>(&self, segments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let delimiter = self.delimiter();
        let mut joined = String::new();
        for raw in segments {
            let segment = raw.as_ref().trim();
            if segment.is_empty() {
                continue;
            }
            if !joined.is_empty() {
                joined.push_str(delimiter);
            }
            joined.push_str(segment);
        }
        joined
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for segment joining and qualification.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(&[], "")]
    #[case::all_blank(&["", "  ", ""], "")]
    #[case::single(&["PORT"], "PORT")]
    #[case::pair(&["HTTP", "PORT"], "HTTP_PORT")]
    #[case::leading_blank(&["", "HTTP", "PORT"], "HTTP_PORT")]
    #[case::trailing_blank(&["HTTP", "PORT", ""], "HTTP_PORT")]
    #[case::inner_blank(&["HTTP", " ", "PORT"], "HTTP_PORT")]
    #[case::trims(&[" HTTP ", "\tPORT"], "HTTP_PORT")]
    fn join_elides_blank_segments(#[case] segments: &[&str], #[case] expected: &str) {
        assert_eq!(Namespace::unnamed().join(segments), expected);
    }

    #[rstest]
    #[case::empty("", "_")]
    #[case::blank("   ", "_")]
    #[case::dot(".", ".")]
    #[case::padded(" :: ", "::")]
    fn delimiter_defaults_when_blank(#[case] configured: &str, #[case] expected: &str) {
        let ns = Namespace::named("APP").with_delimiter(configured);
        assert_eq!(ns.delimiter(), expected);
    }

    #[rstest]
    fn custom_delimiter_joins_segments() {
        let ns = Namespace::named("APP").with_delimiter(".");
        assert_eq!(ns.join(["http", "port"]), "http.port");
        assert_eq!(ns.qualify("http.port"), "APP.http.port");
    }

    #[rstest]
    #[case::unnamed(Namespace::unnamed(), "PORT", "PORT")]
    #[case::named(Namespace::named("HTTP"), "PORT", "HTTP_PORT")]
    #[case::named_blank_key(Namespace::named("HTTP"), "", "HTTP")]
    #[case::unnamed_keeps_padding(Namespace::unnamed(), " PORT ", " PORT ")]
    fn qualify_prefixes_named_namespaces(
        #[case] ns: Namespace,
        #[case] key: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(ns.qualify(key), expected);
    }
}
