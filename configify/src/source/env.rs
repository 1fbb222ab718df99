//! Process-environment source.

use std::env::{self, VarError};
use std::time::Duration;

use crate::{CoerceError, Namespace, Options, Source, Timestamp, coerce};

/// Reads configuration from environment variables.
///
/// Every key is qualified with the configured namespace before lookup, so
/// with `Options::namespaced("APP")` a request for `PORT` reads `APP_PORT`.
/// Values are trimmed and then coerced with the rules in [`crate::coerce`].
///
/// A variable that is not set at all falls through to
/// [`Options::defaults`] using the *unqualified* key. A variable that is set
/// but cannot be parsed (or is not valid Unicode) resolves to `None` and the
/// fallback is not asked.
///
/// The environment is read on every lookup; nothing is cached.
///
/// # Examples
///
/// ```rust,no_run
/// use configify::{EnvSource, Options, Source};
///
/// let source = EnvSource::new(Options::namespaced("APP"));
/// let port = source.u16("PORT").unwrap_or(8080);
/// # let _ = port;
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    options: Options,
}

enum Lookup {
    Missing,
    Unusable,
    Present(String),
}

impl EnvSource {
    /// Create a source reading the process environment.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }

    /// Settings this source was built with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    fn lookup(&self, key: &str) -> Lookup {
        let qualified = self.options.namespace.qualify(key);
        match env::var(&qualified) {
            Ok(raw) => Lookup::Present(raw.trim().to_owned()),
            Err(VarError::NotPresent) => Lookup::Missing,
            Err(VarError::NotUnicode(_)) => {
                tracing::debug!(key = %qualified, "ignoring non-unicode environment variable");
                Lookup::Unusable
            }
        }
    }

    fn resolve<T>(
        &self,
        key: &str,
        parse: impl FnOnce(&str) -> Result<T, CoerceError>,
        fallback: impl FnOnce(&dyn Source) -> Option<T>,
    ) -> Option<T> {
        match self.lookup(key) {
            Lookup::Missing => fallback(self.options.defaults.as_ref()),
            Lookup::Unusable => None,
            Lookup::Present(raw) => parse(&raw)
                .inspect_err(|err| {
                    tracing::debug!(key, error = %err, "ignoring unparseable environment variable");
                })
                .ok(),
        }
    }
}

impl Source for EnvSource {
    fn namespace(&self) -> &Namespace {
        &self.options.namespace
    }

    fn string(&self, key: &str) -> Option<String> {
        self.resolve(key, |raw| Ok(raw.to_owned()), |d| d.string(key))
    }

    fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.resolve(key, |raw| Ok(coerce::list(raw)), |d| d.string_list(key))
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.resolve(key, coerce::boolean, |d| d.bool(key))
    }

    fn i64(&self, key: &str) -> Option<i64> {
        self.resolve(key, coerce::integer, |d| d.i64(key))
    }

    fn u64(&self, key: &str) -> Option<u64> {
        self.resolve(key, coerce::unsigned, |d| d.u64(key))
    }

    fn f64(&self, key: &str) -> Option<f64> {
        self.resolve(key, coerce::float, |d| d.f64(key))
    }

    fn duration(&self, key: &str) -> Option<Duration> {
        self.resolve(key, coerce::duration, |d| d.duration(key))
    }

    fn timestamp(&self, key: &str) -> Option<Timestamp> {
        self.resolve(key, coerce::timestamp, |d| d.timestamp(key))
    }
}
