//! Settings shared by every built-in source.

use std::fmt;
use std::sync::Arc;

use crate::{Empty, Namespace, Source};

/// Construction settings for [`EnvSource`](crate::EnvSource) and
/// [`MapSource`](crate::MapSource).
///
/// | field       | default                               |
/// |-------------|---------------------------------------|
/// | `namespace` | no prefix, `"_"` delimiter            |
/// | `defaults`  | [`Empty`], which never resolves a key |
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use configify::{MapSource, Namespace, Options, Value};
///
/// let options = Options {
///     namespace: Namespace::named("HELLO"),
///     defaults: Arc::new(MapSource::new([("PORT", Value::from(9999))])),
/// };
/// assert_eq!(options.namespace.qualify("PORT"), "HELLO_PORT");
/// ```
#[derive(Clone)]
pub struct Options {
    /// Prefix and delimiter applied to every lookup.
    pub namespace: Namespace,
    /// Fallback consulted when the primary store has no entry for a key.
    ///
    /// A present value that fails to parse is *not* a miss: the fallback is
    /// only asked about keys the primary store does not contain at all.
    pub defaults: Arc<dyn Source + Send + Sync>,
}

impl Options {
    /// Options using `name` as the namespace and no fallback.
    #[must_use]
    pub fn namespaced(name: impl Into<String>) -> Self {
        Self::default().with_namespace(Namespace::named(name))
    }

    /// Replace the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Replace only the namespace delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.namespace.delimiter = delimiter.into();
        self
    }

    /// Replace the fallback source.
    #[must_use]
    pub fn with_defaults<S>(mut self, defaults: S) -> Self
    where
        S: Source + Send + Sync + 'static,
    {
        self.defaults = Arc::new(defaults);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: Namespace::unnamed(),
            defaults: Arc::new(Empty),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("namespace", &self.namespace)
            .field("defaults", &"<source>")
            .finish()
    }
}
