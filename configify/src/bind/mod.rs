//! Overlaying source values onto [`Configurable`] structs.

use std::any::type_name;

use crate::Source;

mod field;

pub use field::{Bindable, Configurable, Field, NoSlot, Overlay, Slot, SlotOf, ValueKind};

/// Writes values from a [`Source`] into the fields of a struct.
///
/// For every field the binder derives a key from the field name (see
/// [`resolve_name`](crate::resolve_name)), joins it onto the path of the
/// enclosing aggregates and asks the source for a value of the field's type.
/// Fields the source resolves are overwritten; everything else keeps the
/// value the caller initialised it with, so pre-populated defaults survive.
///
/// Binding never fails. A key that is missing and a key whose value cannot
/// be parsed look the same: the field is left alone.
///
/// A binder holds no per-call state and may be shared across threads when
/// its source can.
///
/// # Examples
///
/// ```rust
/// use configify::{Binder, Configurable, MapSource, Options};
///
/// #[derive(Configurable)]
/// struct Http {
///     port: u16,
/// }
///
/// #[derive(Configurable)]
/// struct Service {
///     name: String,
///     http: Http,
/// }
///
/// let source = MapSource::with_options(
///     Options::namespaced("FOO"),
///     [("HTTP_PORT", "8443")],
/// );
/// let mut service = Service {
///     name: "billing".into(),
///     http: Http { port: 80 },
/// };
/// Binder::new(source).bind(&mut service);
///
/// assert_eq!(service.name, "billing");
/// assert_eq!(service.http.port, 8443);
/// ```
#[derive(Debug, Clone)]
pub struct Binder<S> {
    source: Option<S>,
}

impl<S> Default for Binder<S> {
    fn default() -> Self {
        Self { source: None }
    }
}

impl<S: Source> Binder<S> {
    /// Create a binder reading from `source`.
    ///
    /// Passing `None` builds a binder whose [`bind`](Self::bind) leaves every
    /// target untouched.
    #[must_use]
    pub fn new(source: impl Into<Option<S>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The source values are read from, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Overlay every resolvable field of `target` with values from the
    /// source.
    pub fn bind<T: Configurable>(&self, target: &mut T) {
        let Some(source) = self.source.as_ref() else {
            tracing::debug!(target_type = type_name::<T>(), "no source configured; skipping bind");
            return;
        };
        tracing::debug!(target_type = type_name::<T>(), "binding configuration");
        let overwritten = bind_at(source, target, "");
        tracing::debug!(target_type = type_name::<T>(), overwritten, "bound configuration");
    }
}

/// Walk `target`'s fields, looking each up under `prefix`.
///
/// Returns how many leaves were overwritten.
fn bind_at(source: &dyn Source, target: &mut dyn Configurable, prefix: &str) -> usize {
    let mut overwritten = 0;
    for field in target.fields() {
        let name = field.name();
        let key = source.namespace().join([prefix, name.as_ref()]);
        let child_prefix = if field.is_flattened() { prefix } else { key.as_str() };
        match field.into_slot() {
            Slot::Value(leaf) => {
                let found = leaf.overlay(source, &key);
                tracing::trace!(%key, kind = ?leaf.kind(), found, "resolved field");
                overwritten += usize::from(found);
            }
            Slot::Nested(nested) => overwritten += bind_at(source, nested, child_prefix),
            Slot::OptionalNested(Some(nested)) => {
                overwritten += bind_at(source, nested, child_prefix);
            }
            Slot::OptionalNested(None) => leave_absent(&key),
            Slot::Unsupported => tracing::trace!(%key, "skipping unsupported field"),
        }
    }
    overwritten
}

/// Absent optional aggregates stay absent: binding never allocates one, even
/// when keys for its fields exist.
fn leave_absent(key: &str) {
    tracing::trace!(key, "leaving absent optional aggregate untouched");
}
