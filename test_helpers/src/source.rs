//! A [`Source`] wrapper that records every lookup.
//!
//! Binding tests use it to assert which keys the binder asked for, in which
//! order and through which typed accessor, without caring what the wrapped
//! source answered.
//!
//! # Examples
//!
//! ```
//! use configify::{MapSource, Source};
//! use configify_test_helpers::source::Recording;
//!
//! let source = Recording::new(MapSource::new([("PORT", 80)]));
//! assert_eq!(source.u16("PORT"), Some(80));
//! assert_eq!(source.string("HOST"), None);
//! assert_eq!(source.keys(), ["PORT", "HOST"]);
//! ```

use std::time::Duration;

use configify::{Namespace, Source, Timestamp};
use parking_lot::Mutex;

/// One call made against a [`Recording`] source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Accessor name, such as `"u16"` or `"string_list"`.
    pub accessor: &'static str,
    /// Key exactly as passed in, before any namespace qualification.
    pub key: String,
    /// Whether the wrapped source resolved it.
    pub found: bool,
}

/// Forwards every lookup to `S` and remembers it.
#[derive(Debug, Default)]
pub struct Recording<S> {
    inner: S,
    log: Mutex<Vec<Lookup>>,
}

impl<S: Source> Recording<S> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Every lookup so far, oldest first.
    #[must_use]
    pub fn lookups(&self) -> Vec<Lookup> {
        self.log.lock().clone()
    }

    /// Keys of every lookup so far, oldest first.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.log.lock().iter().map(|l| l.key.clone()).collect()
    }

    /// Keys the wrapped source resolved.
    #[must_use]
    pub fn found_keys(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter(|l| l.found)
            .map(|l| l.key.clone())
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.log.lock().clear();
    }

    /// The wrapped source.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn record<T>(&self, accessor: &'static str, key: &str, value: Option<T>) -> Option<T> {
        self.log.lock().push(Lookup {
            accessor,
            key: key.to_owned(),
            found: value.is_some(),
        });
        value
    }
}

macro_rules! recorded {
    ($($accessor:ident -> $ty:ty),+ $(,)?) => {
        impl<S: Source> Source for Recording<S> {
            fn namespace(&self) -> &Namespace {
                self.inner.namespace()
            }

            $(
                fn $accessor(&self, key: &str) -> Option<$ty> {
                    self.record(stringify!($accessor), key, self.inner.$accessor(key))
                }
            )+
        }
    };
}

recorded! {
    string -> String,
    string_list -> Vec<String>,
    bool -> bool,
    i8 -> i8,
    i16 -> i16,
    i32 -> i32,
    i64 -> i64,
    isize -> isize,
    u8 -> u8,
    u16 -> u16,
    u32 -> u32,
    u64 -> u64,
    usize -> usize,
    f32 -> f32,
    f64 -> f64,
    duration -> Duration,
    timestamp -> Timestamp,
}

#[cfg(test)]
mod tests {
    //! Unit tests for the recording source.

    use super::*;
    use configify::{MapSource, Options};
    use rstest::rstest;

    #[rstest]
    fn records_accessor_key_and_outcome() {
        let source = Recording::new(MapSource::new([("PORT", 80)]));
        let _ = source.u16("PORT");
        let _ = source.duration("TIMEOUT");
        assert_eq!(
            source.lookups(),
            [
                Lookup {
                    accessor: "u16",
                    key: "PORT".into(),
                    found: true
                },
                Lookup {
                    accessor: "duration",
                    key: "TIMEOUT".into(),
                    found: false
                },
            ]
        );
        assert_eq!(source.found_keys(), ["PORT"]);
        source.clear();
        assert!(source.lookups().is_empty());
    }

    #[rstest]
    fn exposes_the_wrapped_namespace() {
        let source = Recording::new(MapSource::with_options(
            Options::namespaced("APP"),
            [("PORT", 1)],
        ));
        assert_eq!(source.namespace().name, "APP");
        assert_eq!(source.inner().len(), 1);
    }
}
