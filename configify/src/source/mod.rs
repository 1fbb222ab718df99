//! The [`Source`] contract and its built-in implementations.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use crate::{Namespace, Timestamp, coerce};

mod empty;
mod env;
mod map;

pub use empty::Empty;
pub use env::EnvSource;
pub use map::{MapSource, Value};

static UNNAMED: Namespace = Namespace::unnamed();

/// A read-only provider of typed configuration values keyed by string.
///
/// Every accessor returns `None` when the key is missing *or* when the
/// stored value cannot be represented as the requested type; callers cannot
/// tell the two apart. Lookups must be idempotent for the lifetime of a
/// [`Binder::bind`](crate::Binder::bind) call.
///
/// Implementors provide the 64-bit and non-numeric accessors; the narrower
/// integer widths and `f32` are derived from them, treating out-of-range
/// values as missing.
pub trait Source {
    /// Namespace used to qualify keys. Its delimiter also joins nested
    /// field paths during binding.
    fn namespace(&self) -> &Namespace {
        &UNNAMED
    }

    /// Look up a string.
    fn string(&self, key: &str) -> Option<String>;

    /// Look up a list of strings. A present but empty value yields an empty
    /// list rather than `None`.
    fn string_list(&self, key: &str) -> Option<Vec<String>>;

    /// Look up a boolean.
    fn bool(&self, key: &str) -> Option<bool>;

    /// Look up a signed 64-bit integer.
    fn i64(&self, key: &str) -> Option<i64>;

    /// Look up an unsigned 64-bit integer.
    fn u64(&self, key: &str) -> Option<u64>;

    /// Look up a double precision float.
    fn f64(&self, key: &str) -> Option<f64>;

    /// Look up a duration.
    fn duration(&self, key: &str) -> Option<Duration>;

    /// Look up an absolute timestamp.
    fn timestamp(&self, key: &str) -> Option<Timestamp>;

    /// Look up an `i8`.
    fn i8(&self, key: &str) -> Option<i8> {
        narrowed(key, self.i64(key))
    }

    /// Look up an `i16`.
    fn i16(&self, key: &str) -> Option<i16> {
        narrowed(key, self.i64(key))
    }

    /// Look up an `i32`.
    fn i32(&self, key: &str) -> Option<i32> {
        narrowed(key, self.i64(key))
    }

    /// Look up an `isize`.
    fn isize(&self, key: &str) -> Option<isize> {
        narrowed(key, self.i64(key))
    }

    /// Look up a `u8`.
    fn u8(&self, key: &str) -> Option<u8> {
        narrowed(key, self.u64(key))
    }

    /// Look up a `u16`.
    fn u16(&self, key: &str) -> Option<u16> {
        narrowed(key, self.u64(key))
    }

    /// Look up a `u32`.
    fn u32(&self, key: &str) -> Option<u32> {
        narrowed(key, self.u64(key))
    }

    /// Look up a `usize`.
    fn usize(&self, key: &str) -> Option<usize> {
        narrowed(key, self.u64(key))
    }

    /// Look up an `f32`. Values beyond `f32` range become infinite.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing to single precision is the point of this accessor"
    )]
    fn f32(&self, key: &str) -> Option<f32> {
        self.f64(key).map(|value| value as f32)
    }
}

/// Callback registered with [`Watch::watch`].
pub type WatchCallback = Box<dyn Fn(&dyn Source) + Send + Sync>;

/// A [`Source`] whose backing store can change while the program runs.
///
/// After each detected change the source calls every registered callback
/// with itself, usually so the caller can re-bind a struct or rebuild a
/// component from the new values. None of the built-in sources change, so
/// none implement this.
pub trait Watch: Source {
    /// Run `callback` after every change from now on.
    fn watch(&self, callback: WatchCallback);
}

fn narrowed<T, W>(key: &str, value: Option<W>) -> Option<T>
where
    T: TryFrom<W>,
    W: Copy + Display,
{
    coerce::narrow(value?)
        .inspect_err(|err| tracing::debug!(key, error = %err, "ignoring out-of-range value"))
        .ok()
}

macro_rules! forward_source {
    ($($wrapper:ty),+ $(,)?) => {$(
        impl<S: Source + ?Sized> Source for $wrapper {
            fn namespace(&self) -> &Namespace {
                (**self).namespace()
            }
            fn string(&self, key: &str) -> Option<String> {
                (**self).string(key)
            }
            fn string_list(&self, key: &str) -> Option<Vec<String>> {
                (**self).string_list(key)
            }
            fn bool(&self, key: &str) -> Option<bool> {
                (**self).bool(key)
            }
            fn i64(&self, key: &str) -> Option<i64> {
                (**self).i64(key)
            }
            fn u64(&self, key: &str) -> Option<u64> {
                (**self).u64(key)
            }
            fn f64(&self, key: &str) -> Option<f64> {
                (**self).f64(key)
            }
            fn duration(&self, key: &str) -> Option<Duration> {
                (**self).duration(key)
            }
            fn timestamp(&self, key: &str) -> Option<Timestamp> {
                (**self).timestamp(key)
            }
            fn i8(&self, key: &str) -> Option<i8> {
                (**self).i8(key)
            }
            fn i16(&self, key: &str) -> Option<i16> {
                (**self).i16(key)
            }
            fn i32(&self, key: &str) -> Option<i32> {
                (**self).i32(key)
            }
            fn isize(&self, key: &str) -> Option<isize> {
                (**self).isize(key)
            }
            fn u8(&self, key: &str) -> Option<u8> {
                (**self).u8(key)
            }
            fn u16(&self, key: &str) -> Option<u16> {
                (**self).u16(key)
            }
            fn u32(&self, key: &str) -> Option<u32> {
                (**self).u32(key)
            }
            fn usize(&self, key: &str) -> Option<usize> {
                (**self).usize(key)
            }
            fn f32(&self, key: &str) -> Option<f32> {
                (**self).f32(key)
            }
        }
    )+};
}

forward_source!(&S, Box<S>, Arc<S>);
