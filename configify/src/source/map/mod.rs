//! An in-memory source backed by a fixed table of values.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::{CoerceError, Namespace, Options, Source, Timestamp, coerce};

/// A single configuration value held by a [`MapSource`].
///
/// Typed variants answer lookups for their own type. Integers convert
/// between widths and signedness when the value fits. [`Value::Str`]
/// entries are coerced with the same rules the environment uses, so a map
/// of strings behaves exactly like the equivalent environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw text, trimmed on lookup and coerced on demand.
    Str(String),
    /// A list of strings.
    List(Vec<String>),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// An interval.
    Duration(Duration),
    /// An absolute point in time.
    Timestamp(Timestamp),
}

impl Value {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Int(_) => "integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Duration(_) => "duration",
            Self::Timestamp(_) => "timestamp",
        }
    }

    const fn mismatch(&self, expected: &'static str) -> CoerceError {
        CoerceError::Mismatch {
            expected,
            found: self.type_name(),
        }
    }

    fn to_string_value(&self) -> Result<String, CoerceError> {
        match self {
            Self::Str(raw) => Ok(raw.trim().to_owned()),
            other => Err(other.mismatch("string")),
        }
    }

    fn to_list(&self) -> Result<Vec<String>, CoerceError> {
        match self {
            Self::List(items) => Ok(items.clone()),
            Self::Str(raw) => Ok(coerce::list(raw.trim())),
            other => Err(other.mismatch("list")),
        }
    }

    fn to_bool(&self) -> Result<bool, CoerceError> {
        match self {
            Self::Bool(flag) => Ok(*flag),
            Self::Str(raw) => coerce::boolean(raw.trim()),
            other => Err(other.mismatch("bool")),
        }
    }

    fn to_i64(&self) -> Result<i64, CoerceError> {
        match self {
            Self::Int(number) => Ok(*number),
            Self::Uint(number) => coerce::narrow(*number),
            Self::Str(raw) => coerce::integer(raw.trim()),
            other => Err(other.mismatch("integer")),
        }
    }

    fn to_u64(&self) -> Result<u64, CoerceError> {
        match self {
            Self::Uint(number) => Ok(*number),
            Self::Int(number) => coerce::narrow(*number),
            Self::Str(raw) => coerce::unsigned(raw.trim()),
            other => Err(other.mismatch("unsigned integer")),
        }
    }

    fn to_f64(&self) -> Result<f64, CoerceError> {
        match self {
            Self::Float(number) => Ok(*number),
            Self::Str(raw) => coerce::float(raw.trim()),
            other => Err(other.mismatch("float")),
        }
    }

    fn to_duration(&self) -> Result<Duration, CoerceError> {
        match self {
            Self::Duration(interval) => Ok(*interval),
            Self::Str(raw) => coerce::duration(raw.trim()),
            other => Err(other.mismatch("duration")),
        }
    }

    fn to_timestamp(&self) -> Result<Timestamp, CoerceError> {
        match self {
            Self::Timestamp(instant) => Ok(*instant),
            Self::Str(raw) => coerce::timestamp(raw.trim()),
            other => Err(other.mismatch("timestamp")),
        }
    }
}

macro_rules! value_from {
    ($variant:ident: $($source:ty),+) => {$(
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Self::$variant(value.into())
            }
        }
    )+};
}

value_from!(Str: &str, String);
value_from!(Int: i8, i16, i32, i64);
value_from!(Uint: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(Bool: bool);
value_from!(Duration: Duration);
value_from!(Timestamp: Timestamp);

impl From<chrono::DateTime<Utc>> for Value {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self::Timestamp(value.fixed_offset())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

/// A source answering from a fixed key/value table.
///
/// Useful on its own for tests and embedded defaults, and as the
/// [`Options::defaults`] fallback of another source. Keys are qualified with
/// the configured namespace both when the table is built and when it is
/// queried, so `MapSource::with_options(Options::namespaced("APP"), [("PORT",
/// ...)])` answers `port` lookups the same way an `APP`-namespaced
/// environment would.
///
/// # Examples
///
/// ```rust
/// use configify::{MapSource, Source, Value};
///
/// let source = MapSource::new([
///     ("HOST", Value::from("localhost")),
///     ("PORT", Value::from(1234)),
/// ]);
/// assert_eq!(source.string("HOST").as_deref(), Some("localhost"));
/// assert_eq!(source.u16("PORT"), Some(1234));
/// assert_eq!(source.string("PORT"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    options: Options,
    values: HashMap<String, Value>,
}

impl MapSource {
    /// Build an un-namespaced source with no fallback.
    #[must_use]
    pub fn new<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::with_options(Options::default(), values)
    }

    /// Build a source using `options` for namespacing and fallback.
    #[must_use]
    pub fn with_options<I, K, V>(options: Options, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let table = values
            .into_iter()
            .map(|(key, value)| (options.namespace.qualify(&key.into()), value.into()))
            .collect();
        Self {
            options,
            values: table,
        }
    }

    /// Settings this source was built with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw entry for an unqualified `key`, without coercion or fallback.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&self.options.namespace.qualify(key))
    }

    fn resolve<T>(
        &self,
        key: &str,
        convert: impl FnOnce(&Value) -> Result<T, CoerceError>,
        fallback: impl FnOnce(&dyn Source) -> Option<T>,
    ) -> Option<T> {
        let Some(value) = self.get(key) else {
            return fallback(self.options.defaults.as_ref());
        };
        convert(value)
            .inspect_err(|err| tracing::debug!(key, error = %err, "ignoring unusable map value"))
            .ok()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Source for MapSource {
    fn namespace(&self) -> &Namespace {
        &self.options.namespace
    }

    fn string(&self, key: &str) -> Option<String> {
        self.resolve(key, Value::to_string_value, |d| d.string(key))
    }

    fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.resolve(key, Value::to_list, |d| d.string_list(key))
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.resolve(key, Value::to_bool, |d| d.bool(key))
    }

    fn i64(&self, key: &str) -> Option<i64> {
        self.resolve(key, Value::to_i64, |d| d.i64(key))
    }

    fn u64(&self, key: &str) -> Option<u64> {
        self.resolve(key, Value::to_u64, |d| d.u64(key))
    }

    fn f64(&self, key: &str) -> Option<f64> {
        self.resolve(key, Value::to_f64, |d| d.f64(key))
    }

    fn duration(&self, key: &str) -> Option<Duration> {
        self.resolve(key, Value::to_duration, |d| d.duration(key))
    }

    fn timestamp(&self, key: &str) -> Option<Timestamp> {
        self.resolve(key, Value::to_timestamp, |d| d.timestamp(key))
    }
}

#[cfg(test)]
mod tests;
