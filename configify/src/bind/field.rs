//! The field table a [`Configurable`] type exposes to the binder.
//!
//! `#[derive(Configurable)]` writes these impls for you. They are public so
//! a type the derive cannot handle can still describe itself by hand:
//!
//! ```rust
//! use configify::{Bindable, Binder, Configurable, Field, MapSource};
//!
//! #[derive(Default)]
//! struct Limits {
//!     burst: u32,
//!     window: std::time::Duration,
//! }
//!
//! impl Configurable for Limits {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("burst", self.burst.slot()),
//!             Field::new("window", self.window.slot()).renamed("WINDOW_SECS"),
//!         ]
//!     }
//! }
//!
//! let mut limits = Limits::default();
//! Binder::new(MapSource::new([("BURST", "12"), ("WINDOW_SECS", "90s")])).bind(&mut limits);
//! assert_eq!(limits.burst, 12);
//! assert_eq!(limits.window.as_secs(), 90);
//! ```

use std::borrow::Cow;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{Source, Timestamp, resolve_name};

/// A type whose fields can be overlaid from a [`Source`].
pub trait Configurable {
    /// Describe every bindable field, in declaration order.
    ///
    /// Each [`Field`] borrows its storage mutably, so the returned table is
    /// how the binder writes values back.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A type that can occupy a field of a [`Configurable`] struct.
///
/// Scalars answer with [`Slot::Value`]; types deriving [`Configurable`]
/// answer with [`Slot::Nested`].
pub trait Bindable {
    /// How the binder should treat a field of this type.
    fn slot(&mut self) -> Slot<'_>;

    /// How the binder should treat a field of type `Option<Self>`.
    ///
    /// Unsupported unless overridden, which is what makes nested options
    /// such as `Option<Option<u8>>` skip silently.
    fn optional_slot(_value: &mut Option<Self>) -> Slot<'_>
    where
        Self: Sized,
    {
        Slot::Unsupported
    }
}

impl<T: Bindable> Bindable for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        T::optional_slot(self)
    }
}

/// Slot lookup used by derived code for a field of any type.
///
/// `SlotOf::new(&mut field).slot()` resolves to the inherent method when
/// `T: Bindable`. For every other type method lookup falls through the
/// [`Deref`](std::ops::Deref) to [`NoSlot`], so fields such as `Vec<u16>`
/// or `HashMap<K, V>` compile and are skipped by the binder.
#[doc(hidden)]
pub struct SlotOf<'a, T>(&'a mut T);

impl<'a, T> SlotOf<'a, T> {
    /// Wrap the field storage.
    #[must_use]
    pub const fn new(field: &'a mut T) -> Self {
        Self(field)
    }
}

impl<'a, T: Bindable> SlotOf<'a, T> {
    /// The slot `T` reports for itself.
    #[must_use]
    pub fn slot(self) -> Slot<'a> {
        self.0.slot()
    }
}

impl<T> std::ops::Deref for SlotOf<'_, T> {
    type Target = NoSlot;

    fn deref(&self) -> &NoSlot {
        &NoSlot
    }
}

/// Fallback for field types that are not [`Bindable`].
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct NoSlot;

impl NoSlot {
    /// Always [`Slot::Unsupported`].
    #[must_use]
    pub const fn slot<'b>(&self) -> Slot<'b> {
        Slot::Unsupported
    }
}

/// What the binder does with one field.
pub enum Slot<'a> {
    /// A leaf resolved with a single typed lookup.
    Value(&'a mut dyn Overlay),
    /// An aggregate walked field by field.
    Nested(&'a mut dyn Configurable),
    /// An optional aggregate. `None` is never traversed or materialised.
    OptionalNested(Option<&'a mut dyn Configurable>),
    /// Anything else. The binder skips it.
    Unsupported,
}

/// Coarse type of a leaf, reported in trace logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueKind {
    /// `String`.
    String,
    /// `Vec<String>`.
    StringList,
    /// `bool`.
    Bool,
    /// Any signed integer width.
    Int,
    /// Any unsigned integer width.
    Uint,
    /// `f32` or `f64`.
    Float,
    /// `std::time::Duration`.
    Duration,
    /// A timestamp.
    Timestamp,
}

/// A leaf that can be overwritten from a single [`Source`] lookup.
pub trait Overlay {
    /// The kind of value this leaf holds.
    fn kind(&self) -> ValueKind;

    /// Look `key` up in `source` and overwrite `self` if it resolves.
    ///
    /// Returns whether the value was overwritten. On a miss `self` is left
    /// exactly as it was.
    fn overlay(&mut self, source: &dyn Source, key: &str) -> bool;
}

fn utc_timestamp(source: &dyn Source, key: &str) -> Option<DateTime<Utc>> {
    source.timestamp(key).map(|instant| instant.with_timezone(&Utc))
}

macro_rules! leaf {
    ($($ty:ty => $fetch:path, $kind:ident;)+) => {$(
        impl Overlay for $ty {
            fn kind(&self) -> ValueKind {
                ValueKind::$kind
            }

            fn overlay(&mut self, source: &dyn Source, key: &str) -> bool {
                let Some(value) = $fetch(source, key) else {
                    return false;
                };
                *self = value;
                true
            }
        }

        impl Overlay for Option<$ty> {
            fn kind(&self) -> ValueKind {
                ValueKind::$kind
            }

            fn overlay(&mut self, source: &dyn Source, key: &str) -> bool {
                let Some(value) = $fetch(source, key) else {
                    return false;
                };
                *self = Some(value);
                true
            }
        }

        impl Bindable for $ty {
            fn slot(&mut self) -> Slot<'_> {
                Slot::Value(self)
            }

            fn optional_slot(value: &mut Option<Self>) -> Slot<'_> {
                Slot::Value(value)
            }
        }
    )+};
}

leaf! {
    String => Source::string, String;
    Vec<String> => Source::string_list, StringList;
    bool => Source::bool, Bool;
    i8 => Source::i8, Int;
    i16 => Source::i16, Int;
    i32 => Source::i32, Int;
    i64 => Source::i64, Int;
    isize => Source::isize, Int;
    u8 => Source::u8, Uint;
    u16 => Source::u16, Uint;
    u32 => Source::u32, Uint;
    u64 => Source::u64, Uint;
    usize => Source::usize, Uint;
    f32 => Source::f32, Float;
    f64 => Source::f64, Float;
    Duration => Source::duration, Duration;
    Timestamp => Source::timestamp, Timestamp;
    DateTime<Utc> => utc_timestamp, Timestamp;
}

/// One entry of a [`Configurable`] field table.
pub struct Field<'a> {
    ident: &'static str,
    rename: Option<&'static str>,
    flatten: bool,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// Describe the field called `ident` stored behind `slot`.
    #[must_use]
    pub const fn new(ident: &'static str, slot: Slot<'a>) -> Self {
        Self {
            ident,
            rename: None,
            flatten: false,
            slot,
        }
    }

    /// Look this field up under `name` verbatim instead of the derived
    /// name. An empty override is ignored.
    #[must_use]
    pub const fn renamed(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Describe an embedded aggregate whose fields join the parent's key
    /// space instead of nesting under `ident`.
    ///
    /// Only aggregates can be embedded, so `#[conf(flatten)]` on a leaf is
    /// rejected at compile time:
    ///
    /// ```compile_fail
    /// use configify::Configurable;
    ///
    /// #[derive(Configurable)]
    /// struct Server {
    ///     #[conf(flatten)]
    ///     port: u16,
    /// }
    /// ```
    #[must_use]
    pub const fn embedded(ident: &'static str, target: &'a mut dyn Configurable) -> Self {
        Self {
            ident,
            rename: None,
            flatten: true,
            slot: Slot::Nested(target),
        }
    }

    /// The field's identifier as written in source.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Whether the field is flattened into its parent.
    #[must_use]
    pub const fn is_flattened(&self) -> bool {
        self.flatten
    }

    /// The unqualified lookup name: the override if set, otherwise the
    /// upper snake case form of the identifier.
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        resolve_name(self.ident, self.rename)
    }

    pub(crate) fn into_slot(self) -> Slot<'a> {
        self.slot
    }
}
