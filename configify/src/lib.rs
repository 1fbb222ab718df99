//! Typed configuration sources and a struct binder.
//!
//! A [`Source`] answers typed lookups (`string`, `u16`, `duration`, ...) for
//! string keys. The [`Binder`] walks a struct that derives [`Configurable`],
//! derives a key for every field and overwrites only the fields its source
//! can resolve. Everything the source does not know about keeps the value
//! the caller initialised it with.
//!
//! ```rust
//! use configify::{Binder, Configurable, MapSource, Value};
//!
//! #[derive(Configurable, Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     #[conf(name = "TAGS")]
//!     labels: Vec<String>,
//! }
//!
//! let source = MapSource::new([
//!     ("HOST", Value::from("localhost")),
//!     ("PORT", Value::from(1234)),
//!     ("TAGS", Value::from(vec!["a", "b", "c"])),
//! ]);
//! let mut server = Server::default();
//! Binder::new(source).bind(&mut server);
//!
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 1234);
//! assert_eq!(server.labels, ["a", "b", "c"]);
//! ```

pub use configify_macros::Configurable;

mod bind;
pub mod coerce;
mod error;
mod naming;
mod namespace;
mod options;
mod source;

pub use bind::{Bindable, Binder, Configurable, Field, Overlay, Slot, ValueKind};
#[doc(hidden)]
pub use bind::{NoSlot, SlotOf};
pub use error::CoerceError;
pub use naming::{resolve_name, upper_snake};
pub use namespace::{DEFAULT_DELIMITER, Namespace};
pub use options::Options;
pub use source::{Empty, EnvSource, MapSource, Source, Value, Watch, WatchCallback};

/// Absolute point in time understood by every [`Source`].
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
