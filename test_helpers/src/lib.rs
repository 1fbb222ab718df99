//! Test helpers shared across crates in the workspace.
//!
//! - [`env`] serialises and undoes environment mutation.
//! - [`source`] wraps a `configify::Source` to record which keys were
//!   asked for, and offers assertion helpers for typed lookups.

pub mod env;
pub mod source;
