//! A source that never resolves anything.

use std::time::Duration;

use crate::{Source, Timestamp};

/// Stateless source whose every lookup misses.
///
/// Used as the fallback when [`Options::defaults`](crate::Options::defaults)
/// is not configured, so a miss in the primary store ends the search. Bound
/// fields therefore keep whatever value the caller gave them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty;

impl Source for Empty {
    fn string(&self, _key: &str) -> Option<String> {
        None
    }

    fn string_list(&self, _key: &str) -> Option<Vec<String>> {
        None
    }

    fn bool(&self, _key: &str) -> Option<bool> {
        None
    }

    fn i64(&self, _key: &str) -> Option<i64> {
        None
    }

    fn u64(&self, _key: &str) -> Option<u64> {
        None
    }

    fn f64(&self, _key: &str) -> Option<f64> {
        None
    }

    fn duration(&self, _key: &str) -> Option<Duration> {
        None
    }

    fn timestamp(&self, _key: &str) -> Option<Timestamp> {
        None
    }
}
