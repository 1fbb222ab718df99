//! Shared rules for turning raw strings into typed values.
//!
//! Every string-backed source (the environment, string entries in a
//! [`MapSource`](crate::MapSource)) goes through these functions so the same
//! text always means the same thing regardless of where it came from.
//!
//! ```rust
//! use std::time::Duration;
//! use configify::coerce;
//!
//! assert_eq!(coerce::integer("5,300,123.43"), Ok(5_300_123));
//! assert_eq!(coerce::boolean("TRUE"), Ok(true));
//! assert_eq!(coerce::duration("5m3s"), Ok(Duration::from_secs(303)));
//! assert_eq!(coerce::list(" a, b ,c "), ["a", "b", "c"]);
//! ```

use std::time::Duration;

use chrono::{DateTime, NaiveDate};

use crate::{CoerceError, Timestamp};

const NANOS_PER_SECOND: u128 = 1_000_000_000;
const FRACTION_PRECISION: u128 = 10_000_000_000_000_000_000;

/// Parse a signed integer.
///
/// Thousands separators (`,`) are stripped and anything from the first `.`
/// onwards is discarded, so `"5,300,123.430"` is `5300123`. A value that
/// starts with `.` has no integer part and is rejected.
///
/// # Errors
///
/// Returns [`CoerceError::Integer`] when the normalised text is not a base-10
/// integer that fits in an `i64`.
pub fn integer(value: &str) -> Result<i64, CoerceError> {
    normalise_integer(value)
        .parse()
        .map_err(|err: std::num::ParseIntError| CoerceError::Integer {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

/// Parse an unsigned integer using the same normalisation as [`integer`].
///
/// # Errors
///
/// Returns [`CoerceError::Integer`] for negative or malformed input.
pub fn unsigned(value: &str) -> Result<u64, CoerceError> {
    normalise_integer(value)
        .parse()
        .map_err(|err: std::num::ParseIntError| CoerceError::Integer {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

/// Parse a floating point number. Separators are *not* stripped.
///
/// # Errors
///
/// Returns [`CoerceError::Float`] when the text is not a float.
pub fn float(value: &str) -> Result<f64, CoerceError> {
    value
        .parse()
        .map_err(|err: std::num::ParseFloatError| CoerceError::Float {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

/// Parse `true` or `false`, ignoring case. Nothing else is accepted.
///
/// # Errors
///
/// Returns [`CoerceError::Bool`] for any other text, including `1` and `yes`.
pub fn boolean(value: &str) -> Result<bool, CoerceError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CoerceError::Bool(value.to_owned()))
    }
}

/// Parse a compact duration such as `300ms`, `1.5h` or `5m3s`.
///
/// The grammar is an optional sign followed by one or more
/// `number unit` pairs, where the number may carry a fraction and the unit
/// is one of `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m` or `h`. A bare `0` is
/// also accepted. Negative totals cannot be represented by [`Duration`] and
/// are rejected, as are totals beyond `i64::MAX` nanoseconds.
///
/// # Errors
///
/// Returns [`CoerceError::Duration`] describing the first problem found.
pub fn duration(value: &str) -> Result<Duration, CoerceError> {
    let (negative, mut rest) = match value.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(CoerceError::duration(value, "missing number"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(CoerceError::duration(value, "expected a number"));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(CoerceError::duration(value, "missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| CoerceError::duration(value, "unknown unit"))?;

        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| CoerceError::duration(value, "overflow"))?
        };
        let nanos = whole_value
            .checked_mul(scale)
            .and_then(|nanos| nanos.checked_add(fraction_nanos(fraction, scale)))
            .and_then(|nanos| total.checked_add(nanos))
            .ok_or_else(|| CoerceError::duration(value, "overflow"))?;
        total = nanos;
        rest = remaining;
    }

    if negative && total != 0 {
        return Err(CoerceError::duration(
            value,
            "negative durations are not supported",
        ));
    }
    u64::try_from(total)
        .ok()
        .filter(|nanos| *nanos <= i64::MAX.unsigned_abs())
        .map(Duration::from_nanos)
        .ok_or_else(|| CoerceError::duration(value, "overflow"))
}

/// Parse a `YYYY-MM-DD` date (as midnight UTC) or an RFC 3339 timestamp.
///
/// The form is picked by length: exactly ten bytes means a date, anything
/// else must be a full RFC 3339 timestamp with an offset and an upper case
/// `T` between date and time.
///
/// # Errors
///
/// Returns [`CoerceError::Empty`] for an empty value and
/// [`CoerceError::Timestamp`] when parsing fails.
pub fn timestamp(value: &str) -> Result<Timestamp, CoerceError> {
    let invalid = |err: chrono::ParseError| CoerceError::Timestamp {
        value: value.to_owned(),
        reason: err.to_string(),
    };
    match value.len() {
        0 => Err(CoerceError::Empty),
        10 => {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(invalid)?;
            date.and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc().fixed_offset())
                .ok_or_else(|| CoerceError::Timestamp {
                    value: value.to_owned(),
                    reason: String::from("midnight does not exist for this date"),
                })
        }
        _ if value.as_bytes().get(10) != Some(&b'T') => Err(CoerceError::Timestamp {
            value: value.to_owned(),
            reason: String::from("expected 'T' between date and time"),
        }),
        _ => DateTime::parse_from_rfc3339(value).map_err(invalid),
    }
}

/// Split a comma-separated list, trimming each element.
///
/// An empty string is an empty list rather than a list with one empty
/// element. Empty elements between commas are kept.
#[must_use]
pub fn list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|item| item.trim().to_owned()).collect()
}

/// Narrow a 64-bit value into the requested width.
///
/// # Errors
///
/// Returns [`CoerceError::OutOfRange`] when `value` does not fit in `T`.
pub fn narrow<T, W>(value: W) -> Result<T, CoerceError>
where
    T: TryFrom<W>,
    W: Copy + std::fmt::Display,
{
    T::try_from(value).map_err(|_| CoerceError::OutOfRange {
        value: value.to_string(),
        target: std::any::type_name::<T>(),
    })
}

fn normalise_integer(value: &str) -> String {
    let integral = match value.find('.') {
        Some(0) => "",
        Some(pos) => value.split_at(pos).0,
        None => value,
    };
    integral.replace(',', "")
}

fn split_digits(value: &str) -> (&str, &str) {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SECOND,
        "m" => 60 * NANOS_PER_SECOND,
        "h" => 3_600 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

/// Nanoseconds contributed by the fractional digits of one `number unit`
/// pair. Digits beyond the precision limit are dropped.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in digits.chars().filter_map(|c| c.to_digit(10)) {
        if denominator >= FRACTION_PRECISION {
            break;
        }
        numerator = numerator * 10 + u128::from(digit);
        denominator *= 10;
    }
    numerator
        .saturating_mul(scale)
        .checked_div(denominator)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests;
