//! Unit tests for the coercion rules.

use super::*;
use chrono::{FixedOffset, TimeZone, Utc};
use rstest::rstest;

#[rstest]
#[case("5", 5)]
#[case("-3", -3)]
#[case("+7", 7)]
#[case("5,300,123", 5_300_123)]
#[case("5.430", 5)]
#[case("-5.1", -5)]
#[case("5,300,123.430", 5_300_123)]
fn integers_are_normalised(#[case] raw: &str, #[case] expected: i64) {
    assert_eq!(integer(raw), Ok(expected));
}

#[rstest]
#[case::empty("")]
#[case::leading_decimal(".1")]
#[case::words("foo")]
#[case::list("foo, bar")]
#[case::date("2019-12-25")]
#[case::sign_only("-.5")]
fn integers_reject_non_numbers(#[case] raw: &str) {
    assert!(matches!(integer(raw), Err(CoerceError::Integer { .. })));
}

#[rstest]
#[case("90", 90)]
#[case("5,300,123", 5_300_123)]
#[case("640.9", 640)]
fn unsigned_integers_are_normalised(#[case] raw: &str, #[case] expected: u64) {
    assert_eq!(unsigned(raw), Ok(expected));
}

#[rstest]
fn unsigned_rejects_negative_values() {
    assert!(unsigned("-3").is_err());
}

#[rstest]
#[case("5.430", 5.43)]
#[case("-5.1", -5.1)]
#[case(".1", 0.1)]
#[case("5", 5.0)]
fn floats_parse(#[case] raw: &str, #[case] expected: f64) {
    assert_eq!(float(raw), Ok(expected));
}

#[rstest]
#[case("5,300,123.430")]
#[case("")]
#[case("five")]
fn floats_keep_separators_invalid(#[case] raw: &str) {
    assert!(matches!(float(raw), Err(CoerceError::Float { .. })));
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("false", false)]
#[case("FALSE", false)]
fn booleans_ignore_case(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(boolean(raw), Ok(expected));
}

#[rstest]
#[case("1")]
#[case("0")]
#[case("yes")]
#[case("")]
#[case(" true")]
fn booleans_accept_only_words(#[case] raw: &str) {
    assert_eq!(boolean(raw), Err(CoerceError::Bool(raw.to_owned())));
}

#[rstest]
#[case("0", Duration::ZERO)]
#[case("-0s", Duration::ZERO)]
#[case("5m3s", Duration::from_secs(303))]
#[case("+20s", Duration::from_secs(20))]
#[case("1h", Duration::from_secs(3_600))]
#[case("1.5h", Duration::from_secs(5_400))]
#[case("1.s", Duration::from_secs(1))]
#[case(".5s", Duration::from_millis(500))]
#[case("300ms", Duration::from_millis(300))]
#[case("10us", Duration::from_micros(10))]
#[case("10µs", Duration::from_micros(10))]
#[case("10μs", Duration::from_micros(10))]
#[case("42ns", Duration::from_nanos(42))]
#[case("1h2m3s4ms", Duration::from_millis(3_723_004))]
#[case("1.000000001s", Duration::from_nanos(1_000_000_001))]
fn durations_parse(#[case] raw: &str, #[case] expected: Duration) {
    assert_eq!(duration(raw), Ok(expected));
}

#[rstest]
#[case::empty("")]
#[case::sign_only("-")]
#[case::no_unit("5")]
#[case::trailing_number("5m3")]
#[case::unknown_unit("5d")]
#[case::no_number("s")]
#[case::dot_only(".s")]
#[case::negative("-5s")]
#[case::words("foo")]
#[case::overflow("9999999999h")]
#[case::spaces("5m 3s")]
fn durations_reject_bad_input(#[case] raw: &str) {
    assert!(matches!(duration(raw), Err(CoerceError::Duration { .. })));
}

#[rstest]
fn date_only_timestamps_are_midnight_utc() {
    let expected = Utc
        .with_ymd_and_hms(2019, 12, 25, 0, 0, 0)
        .single()
        .map(|t| t.fixed_offset());
    assert_eq!(timestamp("2019-12-25").ok(), expected);
}

#[rstest]
fn rfc3339_timestamps_keep_their_offset() {
    let offset = FixedOffset::east_opt(2 * 3_600);
    let expected = offset.and_then(|tz| tz.with_ymd_and_hms(2019, 12, 25, 12, 0, 5).single());
    assert_eq!(timestamp("2019-12-25T12:00:05+02:00").ok(), expected);
}

#[rstest]
fn rfc3339_timestamps_accept_fractions_and_zulu() {
    let expected = Utc
        .with_ymd_and_hms(2019, 12, 25, 12, 0, 5)
        .single()
        .map(|t| t.fixed_offset());
    assert_eq!(timestamp("2019-12-25T12:00:05.0Z").ok(), expected);
}

#[rstest]
#[case::empty("", true)]
#[case::bad_date("2019-13-25", false)]
#[case::words("foo", false)]
#[case::no_offset("2019-12-25T12:00:05", false)]
#[case::space_separator("2019-12-25 12:00:05Z", false)]
#[case::lower_case_separator("2019-12-25t12:00:05Z", false)]
#[case::number("5,300,123", false)]
fn timestamps_reject_bad_input(#[case] raw: &str, #[case] empty: bool) {
    let result = timestamp(raw);
    if empty {
        assert_eq!(result, Err(CoerceError::Empty));
    } else {
        assert!(matches!(result, Err(CoerceError::Timestamp { .. })));
    }
}

#[rstest]
#[case("", &[])]
#[case("foo", &["foo"])]
#[case("foo bar", &["foo bar"])]
#[case("foo, bar, baz ,5", &["foo", "bar", "baz", "5"])]
#[case("5,300,123.430", &["5", "300", "123.430"])]
#[case("a,,b", &["a", "", "b"])]
fn lists_split_and_trim(#[case] raw: &str, #[case] expected: &[&str]) {
    assert_eq!(list(raw), expected);
}

#[rstest]
fn narrowing_reports_the_target_type() {
    assert_eq!(narrow::<i8, i64>(100), Ok(100));
    let err = narrow::<u8, u64>(300).err();
    assert_eq!(
        err,
        Some(CoerceError::OutOfRange {
            value: String::from("300"),
            target: "u8",
        })
    );
}
