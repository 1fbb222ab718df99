//! Unit tests for the map-backed source.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn typed() -> MapSource {
    MapSource::new([
        ("HOST", Value::from("  localhost ")),
        ("PORT", Value::from(8080_u16)),
        ("OFFSET", Value::from(-3)),
        ("RATIO", Value::from(0.5)),
        ("DEBUG", Value::from(true)),
        ("TIMEOUT", Value::from(Duration::from_secs(30))),
        ("TAGS", Value::from(["a", "b"])),
    ])
}

#[rstest]
fn typed_values_answer_their_own_accessor(typed: MapSource) {
    assert_eq!(typed.string("HOST").as_deref(), Some("localhost"));
    assert_eq!(typed.u16("PORT"), Some(8080));
    assert_eq!(typed.i32("OFFSET"), Some(-3));
    assert_eq!(typed.f64("RATIO"), Some(0.5));
    assert_eq!(typed.bool("DEBUG"), Some(true));
    assert_eq!(typed.duration("TIMEOUT"), Some(Duration::from_secs(30)));
    assert_eq!(typed.string_list("TAGS"), Some(vec!["a".into(), "b".into()]));
}

#[rstest]
#[case::int_as_string("PORT")]
#[case::bool_as_string("DEBUG")]
#[case::list_as_string("TAGS")]
fn typed_values_do_not_stringify(typed: MapSource, #[case] key: &str) {
    assert_eq!(typed.string(key), None);
}

#[rstest]
fn integers_cross_signedness_when_in_range(typed: MapSource) {
    assert_eq!(typed.i64("PORT"), Some(8080));
    assert_eq!(typed.u64("OFFSET"), None);
    assert_eq!(typed.u8("PORT"), None);
}

#[rstest]
fn floats_are_not_integers(typed: MapSource) {
    assert_eq!(typed.i64("RATIO"), None);
    assert_eq!(typed.f64("PORT"), None);
}

#[rstest]
fn string_values_are_coerced_like_the_environment() {
    let source = MapSource::new([
        ("COUNT", "5,300,123"),
        ("FLAG", " TRUE "),
        ("WAIT", "5m3s"),
        ("DAY", "2019-12-25"),
        ("NAMES", "x, y ,z"),
        ("NONE", ""),
    ]);
    assert_eq!(source.i64("COUNT"), Some(5_300_123));
    assert_eq!(source.bool("FLAG"), Some(true));
    assert_eq!(source.duration("WAIT"), Some(Duration::from_secs(303)));
    assert_eq!(
        source.timestamp("DAY"),
        Utc.with_ymd_and_hms(2019, 12, 25, 0, 0, 0)
            .single()
            .map(|midnight| midnight.fixed_offset())
    );
    assert_eq!(
        source.string_list("NAMES"),
        Some(vec!["x".into(), "y".into(), "z".into()])
    );
    assert_eq!(source.string_list("NONE"), Some(Vec::new()));
    assert_eq!(source.string_list("MISSING"), None);
}

#[rstest]
fn namespace_applies_to_construction_and_lookup() {
    let source = MapSource::with_options(Options::namespaced("APP"), [("PORT", 1)]);
    assert_eq!(source.get("PORT"), Some(&Value::Int(1)));
    assert_eq!(source.i64("PORT"), Some(1));
    assert_eq!(source.i64("APP_PORT"), None);
    assert_eq!(source.namespace().name, "APP");
}

#[rstest]
fn defaults_answer_misses_with_unqualified_keys() {
    let defaults = MapSource::new([("PORT", 9999), ("HOST", 1)]);
    let options = Options::namespaced("APP").with_defaults(defaults);
    let source = MapSource::with_options(options, [("HOST", "primary")]);

    assert_eq!(source.i64("PORT"), Some(9999));
    assert_eq!(source.string("HOST").as_deref(), Some("primary"));
}

#[rstest]
fn defaults_are_not_consulted_for_unusable_values() {
    let options = Options::default().with_defaults(MapSource::new([("PORT", 9999)]));
    let source = MapSource::with_options(options, [("PORT", "not a number")]);
    assert_eq!(source.i64("PORT"), None);
}

#[rstest]
fn collects_from_iterator() {
    let source: MapSource = [("A", 1), ("B", 2)].into_iter().collect();
    assert_eq!(source.len(), 2);
    assert!(!source.is_empty());
    assert!(MapSource::default().is_empty());
}

#[rstest]
fn utc_timestamps_are_stored_with_offset() -> anyhow::Result<()> {
    let instant = Utc
        .with_ymd_and_hms(2020, 1, 2, 3, 4, 5)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous instant"))?;
    let source = MapSource::new([("AT", instant)]);
    anyhow::ensure!(source.timestamp("AT") == Some(instant.fixed_offset()));
    Ok(())
}
