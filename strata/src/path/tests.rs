//! Unit tests for dot-path parsing and navigation.

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::{assign, get, kind, parse, set};
use crate::error::PathError;
use crate::layering::{PathStep, Shape};

#[fixture]
fn document() -> Value {
    json!({
        "features": {"beta": true, "legacy": null},
        "channels": [{"name": "email"}, {"name": "sms"}],
        "limit": 5,
    })
}

#[rstest]
#[case("a", vec!["a"])]
#[case("a.b.0", vec!["a", "b", "0"])]
fn parses_segments(#[case] path: &str, #[case] expected: Vec<&str>) {
    assert_eq!(parse(path), Ok(expected));
}

#[rstest]
#[case("", PathError::Empty)]
#[case("a..b", PathError::EmptySegment { path: "a..b".into() })]
#[case(".a", PathError::EmptySegment { path: ".a".into() })]
#[case("a.", PathError::EmptySegment { path: "a.".into() })]
fn rejects_malformed_paths(#[case] path: &str, #[case] expected: PathError) {
    assert_eq!(parse(path), Err(expected));
}

#[rstest]
#[case("features.beta", json!(true))]
#[case("channels.1.name", json!("sms"))]
#[case("features.legacy", Value::Null)]
#[case("limit", json!(5))]
fn resolves_values(document: Value, #[case] path: &str, #[case] expected: Value) {
    assert_eq!(get(&document, path), Ok(&expected));
}

#[rstest]
#[case(
    "features.missing",
    PathError::MissingKey {
        path: "features.missing".into(),
        segment: "missing".into(),
    }
)]
#[case(
    "features.legacy.flag",
    PathError::Null {
        path: "features.legacy.flag".into(),
        segment: "flag".into(),
    }
)]
#[case(
    "channels.first",
    PathError::InvalidIndex {
        path: "channels.first".into(),
        segment: "first".into(),
    }
)]
#[case(
    "channels.-1",
    PathError::InvalidIndex {
        path: "channels.-1".into(),
        segment: "-1".into(),
    }
)]
#[case(
    "channels.+1",
    PathError::InvalidIndex {
        path: "channels.+1".into(),
        segment: "+1".into(),
    }
)]
#[case(
    "channels.2",
    PathError::IndexOutOfRange {
        path: "channels.2".into(),
        segment: "2".into(),
        len: 2,
    }
)]
#[case(
    "limit.max",
    PathError::Unsupported {
        path: "limit.max".into(),
        segment: "max".into(),
        kind: "number",
    }
)]
fn reports_navigation_failures(document: Value, #[case] path: &str, #[case] expected: PathError) {
    assert_eq!(get(&document, path), Err(expected));
}

#[rstest]
fn set_creates_missing_intermediate_objects(mut document: Value) {
    set(&mut document, "limits.daily.max", json!(10)).expect("set nested value");
    assert_eq!(get(&document, "limits.daily.max"), Ok(&json!(10)));
    assert_eq!(get(&document, "limit"), Ok(&json!(5)), "siblings untouched");
}

#[rstest]
fn set_replaces_null_intermediates(mut document: Value) {
    set(&mut document, "features.legacy.enabled", json!(false)).expect("set through null");
    assert_eq!(document["features"]["legacy"], json!({"enabled": false}));
}

#[rstest]
fn set_overwrites_existing_leaf(mut document: Value) {
    set(&mut document, "features.beta", json!(false)).expect("overwrite leaf");
    assert_eq!(get(&document, "features.beta"), Ok(&json!(false)));
}

#[rstest]
#[case("channels.0.name", "0", "sequence")]
#[case("limit.max", "max", "number")]
fn set_refuses_non_object_intermediates(
    mut document: Value,
    #[case] path: &str,
    #[case] segment: &str,
    #[case] expected_kind: &'static str,
) {
    let before = document.clone();
    let err = set(&mut document, path, json!(1)).expect_err("set must fail");
    assert_eq!(
        err,
        PathError::NotWritable {
            path: path.into(),
            segment: segment.into(),
            kind: expected_kind,
        }
    );
    assert_eq!(document, before, "failed writes leave the value untouched");
}

#[rstest]
fn struct_containers_only_accept_existing_members() {
    let mut value = json!({"enabled": true});
    let existing = [PathStep::new("enabled", Shape::Struct)];
    assign(&mut value, "enabled", &existing, json!(false)).expect("overwrite field");
    assert_eq!(value, json!({"enabled": false}));

    let unknown = [PathStep::new("other", Shape::Struct)];
    let err = assign(&mut value, "other", &unknown, json!(1)).expect_err("no new fields");
    assert_eq!(err.segment(), Some("other"));
    assert!(matches!(err, PathError::NotWritable { kind: "struct", .. }));
}

#[rstest]
fn sequence_containers_are_never_writable() {
    let mut value = json!({"tags": ["a"]});
    let steps = [
        PathStep::new("tags", Shape::Struct),
        PathStep::new("0", Shape::Sequence),
    ];
    let err = assign(&mut value, "tags.0", &steps, json!("b")).expect_err("sequence write");
    assert!(matches!(err, PathError::NotWritable { kind: "sequence", .. }));
}

#[rstest]
#[case(Value::Null, "null")]
#[case(json!([]), "sequence")]
#[case(json!({}), "map")]
#[case(json!("x"), "string")]
fn labels_value_kinds(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(kind(&value), expected);
}
