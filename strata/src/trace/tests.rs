//! Unit tests for trace resolution and leaf attribution.

use std::collections::BTreeMap;

use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Origin, Trace};
use crate::error::{PathError, StrataError};
use crate::layer::Layer;
use crate::Layered;
use crate::options::{Options, OptionsConfig};
use crate::scope::Scope;
use crate::stack::Stack;

#[derive(Clone, Debug, Default, Serialize, Deserialize, Layered)]
struct Settings {
    labels: BTreeMap<String, String>,
    retries: Option<u32>,
    timeout: Option<u32>,
}

fn settings(env: Option<&str>, retries: Option<u32>) -> Settings {
    Settings {
        labels: env
            .map(|value| BTreeMap::from([("env".to_owned(), value.to_owned())]))
            .unwrap_or_default(),
        retries,
        timeout: None,
    }
}

#[fixture]
fn options() -> Options<Settings> {
    Stack::new(vec![
        Layer::new(Scope::new("defaults", 10), settings(Some("prod"), Some(3)))
            .with_snapshot_id("defaults-v1"),
        Layer::new(Scope::new("user", 20), settings(Some("staging"), None)),
    ])
    .and_then(|stack| stack.merge(OptionsConfig::new()))
    .expect("merge fixture")
}

#[rstest]
fn strongest_defining_layer_supplies_value(options: Options<Settings>) {
    let (value, trace) = options.resolve_with_trace("labels.env").expect("trace");
    assert_eq!(value, json!("staging"));
    assert_eq!(trace.path, "labels.env");
    let summary: Vec<(&str, bool, &serde_json::Value)> = trace
        .layers
        .iter()
        .map(|entry| (entry.scope.name(), entry.found, &entry.value))
        .collect();
    assert_eq!(
        summary,
        [
            ("user", true, &json!("staging")),
            ("defaults", true, &json!("prod")),
        ]
    );
}

#[rstest]
fn unset_options_defer_to_weaker_layers(options: Options<Settings>) {
    let (value, trace) = options.resolve_with_trace("retries").expect("trace");
    assert_eq!(value, json!(3));
    let effective = trace.effective().expect("a layer defines retries");
    assert_eq!(effective.scope.name(), "defaults");
    assert_eq!(effective.snapshot_id, "defaults-v1");
    assert!(!trace.layers.first().is_some_and(|entry| entry.found));
}

#[rstest]
fn undefined_paths_fall_back_to_merged_value(options: Options<Settings>) {
    let (value, trace) = options.resolve_with_trace("timeout").expect("trace");
    assert!(value.is_null());
    assert!(trace.layers.iter().all(|entry| !entry.found));
}

#[rstest]
fn paths_missing_everywhere_are_errors(options: Options<Settings>) {
    let err = options.resolve_with_trace("labels.region").expect_err("missing");
    assert!(matches!(err, StrataError::Path(PathError::MissingKey { .. })));
    let err = options.resolve_with_trace("labels..env").expect_err("malformed");
    assert!(matches!(err, StrataError::Path(PathError::EmptySegment { .. })));
}

#[rstest]
fn direct_wrappers_report_a_single_entry() {
    let options = Options::with_config(
        settings(Some("dev"), None),
        OptionsConfig::new().with_scope(Scope::new("local", 1)),
    );
    let (value, trace) = options.resolve_with_trace("labels.env").expect("trace");
    assert_eq!(value, json!("dev"));
    assert_eq!(trace.layers.len(), 1);
    let entry = trace.layers.first().expect("entry");
    assert!(entry.found);
    assert_eq!(entry.scope.name(), "local");

    let bare = Options::new(settings(None, None));
    let (_, trace) = bare.resolve_with_trace("retries").expect("trace");
    assert!(trace.layers.first().is_some_and(|entry| entry.scope.is_unset()));
}

#[rstest]
fn flatten_attributes_every_leaf(options: Options<Settings>) {
    let leaves = options.flatten_with_provenance().expect("flatten");
    let paths: Vec<&str> = leaves.iter().map(|leaf| leaf.path.as_str()).collect();
    assert_eq!(paths, ["labels.env", "retries", "timeout"]);

    let by_path = |path: &str| leaves.iter().find(|leaf| leaf.path == path).expect("leaf");
    let env = by_path("labels.env");
    assert!(matches!(&env.origin, Origin::Layer(entry) if entry.scope.name() == "user"));
    let retries = by_path("retries");
    assert!(matches!(&retries.origin, Origin::Layer(entry) if entry.scope.name() == "defaults"));

    let timeout = by_path("timeout");
    assert_eq!(timeout.origin, Origin::Unset);
    let fallback = timeout.provenance().expect("fallback entry");
    assert_eq!(fallback.scope.name(), "defaults");
    assert!(!fallback.found);
}

#[rstest]
fn flatten_reports_merge_only_values(options: Options<Settings>) {
    let mut merged = options.value().clone();
    merged.timeout = Some(30);
    let widened =
        Options::from_layers(merged, options.layers().to_vec(), options.config().clone());
    let leaves = widened.flatten_with_provenance().expect("flatten");
    let timeout = leaves
        .iter()
        .find(|leaf| leaf.path == "timeout")
        .expect("timeout leaf");
    assert_eq!(timeout.value, json!(30));
    assert_eq!(timeout.origin, Origin::Merged);
}

#[rstest]
fn written_values_win_over_layer_values(options: Options<Settings>) {
    let written = options.set("labels.env", json!("canary")).expect("set");

    assert_eq!(written.get("labels.env").expect("get"), json!("canary"));
    let (traced, trace) = written.resolve_with_trace("labels.env").expect("trace");
    assert_eq!(traced, json!("canary"));
    assert_eq!(
        trace.effective().map(|entry| &entry.value),
        Some(&json!("canary"))
    );
    let leaves = written.flatten_with_provenance().expect("flatten");
    let env = leaves
        .iter()
        .find(|leaf| leaf.path == "labels.env")
        .expect("env leaf");
    assert_eq!(env.value, json!("canary"));
    assert!(written.layers().is_empty());

    let (before, _) = options.resolve_with_trace("labels.env").expect("trace");
    assert_eq!(before, json!("staging"), "the source wrapper is unchanged");
    assert_eq!(options.layers().len(), 2);
}

#[rstest]
fn flatten_skips_keys_that_cannot_be_addressed() {
    let mut labels = BTreeMap::from([("env".to_owned(), "prod".to_owned())]);
    labels.insert("a.b".to_owned(), "dotted".to_owned());
    labels.insert(String::new(), "blank".to_owned());
    let options = Stack::new(vec![Layer::new(
        Scope::new("defaults", 10),
        Settings {
            labels,
            ..Settings::default()
        },
    )])
    .and_then(|stack| stack.merge(OptionsConfig::new()))
    .expect("merge");

    let leaves = options.flatten_with_provenance().expect("flatten");
    let paths: Vec<&str> = leaves.iter().map(|leaf| leaf.path.as_str()).collect();
    assert_eq!(paths, ["labels.env", "retries", "timeout"]);
    for leaf in &leaves {
        options.resolve_with_trace(&leaf.path).expect("flattened paths resolve");
    }
}

#[rstest]
fn traces_round_trip_through_json(options: Options<Settings>) {
    let (_, trace) = options.resolve_with_trace("labels.env").expect("trace");
    let payload = trace.to_json().expect("serialise");
    let restored = Trace::from_json(&payload).expect("deserialise");
    assert_eq!(restored, trace);
}
