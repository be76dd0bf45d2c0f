//! Unit tests for schema generation.

use std::sync::Arc;

use rstest::rstest;
use serde_json::{Value, json};

use super::{
    DescriptorGenerator, FieldDescriptor, SCHEMA_FORMAT_DESCRIPTORS, SchemaDocument,
    SchemaGenerator, ScopeDescriptor,
};
use crate::error::{BoxError, StrataError};
use crate::layer::Layer;
use crate::options::{Options, OptionsConfig};
use crate::scope::Scope;
use crate::stack::Stack;

fn descriptor(path: &str, kind: &str) -> FieldDescriptor {
    FieldDescriptor {
        path: path.to_owned(),
        kind: kind.to_owned(),
    }
}

#[rstest]
fn describes_leaves_sorted_by_path() {
    let value = json!({
        "zeta": 1.5,
        "alpha": {"enabled": true, "count": 3, "big": u64::MAX},
        "tags": ["a", "b"],
        "mixed": [1, "x"],
        "empty": {},
        "none": null,
    });
    assert_eq!(
        DescriptorGenerator::describe(&value),
        [
            descriptor("alpha.big", "uint"),
            descriptor("alpha.count", "int"),
            descriptor("alpha.enabled", "bool"),
            descriptor("empty", "map[string]any"),
            descriptor("mixed", "[]any"),
            descriptor("none", "nil"),
            descriptor("tags", "[]string"),
            descriptor("zeta", "float"),
        ]
    );
}

#[rstest]
#[case(Value::Null)]
#[case(json!({}))]
#[case(json!(5))]
fn tolerates_values_without_leaves(#[case] value: Value) {
    let doc = DescriptorGenerator
        .generate(&value, &[])
        .expect("generate");
    assert_eq!(doc.format, SCHEMA_FORMAT_DESCRIPTORS);
    assert_eq!(doc.body, json!([]));
}

#[rstest]
fn descriptor_bodies_use_type_key() {
    let doc = Options::new(json!({"enabled": true})).schema().expect("schema");
    assert_eq!(doc.body, json!([{"path": "enabled", "type": "bool"}]));
    assert!(doc.scopes.is_empty());
}

fn stack() -> Stack<Value> {
    Stack::new(vec![
        Layer::new(Scope::new("defaults", 100), json!({"enabled": false})),
        Layer::new(
            Scope::new("user", 500).with_metadata([("email", json!("user@example.com"))]),
            json!({"enabled": true}),
        )
        .with_snapshot_id("user/123"),
    ])
    .expect("stack")
}

#[rstest]
fn includes_scopes_only_when_enabled() {
    let with_scopes = stack()
        .merge(OptionsConfig::new().with_scope_schema(true))
        .and_then(|options| options.schema())
        .expect("schema");
    let names: Vec<&str> = with_scopes.scopes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["user", "defaults"]);
    assert_eq!(
        with_scopes.scopes.first().map(|s| s.snapshot_id.as_str()),
        Some("user/123")
    );

    let without = stack()
        .merge(OptionsConfig::new())
        .and_then(|options| options.schema())
        .expect("schema");
    assert!(without.scopes.is_empty());
}

struct Fixed(Result<&'static str, &'static str>);

impl SchemaGenerator for Fixed {
    fn generate(
        &self,
        value: &Value,
        scopes: &[ScopeDescriptor],
    ) -> Result<SchemaDocument, BoxError> {
        let format = self.0.map_err(BoxError::from)?;
        Ok(SchemaDocument {
            format: format.to_owned(),
            body: value.clone(),
            scopes: scopes.to_vec(),
        })
    }
}

#[rstest]
fn uses_the_configured_generator() {
    let config = OptionsConfig::new().with_schema_generator(Arc::new(Fixed(Ok("custom"))));
    let doc = Options::with_config(json!({"k": "v"}), config)
        .schema()
        .expect("schema");
    assert_eq!(doc.format, "custom");
    assert_eq!(doc.body, json!({"k": "v"}));
}

#[rstest]
fn generator_failures_are_wrapped() {
    let config = OptionsConfig::new().with_schema_generator(Arc::new(Fixed(Err("boom"))));
    let err = Options::with_config(json!({}), config)
        .schema()
        .expect_err("must fail");
    assert!(matches!(err, StrataError::Schema(_)));
    assert_eq!(err.to_string(), "schema generation failed: boom");
}
