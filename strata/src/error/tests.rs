//! Unit tests for error classification and display.

use rstest::rstest;

use super::{PathError, StrataError};

#[rstest]
#[case(StrataError::ScopeNameRequired, true)]
#[case(StrataError::DuplicateScopeName { name: "user".into() }, true)]
#[case(StrataError::PriorityOrder { priority: 100 }, true)]
#[case(StrataError::EmptyStack, false)]
#[case(StrataError::NoEvaluator, false)]
fn classifies_scope_violations(#[case] err: StrataError, #[case] expected: bool) {
    assert_eq!(err.is_scope_violation(), expected, "unexpected class for {err}");
}

#[test]
fn path_errors_carry_path_and_segment() {
    let err = PathError::MissingKey {
        path: "labels.env".into(),
        segment: "env".into(),
    };
    assert_eq!(err.path(), Some("labels.env"));
    assert_eq!(err.segment(), Some("env"));
    assert_eq!(err.to_string(), "path 'labels.env': key 'env' not found");
}

#[test]
fn empty_path_has_no_segment() {
    assert_eq!(PathError::Empty.segment(), None);
    assert_eq!(PathError::Empty.path(), None);
}

#[test]
fn path_errors_convert_transparently() {
    let err: StrataError = PathError::InvalidIndex {
        path: "items.x".into(),
        segment: "x".into(),
    }
    .into();
    assert!(matches!(err, StrataError::Path(PathError::InvalidIndex { .. })));
    assert_eq!(err.to_string(), "path 'items.x': 'x' is not a valid index");
}

#[test]
fn duplicate_name_message_names_scope() {
    let err = StrataError::DuplicateScopeName {
        name: "user".into(),
    };
    assert_eq!(err.to_string(), "scope: names must be unique: user");
}
