//! Builders for the canonical scope hierarchy.
//!
//! Each scope carries the `<name>_id` metadata key that
//! [`SnapshotRef::identifier`](strata::store::SnapshotRef::identifier) needs
//! to address stored snapshots.

use serde_json::Value;
use strata::{
    SCOPE_PRIORITY_ORG, SCOPE_PRIORITY_SYSTEM, SCOPE_PRIORITY_TEAM, SCOPE_PRIORITY_TENANT,
    SCOPE_PRIORITY_USER, Scope,
};

/// The `system` scope. It needs no identifier.
#[must_use]
pub fn system() -> Scope {
    Scope::new("system", SCOPE_PRIORITY_SYSTEM)
}

/// A `tenant` scope addressing `id`.
#[must_use]
pub fn tenant(id: &str) -> Scope {
    addressed("tenant", SCOPE_PRIORITY_TENANT, id)
}

/// An `org` scope addressing `id`.
#[must_use]
pub fn org(id: &str) -> Scope {
    addressed("org", SCOPE_PRIORITY_ORG, id)
}

/// A `team` scope addressing `id`.
#[must_use]
pub fn team(id: &str) -> Scope {
    addressed("team", SCOPE_PRIORITY_TEAM, id)
}

/// A `user` scope addressing `id`.
#[must_use]
pub fn user(id: &str) -> Scope {
    addressed("user", SCOPE_PRIORITY_USER, id)
}

/// A scope called `name` with its `<name>_id` metadata set to `id`.
fn addressed(name: &str, priority: i64, id: &str) -> Scope {
    Scope::new(name, priority).with_metadata([(format!("{name}_id"), Value::from(id))])
}

#[cfg(test)]
mod tests {
    use super::{org, system, team, tenant, user};

    #[test]
    fn canonical_scopes_are_ordered() {
        let ordered = [system(), tenant("t"), org("o"), team("t"), user("u")]
            .map(|scope| scope.priority());
        assert!(ordered.is_sorted());
    }

    #[test]
    fn addressed_scopes_carry_identifiers() {
        assert!(system().metadata().is_empty());
        assert_eq!(
            tenant("acme").metadata_value("tenant_id").and_then(|v| v.as_str()),
            Some("acme")
        );
        assert_eq!(user("u-1").priority(), 500);
    }
}
