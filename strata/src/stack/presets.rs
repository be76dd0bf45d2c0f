//! The canonical system/tenant/org/team/user stack.

use crate::error::StrataResult;
use crate::layer::Layer;
use crate::layering::Layered;
use crate::options::{Options, OptionsConfig};
use crate::scope::{
    SCOPE_PRIORITY_ORG, SCOPE_PRIORITY_SYSTEM, SCOPE_PRIORITY_TEAM, SCOPE_PRIORITY_TENANT,
    SCOPE_PRIORITY_USER, Scope,
};

use super::Stack;

/// Merge five snapshots using the built-in scope priorities.
///
/// # Errors
///
/// Never fails for the built-in scopes; the `Result` mirrors
/// [`Stack::merge`].
///
/// # Examples
///
/// ```
/// use strata::system_tenant_org_team_user;
///
/// let options = system_tenant_org_team_user(1_u32, 2, 3, 4, 5)?;
/// assert_eq!(*options.value(), 5);
/// assert_eq!(options.layers()[0].scope().label(), "User");
/// # Ok::<(), strata::StrataError>(())
/// ```
pub fn system_tenant_org_team_user<T: Layered>(
    system: T,
    tenant: T,
    org: T,
    team: T,
    user: T,
) -> StrataResult<Options<T>> {
    let stack = Stack::new(vec![
        Layer::new(Scope::new("user", SCOPE_PRIORITY_USER).with_label("User"), user),
        Layer::new(Scope::new("team", SCOPE_PRIORITY_TEAM).with_label("Team"), team),
        Layer::new(
            Scope::new("org", SCOPE_PRIORITY_ORG).with_label("Organization"),
            org,
        ),
        Layer::new(
            Scope::new("tenant", SCOPE_PRIORITY_TENANT).with_label("Tenant"),
            tenant,
        ),
        Layer::new(
            Scope::new("system", SCOPE_PRIORITY_SYSTEM).with_label("System Defaults"),
            system,
        ),
    ])?;
    stack.merge(OptionsConfig::default())
}
