//! Route Guard
//!
//! The composed admission decision: tenant, identity, membership role,
//! allow-list. Returns `Result<RequestContext, GuardDenial>` and leaves
//! redirect policy to the boundary layer.

use std::sync::Arc;
use std::time::Duration;

use glowdesk_tenant::{MembershipDirectory, ProfileDirectory, Role, Tenant, TenantDirectory};
use glowdesk_tenant::{TenantId, UserId};

use crate::context::{RequestContext, UserIdentity};
use crate::loader::TenantLoader;
use crate::routes::RouteGroup;

/// Why a request was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDenial {
    /// No tenant resolvable, or the tenant is absent/not serving
    NoTenant,
    /// No authenticated identity session
    NoSession,
    /// Identity is valid but holds no membership for this tenant
    NoMembership,
    /// Member, but the role is outside the group's allow-list
    InsufficientRole {
        /// The role the caller actually holds
        role: Role,
    },
}

/// The composed route guard
pub struct RouteGuard {
    loader: TenantLoader,
    memberships: Arc<dyn MembershipDirectory>,
    profiles: Arc<dyn ProfileDirectory>,
    timeout: Duration,
}

impl RouteGuard {
    /// Build a guard over the three directories
    pub fn new(
        tenants: Arc<dyn TenantDirectory>,
        memberships: Arc<dyn MembershipDirectory>,
        profiles: Arc<dyn ProfileDirectory>,
        timeout: Duration,
    ) -> Self {
        Self {
            loader: TenantLoader::new(tenants, timeout),
            memberships,
            profiles,
            timeout,
        }
    }

    /// Load the serving tenant for a slug (for unguarded storefront pages)
    pub async fn resolve_tenant(&self, slug: Option<&str>) -> Option<Tenant> {
        self.loader.load(slug).await
    }

    /// Admission state machine for the tenant route groups.
    ///
    /// Each step is terminal on failure; each lookup depends on the
    /// previous step's output, so they run strictly in sequence.
    pub async fn admit_tenant(
        &self,
        group: RouteGroup,
        slug: Option<&str>,
        user: Option<UserIdentity>,
    ) -> Result<RequestContext, GuardDenial> {
        if group.requires_tenant() && slug.is_none() {
            return Err(GuardDenial::NoTenant);
        }

        let user = user.ok_or(GuardDenial::NoSession)?;

        let tenant = self
            .loader
            .load(slug)
            .await
            .ok_or(GuardDenial::NoTenant)?;

        // A valid global identity with no membership here is treated as
        // unauthenticated for this tenant.
        let role = self
            .member_role(tenant.tenant_id, user.user_id)
            .await
            .ok_or(GuardDenial::NoMembership)?;

        if !group.allowed_roles().contains(&role) {
            return Err(GuardDenial::InsufficientRole { role });
        }

        Ok(RequestContext::member(tenant, user, role))
    }

    /// Flat two-state check for the platform super-admin console.
    /// No tenant resolution; profile role must equal `SuperAdmin`.
    pub async fn admit_platform(
        &self,
        user: Option<UserIdentity>,
    ) -> Result<RequestContext, GuardDenial> {
        let user = user.ok_or(GuardDenial::NoSession)?;

        match self.profile_role(user.user_id).await {
            Some(Role::SuperAdmin) => Ok(RequestContext::platform(user)),
            Some(role) => Err(GuardDenial::InsufficientRole { role }),
            None => Err(GuardDenial::NoMembership),
        }
    }

    async fn member_role(&self, tenant_id: TenantId, user_id: UserId) -> Option<Role> {
        match tokio::time::timeout(self.timeout, self.memberships.find_role(tenant_id, user_id))
            .await
        {
            Err(_) => {
                tracing::warn!(%tenant_id, %user_id, "membership lookup timed out");
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(%tenant_id, %user_id, error = %err, "membership lookup failed");
                None
            }
            Ok(Ok(role)) => role,
        }
    }

    async fn profile_role(&self, user_id: UserId) -> Option<Role> {
        match tokio::time::timeout(self.timeout, self.profiles.platform_role(user_id)).await {
            Err(_) => {
                tracing::warn!(%user_id, "profile lookup timed out");
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(%user_id, error = %err, "profile lookup failed");
                None
            }
            Ok(Ok(role)) => role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowdesk_tenant::{SubscriptionPlan, TenantRegistry};
    use uuid::Uuid;

    fn identity(email: &str) -> UserIdentity {
        UserIdentity {
            user_id: Uuid::new_v4(),
            email: email.into(),
        }
    }

    fn guard_over(registry: Arc<TenantRegistry>) -> RouteGuard {
        RouteGuard::new(
            registry.clone(),
            registry.clone(),
            registry,
            Duration::from_secs(1),
        )
    }

    fn seeded() -> Arc<TenantRegistry> {
        let registry = TenantRegistry::new();
        registry
            .approve("Royal Beauty Lounge", "royal", SubscriptionPlan::Pro)
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_full_admission() {
        let registry = seeded();
        let owner = identity("dana@royal.example");
        registry
            .assign("royal", owner.user_id, Role::Owner)
            .unwrap();

        let guard = guard_over(registry);
        let ctx = guard
            .admit_tenant(RouteGroup::TenantAdminOnly, Some("royal"), Some(owner))
            .await
            .unwrap();

        assert_eq!(ctx.tenant.unwrap().slug, "royal");
        assert_eq!(ctx.role, Some(Role::Owner));
    }

    #[tokio::test]
    async fn test_no_slug_is_terminal() {
        let guard = guard_over(seeded());
        let result = guard
            .admit_tenant(RouteGroup::TenantStaff, None, Some(identity("x@y.z")))
            .await;
        assert_eq!(result.unwrap_err(), GuardDenial::NoTenant);
    }

    #[tokio::test]
    async fn test_no_session_is_terminal() {
        let guard = guard_over(seeded());
        let result = guard
            .admit_tenant(RouteGroup::TenantStaff, Some("royal"), None)
            .await;
        assert_eq!(result.unwrap_err(), GuardDenial::NoSession);
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_terminal() {
        let guard = guard_over(seeded());
        let result = guard
            .admit_tenant(
                RouteGroup::TenantStaff,
                Some("unknown"),
                Some(identity("x@y.z")),
            )
            .await;
        assert_eq!(result.unwrap_err(), GuardDenial::NoTenant);
    }

    #[tokio::test]
    async fn test_suspended_tenant_matches_not_found() {
        let registry = seeded();
        registry.suspend("royal").unwrap();

        let guard = guard_over(registry);
        let result = guard
            .admit_tenant(
                RouteGroup::TenantStaff,
                Some("royal"),
                Some(identity("x@y.z")),
            )
            .await;
        assert_eq!(result.unwrap_err(), GuardDenial::NoTenant);
    }

    #[tokio::test]
    async fn test_valid_identity_without_membership() {
        let guard = guard_over(seeded());
        let result = guard
            .admit_tenant(
                RouteGroup::TenantStaff,
                Some("royal"),
                Some(identity("stranger@elsewhere.example")),
            )
            .await;
        assert_eq!(result.unwrap_err(), GuardDenial::NoMembership);
    }

    #[tokio::test]
    async fn test_allow_list_enforced_for_every_outside_role() {
        let registry = seeded();
        let guard = guard_over(registry.clone());

        // No role outside the allow-list is ever admitted.
        for role in [Role::Secretary, Role::Customer] {
            let user = identity("staff@royal.example");
            registry.assign("royal", user.user_id, role).unwrap();

            let result = guard
                .admit_tenant(RouteGroup::TenantAdminOnly, Some("royal"), Some(user))
                .await;
            assert_eq!(result.unwrap_err(), GuardDenial::InsufficientRole { role });
        }
    }

    #[tokio::test]
    async fn test_secretary_admitted_to_staff_area() {
        let registry = seeded();
        let user = identity("desk@royal.example");
        registry
            .assign("royal", user.user_id, Role::Secretary)
            .unwrap();

        let guard = guard_over(registry);
        let ctx = guard
            .admit_tenant(RouteGroup::TenantStaff, Some("royal"), Some(user))
            .await
            .unwrap();
        assert_eq!(ctx.role, Some(Role::Secretary));
    }

    #[tokio::test]
    async fn test_platform_check_is_flat() {
        let registry = Arc::new(TenantRegistry::new());
        let operator = identity("ops@glowdesk.app");
        registry.set_platform_role(operator.user_id, Role::SuperAdmin);

        let guard = guard_over(registry);

        let ctx = guard.admit_platform(Some(operator)).await.unwrap();
        assert!(ctx.tenant.is_none());
        assert_eq!(ctx.role, Some(Role::SuperAdmin));

        assert_eq!(
            guard.admit_platform(None).await.unwrap_err(),
            GuardDenial::NoSession
        );
    }

    #[tokio::test]
    async fn test_tenant_owner_is_not_platform_operator() {
        let registry = Arc::new(TenantRegistry::new());
        let owner = identity("dana@royal.example");
        registry.set_platform_role(owner.user_id, Role::Owner);

        let guard = guard_over(registry);
        let result = guard.admit_platform(Some(owner)).await;
        assert_eq!(
            result.unwrap_err(),
            GuardDenial::InsufficientRole { role: Role::Owner }
        );
    }
}
