//! Route Classification
//!
//! Maps a request path to its route group by literal path-prefix, first
//! match wins. Webhook and platform paths bypass tenant resolution
//! entirely so a spoofed tenant header can never leak into them.

use glowdesk_tenant::Role;

/// Webhook endpoints: tenant-independent, never guarded.
pub const WEBHOOK_PREFIXES: &[&str] = &["/api/webhooks"];

/// Login pages: a protected area's own login sub-path is never guarded
/// by that area.
pub const AUTH_PREFIXES: &[&str] = &["/admin/login", "/superadmin/login"];

/// Platform super-admin console.
pub const PLATFORM_PREFIX: &str = "/superadmin";

/// Admin-only subtree of the tenant admin area.
pub const ADMIN_ONLY_PREFIXES: &[&str] = &["/admin/settings", "/admin/staff", "/admin/billing"];

/// Tenant admin area root; the always-permitted staff landing page.
pub const STAFF_PREFIX: &str = "/admin";

/// Route group: a set of paths sharing one authorization requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    /// System webhook endpoints; tenant resolution bypassed
    Webhook,
    /// Login pages
    Auth,
    /// Platform super-admin console; tenant-independent
    Platform,
    /// Tenant admin area, admin-only subtree
    TenantAdminOnly,
    /// Tenant admin area, staff subtree
    TenantStaff,
    /// Marketing site and tenant storefront
    Public,
}

impl RouteGroup {
    /// Classify a request path. First matching prefix wins.
    pub fn classify(path: &str) -> Self {
        if WEBHOOK_PREFIXES.iter().any(|p| has_prefix(path, p)) {
            return Self::Webhook;
        }
        if AUTH_PREFIXES.iter().any(|p| has_prefix(path, p)) {
            return Self::Auth;
        }
        if has_prefix(path, PLATFORM_PREFIX) {
            return Self::Platform;
        }
        if ADMIN_ONLY_PREFIXES.iter().any(|p| has_prefix(path, p)) {
            return Self::TenantAdminOnly;
        }
        if has_prefix(path, STAFF_PREFIX) {
            return Self::TenantStaff;
        }
        Self::Public
    }

    /// Whether tenant resolution should be attempted at all for this
    /// group. Excluded paths never get a tenant context attached, even
    /// when the host would resolve to a valid slug.
    pub fn resolves_tenant(&self) -> bool {
        !matches!(self, Self::Webhook | Self::Platform)
    }

    /// Whether the group refuses to render without a tenant
    pub fn requires_tenant(&self) -> bool {
        matches!(self, Self::TenantAdminOnly | Self::TenantStaff)
    }

    /// Whether the group refuses to render without an identity session
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Self::TenantAdminOnly | Self::TenantStaff | Self::Platform
        )
    }

    /// Roles admitted into this group
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::TenantAdminOnly => &[Role::Owner, Role::Admin],
            Self::TenantStaff => &[Role::Owner, Role::Admin, Role::Secretary],
            Self::Platform => &[Role::SuperAdmin],
            _ => &[],
        }
    }

    /// Login page for this group
    pub fn login_path(&self) -> &'static str {
        match self {
            Self::Platform => "/superadmin/login",
            _ => "/admin/login",
        }
    }

    /// Narrower, always-permitted landing page inside the tenant
    pub fn landing_path(&self) -> &'static str {
        STAFF_PREFIX
    }
}

/// Segment-aware prefix match: `/admin` covers `/admin` and `/admin/x`
/// but not `/administrator`.
fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_order() {
        assert_eq!(RouteGroup::classify("/api/webhooks/x"), RouteGroup::Webhook);
        assert_eq!(RouteGroup::classify("/admin/login"), RouteGroup::Auth);
        assert_eq!(RouteGroup::classify("/superadmin/login"), RouteGroup::Auth);
        assert_eq!(
            RouteGroup::classify("/superadmin/dashboard"),
            RouteGroup::Platform
        );
        assert_eq!(
            RouteGroup::classify("/admin/settings"),
            RouteGroup::TenantAdminOnly
        );
        assert_eq!(
            RouteGroup::classify("/admin/staff/invite"),
            RouteGroup::TenantAdminOnly
        );
        assert_eq!(RouteGroup::classify("/admin"), RouteGroup::TenantStaff);
        assert_eq!(
            RouteGroup::classify("/admin/appointments"),
            RouteGroup::TenantStaff
        );
        assert_eq!(RouteGroup::classify("/"), RouteGroup::Public);
        assert_eq!(RouteGroup::classify("/book"), RouteGroup::Public);
    }

    #[test]
    fn test_prefix_is_segment_aware() {
        assert_eq!(RouteGroup::classify("/administrator"), RouteGroup::Public);
        assert_eq!(RouteGroup::classify("/admin-tools"), RouteGroup::Public);
        assert_eq!(
            RouteGroup::classify("/api/webhookstore"),
            RouteGroup::Public
        );
    }

    #[test]
    fn test_webhooks_bypass_tenant_resolution() {
        assert!(!RouteGroup::Webhook.resolves_tenant());
        assert!(!RouteGroup::Platform.resolves_tenant());
        assert!(RouteGroup::TenantStaff.resolves_tenant());
        assert!(RouteGroup::Public.resolves_tenant());
    }

    #[test]
    fn test_allow_lists() {
        assert!(RouteGroup::TenantAdminOnly
            .allowed_roles()
            .contains(&Role::Admin));
        assert!(!RouteGroup::TenantAdminOnly
            .allowed_roles()
            .contains(&Role::Secretary));
        assert!(RouteGroup::TenantStaff
            .allowed_roles()
            .contains(&Role::Secretary));
        assert!(!RouteGroup::TenantStaff
            .allowed_roles()
            .contains(&Role::Customer));
        assert_eq!(RouteGroup::Platform.allowed_roles(), &[Role::SuperAdmin]);
    }
}
