//! Request Context
//!
//! The resolved `{tenant, user, role}` attached to an admitted request.
//! Resolved once at the boundary and passed explicitly; handlers never
//! re-read ambient headers.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glowdesk_tenant::{Role, Tenant};

/// Authenticated user identity, opaque beyond its identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    /// Stable user id
    pub user_id: Uuid,
    /// Login email
    pub email: String,
}

/// Identity resolved by the session refresher, present on every request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<UserIdentity>);

/// Resolved per-request context. Never persisted; recomputed every request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Tenant serving this hostname, if any
    pub tenant: Option<Tenant>,
    /// Authenticated caller, if any
    pub user: Option<UserIdentity>,
    /// Caller's role for this tenant (or the platform), if resolved
    pub role: Option<Role>,
}

impl RequestContext {
    /// Context with nothing resolved (webhooks, anonymous visitors)
    pub fn anonymous() -> Self {
        Self {
            tenant: None,
            user: None,
            role: None,
        }
    }

    /// Fully admitted tenant member
    pub fn member(tenant: Tenant, user: UserIdentity, role: Role) -> Self {
        Self {
            tenant: Some(tenant),
            user: Some(user),
            role: Some(role),
        }
    }

    /// Admitted platform operator; never tenant-scoped
    pub fn platform(user: UserIdentity) -> Self {
        Self {
            tenant: None,
            user: Some(user),
            role: Some(Role::SuperAdmin),
        }
    }
}

/// Extractor for the admitted context.
///
/// Guarded handlers take `Guarded(context)`; running one without the
/// guard middleware in front is a wiring bug, surfaced as a 500.
pub struct Guarded(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Guarded
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Guarded)
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
