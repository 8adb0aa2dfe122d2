//! Directory Traits
//!
//! The boundary to the hosted backend. The admission pipeline only ever
//! reads through these traits; nothing in the core mutates tenant data.

use async_trait::async_trait;

use crate::membership::Role;
use crate::model::{Tenant, TenantId, UserId};

/// Directory lookup error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable or returned a transport-level failure
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// Backend returned a row the model cannot represent
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<StoreError> for glowdesk_common::GlowError {
    fn from(err: StoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

/// Tenant lookups, keyed on the unique slug
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Fetch a tenant row by slug. `Ok(None)` means no such tenant.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError>;
}

/// Membership lookups
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Fetch the single role for the (user, tenant) pair, if any.
    async fn find_role(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Option<Role>, StoreError>;
}

/// Profile lookups for the platform-wide super-admin check
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Fetch the platform-level role on the user's profile row, if any.
    async fn platform_role(&self, user_id: UserId) -> Result<Option<Role>, StoreError>;
}
