//! Tenant Lifecycle Management
//!
//! In-memory registry backing the directory traits, plus the platform
//! operations that move a tenant through its lifecycle.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::membership::{Membership, Role};
use crate::model::{is_valid_slug, SubscriptionPlan, Tenant, TenantId, TenantStatus, UserId};
use crate::store::{MembershipDirectory, ProfileDirectory, StoreError, TenantDirectory};

/// Tenant registry
pub struct TenantRegistry {
    /// Tenants by slug
    tenants: Arc<RwLock<HashMap<String, Tenant>>>,
    /// Memberships by (tenant, user)
    memberships: Arc<RwLock<HashMap<(TenantId, UserId), Membership>>>,
    /// Platform-level profile roles
    profiles: Arc<RwLock<HashMap<UserId, Role>>>,
}

impl TenantRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tenants: Arc::new(RwLock::new(HashMap::new())),
            memberships: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Approve a salon onto the platform. The slug is immutable afterwards.
    pub fn approve(
        &self,
        name: &str,
        slug: &str,
        plan: SubscriptionPlan,
    ) -> Result<Tenant, LifecycleError> {
        if !is_valid_slug(slug) {
            return Err(LifecycleError::InvalidSlug(slug.to_string()));
        }

        let mut tenants = self.tenants.write();
        if tenants.contains_key(slug) {
            return Err(LifecycleError::SlugTaken(slug.to_string()));
        }

        let tenant = Tenant::new(name, slug, plan);
        tenants.insert(slug.to_string(), tenant.clone());

        tracing::info!(slug, tenant_id = %tenant.tenant_id, "tenant approved");
        Ok(tenant)
    }

    /// Suspend a tenant
    pub fn suspend(&self, slug: &str) -> Result<(), LifecycleError> {
        self.with_tenant(slug, |t| t.status = TenantStatus::Suspended)
    }

    /// Reactivate a suspended tenant
    pub fn reactivate(&self, slug: &str) -> Result<(), LifecycleError> {
        self.with_tenant(slug, |t| t.status = TenantStatus::Active)
    }

    /// Flip the manual kill-switch, independent of lifecycle status
    pub fn set_kill_switch(&self, slug: &str, serving: bool) -> Result<(), LifecycleError> {
        self.with_tenant(slug, |t| t.is_active = serving)
    }

    /// Remove a tenant. Refused while any membership still references it.
    pub fn remove(&self, slug: &str) -> Result<(), LifecycleError> {
        let mut tenants = self.tenants.write();
        let tenant = tenants
            .get(slug)
            .ok_or_else(|| LifecycleError::NotFound(slug.to_string()))?;

        let tenant_id = tenant.tenant_id;
        let has_members = self
            .memberships
            .read()
            .keys()
            .any(|(tid, _)| *tid == tenant_id);
        if has_members {
            return Err(LifecycleError::HasMembers(slug.to_string()));
        }

        tenants.remove(slug);
        Ok(())
    }

    /// Assign a role within a tenant. Replaces any existing role for the
    /// (user, tenant) pair.
    pub fn assign(&self, slug: &str, user_id: UserId, role: Role) -> Result<(), LifecycleError> {
        let tenant_id = {
            let tenants = self.tenants.read();
            tenants
                .get(slug)
                .map(|t| t.tenant_id)
                .ok_or_else(|| LifecycleError::NotFound(slug.to_string()))?
        };

        self.memberships
            .write()
            .insert((tenant_id, user_id), Membership::new(tenant_id, user_id, role));
        Ok(())
    }

    /// Set the platform-level role on a user's profile
    pub fn set_platform_role(&self, user_id: UserId, role: Role) {
        self.profiles.write().insert(user_id, role);
    }

    /// Get a tenant by slug
    pub fn get(&self, slug: &str) -> Option<Tenant> {
        self.tenants.read().get(slug).cloned()
    }

    /// List all tenants
    pub fn list(&self) -> Vec<Tenant> {
        self.tenants.read().values().cloned().collect()
    }

    /// Number of registered tenants
    pub fn count(&self) -> usize {
        self.tenants.read().len()
    }

    fn with_tenant(
        &self,
        slug: &str,
        mutate: impl FnOnce(&mut Tenant),
    ) -> Result<(), LifecycleError> {
        let mut tenants = self.tenants.write();
        let tenant = tenants
            .get_mut(slug)
            .ok_or_else(|| LifecycleError::NotFound(slug.to_string()))?;
        mutate(tenant);
        Ok(())
    }
}

impl Default for TenantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantDirectory for TenantRegistry {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        Ok(self.tenants.read().get(slug).cloned())
    }
}

#[async_trait]
impl MembershipDirectory for TenantRegistry {
    async fn find_role(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Option<Role>, StoreError> {
        Ok(self
            .memberships
            .read()
            .get(&(tenant_id, user_id))
            .map(|m| m.role))
    }
}

#[async_trait]
impl ProfileDirectory for TenantRegistry {
    async fn platform_role(&self, user_id: UserId) -> Result<Option<Role>, StoreError> {
        Ok(self.profiles.read().get(&user_id).copied())
    }
}

/// Lifecycle operation error
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// No tenant with that slug
    #[error("tenant not found: {0}")]
    NotFound(String),
    /// Slug already assigned; slugs are globally unique
    #[error("slug already taken: {0}")]
    SlugTaken(String),
    /// Slug failed validation
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
    /// Tenant still referenced by memberships
    #[error("tenant has active memberships: {0}")]
    HasMembers(String),
}
