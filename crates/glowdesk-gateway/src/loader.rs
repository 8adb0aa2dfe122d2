//! Tenant Loader
//!
//! Fetches the tenant row for a resolved slug. Every failure mode
//! (not found, storage error, timeout, suspended, kill-switched) collapses
//! to `None`: the caller cannot distinguish them, and access is denied
//! fail-closed. The distinctions survive in the logs.

use std::sync::Arc;
use std::time::Duration;

use glowdesk_tenant::{Tenant, TenantDirectory};

/// Tenant loader with a bounded lookup
#[derive(Clone)]
pub struct TenantLoader {
    directory: Arc<dyn TenantDirectory>,
    timeout: Duration,
}

impl TenantLoader {
    /// Wrap a tenant directory with the configured time bound
    pub fn new(directory: Arc<dyn TenantDirectory>, timeout: Duration) -> Self {
        Self { directory, timeout }
    }

    /// Load the serving tenant for a slug, or `None`.
    pub async fn load(&self, slug: Option<&str>) -> Option<Tenant> {
        let slug = slug?;

        let row = match tokio::time::timeout(self.timeout, self.directory.find_by_slug(slug)).await
        {
            Err(_) => {
                tracing::warn!(slug, "tenant lookup timed out");
                return None;
            }
            Ok(Err(err)) => {
                tracing::warn!(slug, error = %err, "tenant lookup failed");
                return None;
            }
            Ok(Ok(row)) => row?,
        };

        // Status and kill-switch each deny independently.
        if !row.is_serving() {
            tracing::debug!(slug, status = ?row.status, is_active = row.is_active, "tenant not serving");
            return None;
        }

        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use glowdesk_tenant::{StoreError, SubscriptionPlan, TenantRegistry};

    struct DownDirectory;

    #[async_trait]
    impl TenantDirectory for DownDirectory {
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Tenant>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    struct StalledDirectory;

    #[async_trait]
    impl TenantDirectory for StalledDirectory {
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Tenant>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    fn seeded_registry() -> Arc<TenantRegistry> {
        let registry = TenantRegistry::new();
        registry
            .approve("Royal Beauty Lounge", "royal", SubscriptionPlan::Pro)
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_load_serving_tenant() {
        let loader = TenantLoader::new(seeded_registry(), Duration::from_secs(1));
        let tenant = loader.load(Some("royal")).await;
        assert_eq!(tenant.unwrap().slug, "royal");
    }

    #[tokio::test]
    async fn test_no_slug_no_lookup() {
        let loader = TenantLoader::new(seeded_registry(), Duration::from_secs(1));
        assert!(loader.load(None).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_slug() {
        let loader = TenantLoader::new(seeded_registry(), Duration::from_secs(1));
        assert!(loader.load(Some("unknown")).await.is_none());
    }

    #[tokio::test]
    async fn test_suspended_tenant_denied() {
        let registry = seeded_registry();
        registry.suspend("royal").unwrap();

        let loader = TenantLoader::new(registry, Duration::from_secs(1));
        assert!(loader.load(Some("royal")).await.is_none());
    }

    #[tokio::test]
    async fn test_kill_switch_denied() {
        let registry = seeded_registry();
        registry.set_kill_switch("royal", false).unwrap();

        let loader = TenantLoader::new(registry, Duration::from_secs(1));
        assert!(loader.load(Some("royal")).await.is_none());
    }

    #[tokio::test]
    async fn test_storage_error_swallowed() {
        let loader = TenantLoader::new(Arc::new(DownDirectory), Duration::from_secs(1));
        assert!(loader.load(Some("royal")).await.is_none());
    }

    #[tokio::test]
    async fn test_stalled_lookup_fails_closed() {
        let loader = TenantLoader::new(Arc::new(StalledDirectory), Duration::from_millis(50));
        assert!(loader.load(Some("royal")).await.is_none());
    }
}
