//! Tenant Data Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant ID
pub type TenantId = Uuid;

/// User ID
pub type UserId = Uuid;

/// Tenant definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant ID
    pub tenant_id: TenantId,
    /// Display name of the salon
    pub name: String,
    /// Unique, immutable slug. The tenant is addressable only through it.
    pub slug: String,
    /// Lifecycle status
    pub status: TenantStatus,
    /// Manual kill-switch, authoritative alongside `status`
    pub is_active: bool,
    /// Subscription plan
    pub plan: SubscriptionPlan,
    /// BCP 47 locale for the storefront
    pub locale: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a new active tenant. The slug must already be validated.
    pub fn new(name: &str, slug: &str, plan: SubscriptionPlan) -> Self {
        Self {
            tenant_id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            status: TenantStatus::Active,
            is_active: true,
            plan,
            locale: "en-US".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Whether the tenant serves traffic. Both the lifecycle status and
    /// the kill-switch must pass; either can independently deny.
    pub fn is_serving(&self) -> bool {
        self.status == TenantStatus::Active && self.is_active
    }

    /// Check if a feature is included in this tenant's plan
    pub fn has_feature(&self, feature: &str) -> bool {
        self.plan.features().contains(&feature)
    }
}

/// Validate a tenant slug: non-empty, lowercase ASCII alphanumeric or `-`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Tenant lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    /// Awaiting platform approval
    Pending,
    /// Serving traffic
    Active,
    /// Suspended (billing or policy)
    Suspended,
    /// Being wound down
    Offboarding,
}

/// Subscription plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Starter,
    Pro,
    Enterprise,
}

impl SubscriptionPlan {
    /// Get features for the plan
    pub fn features(&self) -> Vec<&'static str> {
        match self {
            Self::Starter => vec!["online_booking", "staff_calendar"],
            Self::Pro => vec![
                "online_booking",
                "staff_calendar",
                "online_shop",
                "sms_reminders",
                "priority_support",
            ],
            Self::Enterprise => vec![
                "online_booking",
                "staff_calendar",
                "online_shop",
                "sms_reminders",
                "custom_branding",
                "multi_location",
                "api_access",
                "dedicated_support",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_creation() {
        let tenant = Tenant::new("Royal Beauty Lounge", "royal", SubscriptionPlan::Pro);

        assert_eq!(tenant.slug, "royal");
        assert!(tenant.is_serving());
        assert!(tenant.has_feature("online_shop"));
        assert!(!tenant.has_feature("multi_location"));
    }

    #[test]
    fn test_serving_requires_both_flags() {
        let mut tenant = Tenant::new("Luxe Nails", "luxe", SubscriptionPlan::Starter);

        tenant.status = TenantStatus::Suspended;
        assert!(!tenant.is_serving());

        tenant.status = TenantStatus::Active;
        tenant.is_active = false;
        assert!(!tenant.is_serving());
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("royal"));
        assert!(is_valid_slug("luxe-nails-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Royal"));
        assert!(!is_valid_slug("salon.one"));
    }
}
