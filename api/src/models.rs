//! API Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use glowdesk_tenant::Tenant;

/// Standard API response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// ============ Auth ============

/// Login request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Where to return the user after authenticating
    pub next: Option<String>,
}

/// Login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub email: String,
    pub next: String,
}

// ============ Storefront ============

/// What the root path renders: the marketing site, or a salon storefront
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StorefrontView {
    /// Salon branding when a tenant hostname resolves
    pub salon: Option<SalonCard>,
    /// Marketing headline otherwise
    pub headline: String,
}

/// Public salon card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalonCard {
    pub name: String,
    pub slug: String,
    pub locale: String,
    pub features: Vec<String>,
}

impl SalonCard {
    pub fn from_tenant(tenant: &Tenant) -> Self {
        Self {
            name: tenant.name.clone(),
            slug: tenant.slug.clone(),
            locale: tenant.locale.clone(),
            features: tenant
                .plan
                .features()
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

// ============ Tenant admin ============

/// Admin dashboard payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub salon: SalonCard,
    pub viewer_email: String,
    pub viewer_role: String,
    pub appointments_today: usize,
}

/// Appointment row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    #[serde(skip)]
    pub tenant_id: Uuid,
    pub customer_name: String,
    pub service: String,
    pub staff: String,
    pub starts_at: DateTime<Utc>,
}

/// Salon settings payload (admin-only subtree)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettingsView {
    pub salon: SalonCard,
    pub plan: String,
    pub status: String,
}

// ============ Platform console ============

/// Tenant summary row for the platform console
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TenantSummary {
    pub tenant_id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: String,
    pub plan: String,
    pub serving: bool,
    pub created_at: DateTime<Utc>,
}

impl TenantSummary {
    pub fn from_tenant(tenant: &Tenant) -> Self {
        Self {
            tenant_id: tenant.tenant_id,
            name: tenant.name.clone(),
            slug: tenant.slug.clone(),
            status: format!("{:?}", tenant.status).to_lowercase(),
            plan: format!("{:?}", tenant.plan).to_lowercase(),
            serving: tenant.is_serving(),
            created_at: tenant.created_at,
        }
    }
}

/// Console overview
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConsoleOverview {
    pub operator_email: String,
    pub tenant_count: usize,
}

/// Salon approval request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApproveTenantRequest {
    pub name: String,
    pub slug: String,
    pub plan: PlanChoice,
}

/// Plan selector for approvals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanChoice {
    Starter,
    Pro,
    Enterprise,
}

impl From<PlanChoice> for glowdesk_tenant::SubscriptionPlan {
    fn from(choice: PlanChoice) -> Self {
        match choice {
            PlanChoice::Starter => Self::Starter,
            PlanChoice::Pro => Self::Pro,
            PlanChoice::Enterprise => Self::Enterprise,
        }
    }
}

// ============ Webhooks ============

/// Webhook acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
    pub source: String,
    /// Always false: webhook paths bypass tenant resolution
    pub tenant_attached: bool,
}
