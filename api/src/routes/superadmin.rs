//! Platform super-admin console
//!
//! Tenant-independent: the flat super-admin check has already run.
//! Lifecycle actions here are the platform approval/suspension flow
//! that tenants go through.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use glowdesk_gateway::Guarded;
use glowdesk_tenant::registry::LifecycleError;

use crate::models::{ApiResponse, ApproveTenantRequest, ConsoleOverview, TenantSummary};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/superadmin", get(overview))
        .route("/superadmin/dashboard", get(overview))
        .route("/superadmin/tenants", get(list_tenants).post(approve_tenant))
        .route("/superadmin/tenants/:slug/suspend", post(suspend_tenant))
        .route("/superadmin/tenants/:slug/reactivate", post(reactivate_tenant))
}

/// Console overview
pub async fn overview(
    State(state): State<AppState>,
    Guarded(context): Guarded,
) -> Result<Json<ConsoleOverview>, StatusCode> {
    let operator = context.user.as_ref().ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(ConsoleOverview {
        operator_email: operator.email.clone(),
        tenant_count: state.registry.count(),
    }))
}

/// All tenants on the platform
#[utoipa::path(
    get,
    path = "/superadmin/tenants",
    responses(
        (status = 200, description = "Tenant list", body = Vec<TenantSummary>),
        (status = 307, description = "Redirected by the platform guard")
    ),
    tag = "superadmin"
)]
pub async fn list_tenants(State(state): State<AppState>) -> Json<Vec<TenantSummary>> {
    let mut tenants: Vec<TenantSummary> = state
        .registry
        .list()
        .iter()
        .map(TenantSummary::from_tenant)
        .collect();
    tenants.sort_by(|a, b| a.slug.cmp(&b.slug));
    Json(tenants)
}

/// Approve a salon onto the platform
pub async fn approve_tenant(
    State(state): State<AppState>,
    Json(input): Json<ApproveTenantRequest>,
) -> Result<(StatusCode, Json<TenantSummary>), (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .registry
        .approve(&input.name, &input.slug, input.plan.into())
    {
        Ok(tenant) => Ok((StatusCode::CREATED, Json(TenantSummary::from_tenant(&tenant)))),
        Err(err) => Err(lifecycle_rejection(err)),
    }
}

/// Suspend a tenant
pub async fn suspend_tenant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .registry
        .suspend(&slug)
        .map(|()| Json(ApiResponse::success(())))
        .map_err(lifecycle_rejection)
}

/// Reactivate a suspended tenant
pub async fn reactivate_tenant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .registry
        .reactivate(&slug)
        .map(|()| Json(ApiResponse::success(())))
        .map_err(lifecycle_rejection)
}

fn lifecycle_rejection(err: LifecycleError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &err {
        LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
        LifecycleError::SlugTaken(_) => StatusCode::CONFLICT,
        LifecycleError::InvalidSlug(_) => StatusCode::BAD_REQUEST,
        LifecycleError::HasMembers(_) => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ApiResponse::error("lifecycle_error", &err.to_string())),
    )
}
