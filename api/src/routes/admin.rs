//! Tenant admin area
//!
//! `/admin` and `/admin/appointments` are the staff subtree;
//! `/admin/settings` and `/admin/staff` sit in the admin-only subtree.
//! The guard has already admitted the caller by the time these run.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use glowdesk_gateway::{Guarded, RequestContext};
use glowdesk_tenant::Tenant;

use crate::models::{Appointment, DashboardView, SalonCard, SettingsView};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/appointments", get(list_appointments))
        .route("/admin/settings", get(settings))
        .route("/admin/staff", get(staff))
}

fn admitted_tenant(context: &RequestContext) -> Result<&Tenant, StatusCode> {
    // The guard attaches a tenant to every admitted admin request;
    // reaching this without one is a wiring bug.
    context
        .tenant
        .as_ref()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Staff landing page: the always-permitted area inside the tenant
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Admin dashboard", body = DashboardView),
        (status = 307, description = "Redirected by the route guard")
    ),
    tag = "admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Guarded(context): Guarded,
) -> Result<Json<DashboardView>, StatusCode> {
    let tenant = admitted_tenant(&context)?;
    let viewer = context.user.as_ref().ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    let role = context.role.ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let appointments_today = state
        .appointments
        .read()
        .iter()
        .filter(|a| a.tenant_id == tenant.tenant_id)
        .count();

    Ok(Json(DashboardView {
        salon: SalonCard::from_tenant(tenant),
        viewer_email: viewer.email.clone(),
        viewer_role: role.as_str().to_string(),
        appointments_today,
    }))
}

/// Appointment book for the salon
pub async fn list_appointments(
    State(state): State<AppState>,
    Guarded(context): Guarded,
) -> Result<Json<Vec<Appointment>>, StatusCode> {
    let tenant = admitted_tenant(&context)?;

    let appointments = state
        .appointments
        .read()
        .iter()
        .filter(|a| a.tenant_id == tenant.tenant_id)
        .cloned()
        .collect();

    Ok(Json(appointments))
}

/// Salon settings (admin-only subtree)
pub async fn settings(Guarded(context): Guarded) -> Result<Json<SettingsView>, StatusCode> {
    let tenant = admitted_tenant(&context)?;

    Ok(Json(SettingsView {
        salon: SalonCard::from_tenant(tenant),
        plan: format!("{:?}", tenant.plan).to_lowercase(),
        status: format!("{:?}", tenant.status).to_lowercase(),
    }))
}

/// Staff overview (admin-only subtree)
pub async fn staff(
    State(state): State<AppState>,
    Guarded(context): Guarded,
) -> Result<Json<Vec<String>>, StatusCode> {
    let tenant = admitted_tenant(&context)?;

    // Distinct staff names drawn from the appointment book.
    let mut names: Vec<String> = state
        .appointments
        .read()
        .iter()
        .filter(|a| a.tenant_id == tenant.tenant_id)
        .map(|a| a.staff.clone())
        .collect();
    names.sort();
    names.dedup();

    Ok(Json(names))
}
