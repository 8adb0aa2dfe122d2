//! Storefront endpoints
//!
//! The root path renders the marketing site on the bare domain and the
//! salon storefront on a tenant hostname. No authorization: a visitor
//! with no tenant context is simply a visitor.

use axum::routing::get;
use axum::{Json, Router};

use glowdesk_gateway::Guarded;

use crate::models::{SalonCard, StorefrontView};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(storefront))
}

/// Marketing site or salon storefront, depending on the hostname
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Storefront payload", body = StorefrontView)
    ),
    tag = "storefront"
)]
pub async fn storefront(Guarded(context): Guarded) -> Json<StorefrontView> {
    match &context.tenant {
        Some(tenant) => Json(StorefrontView {
            salon: Some(SalonCard::from_tenant(tenant)),
            headline: format!("Book your next visit at {}", tenant.name),
        }),
        None => Json(StorefrontView {
            salon: None,
            headline: "GlowDesk - the booking platform for beauty salons".to_string(),
        }),
    }
}
