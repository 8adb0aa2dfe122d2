//! System webhook endpoints
//!
//! Tenant resolution is bypassed for this whole subtree: a webhook call
//! must never inherit a tenant from its host header or a spoofed tenant
//! header. Payloads are acknowledged and handed to the event log.

use axum::extract::Path;
use axum::routing::post;
use axum::{Json, Router};

use glowdesk_gateway::Guarded;

use crate::models::WebhookAck;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/webhooks/:source", post(receive))
}

/// Receive a webhook event
#[utoipa::path(
    post,
    path = "/api/webhooks/{source}",
    params(("source" = String, Path, description = "Event source, e.g. payments")),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck)
    ),
    tag = "webhooks"
)]
pub async fn receive(
    Path(source): Path<String>,
    Guarded(context): Guarded,
    Json(payload): Json<serde_json::Value>,
) -> Json<WebhookAck> {
    tracing::info!(
        source = %source,
        keys = payload.as_object().map(|o| o.len()).unwrap_or(0),
        "webhook received"
    );

    Json(WebhookAck {
        received: true,
        source,
        tenant_attached: context.tenant.is_some(),
    })
}
