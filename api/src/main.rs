//! GlowDesk Platform API server
//!
//! Binds the axum application with the admission pipeline over seeded
//! demo data.

use glowdesk_api::{build_router, AppState};
use glowdesk_common::PlatformConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match PlatformConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to development configuration");
            PlatformConfig::new("glowdesk.app", "glowdesk-dev-secret-change-in-production")
        }
    };

    let state = AppState::demo(config);
    let app = build_router(state);

    let addr = std::env::var("GLOWDESK_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".into());
    tracing::info!("GlowDesk API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
