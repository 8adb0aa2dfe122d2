//! GlowDesk Platform API
//!
//! One axum application serving three audiences behind the admission
//! pipeline:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                         GLOWDESK API                              │
//! │                                                                   │
//! │  ┌─────────────────────────────────────────────────────────────┐  │
//! │  │  SESSION REFRESHER  →  ROUTE GUARD   (glowdesk-gateway)     │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! │         │                    │                     │              │
//! │  ┌──────▼──────┐   ┌─────────▼─────────┐   ┌───────▼───────┐      │
//! │  │ STOREFRONT  │   │  TENANT ADMIN     │   │   PLATFORM    │      │
//! │  │  /          │   │  /admin...        │   │  /superadmin  │      │
//! │  │ marketing + │   │  staff + admin    │   │  console      │      │
//! │  │ salon pages │   │  subtrees         │   │               │      │
//! │  └─────────────┘   └───────────────────┘   └───────────────┘      │
//! │                                                                   │
//! │  /api/webhooks/* : tenant resolution bypassed                     │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use parking_lot::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use glowdesk_common::PlatformConfig;
use glowdesk_gateway::{guard_route, refresh_session, GatewayState, JwtSessions, RouteGuard};
use glowdesk_tenant::{Role, SubscriptionPlan, TenantRegistry};

pub use models::*;

/// Demo account record. Credential verification in production belongs to
/// the external identity provider; this directory backs the local login
/// form.
#[derive(Debug, Clone)]
pub struct Account {
    pub user_id: Uuid,
    pub email: String,
    pub password: String,
}

/// API state
#[derive(Clone)]
pub struct AppState {
    /// Platform configuration
    pub config: Arc<PlatformConfig>,
    /// Tenant registry: directories for the guard plus lifecycle ops
    pub registry: Arc<TenantRegistry>,
    /// Session service
    pub sessions: Arc<JwtSessions>,
    /// Login accounts
    pub accounts: Arc<RwLock<Vec<Account>>>,
    /// Seeded appointment book
    pub appointments: Arc<RwLock<Vec<models::Appointment>>>,
}

impl AppState {
    /// Empty state over the given configuration
    pub fn new(config: PlatformConfig) -> Self {
        let sessions = Arc::new(JwtSessions::new(
            &config.session_cookie,
            &config.session_secret,
        ));
        Self {
            config: Arc::new(config),
            registry: Arc::new(TenantRegistry::new()),
            sessions,
            accounts: Arc::new(RwLock::new(Vec::new())),
            appointments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// State seeded with demo salons, staff and appointments
    pub fn demo(config: PlatformConfig) -> Self {
        let state = Self::new(config);
        seed_demo_data(&state);
        state
    }

    /// The state the gateway middleware runs over
    pub fn gateway_state(&self) -> GatewayState {
        GatewayState {
            config: self.config.clone(),
            guard: Arc::new(RouteGuard::new(
                self.registry.clone(),
                self.registry.clone(),
                self.registry.clone(),
                self.config.lookup_timeout,
            )),
            sessions: self.sessions.clone(),
        }
    }

    /// Look up a login account by email
    pub fn find_account(&self, email: &str) -> Option<Account> {
        self.accounts
            .read()
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

fn seed_demo_data(state: &AppState) {
    let registry = &state.registry;

    registry
        .approve("Royal Beauty Lounge", "royal", SubscriptionPlan::Pro)
        .expect("seed tenant");
    registry
        .approve("Luxe Nails", "luxe", SubscriptionPlan::Starter)
        .expect("seed tenant");

    let mut accounts = state.accounts.write();
    let mut add_account = |email: &str, password: &str| {
        let user_id = Uuid::new_v4();
        accounts.push(Account {
            user_id,
            email: email.to_string(),
            password: password.to_string(),
        });
        user_id
    };

    let dana = add_account("dana@royal.example", "roses-and-gold");
    let mia = add_account("mia@royal.example", "front-desk");
    let ops = add_account("ops@glowdesk.app", "platform-keys");

    registry.assign("royal", dana, Role::Owner).expect("seed");
    registry.assign("royal", mia, Role::Secretary).expect("seed");
    registry.set_platform_role(ops, Role::SuperAdmin);

    let tenant_id = registry.get("royal").expect("seeded").tenant_id;
    let mut appointments = state.appointments.write();
    for (customer, service, staff) in [
        ("Amelie P.", "Balayage", "Dana"),
        ("Sofia R.", "Gel manicure", "Mia"),
        ("Claire B.", "Blowout", "Dana"),
    ] {
        appointments.push(models::Appointment {
            id: Uuid::new_v4(),
            tenant_id,
            customer_name: customer.to_string(),
            service: service.to_string(),
            staff: staff.to_string(),
            starts_at: chrono::Utc::now(),
        });
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GlowDesk API",
        version = "1.0.0",
        description = "GlowDesk Platform API - multi-tenant salon platform",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::storefront::storefront,
        routes::auth::login,
        routes::admin::dashboard,
        routes::superadmin::list_tenants,
        routes::webhooks::receive,
    ),
    components(
        schemas(
            ErrorResponse,
            LoginRequest, LoginResponse,
            StorefrontView, SalonCard,
            DashboardView, Appointment, SettingsView,
            TenantSummary, ConsoleOverview, ApproveTenantRequest, PlanChoice,
            WebhookAck
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "storefront", description = "Marketing site and salon storefronts"),
        (name = "auth", description = "Login and logout"),
        (name = "admin", description = "Tenant admin area"),
        (name = "superadmin", description = "Platform console"),
        (name = "webhooks", description = "System webhook endpoints")
    )
)]
pub struct ApiDoc;

/// Build the API router with the admission pipeline layered outermost
pub fn build_router(state: AppState) -> Router {
    let gateway = state.gateway_state();

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .merge(routes::storefront::router())
        .merge(routes::auth::router())
        .merge(routes::admin::router())
        .merge(routes::superadmin::router())
        .merge(routes::webhooks::router())
        // Guard first, refresher outermost: every request gets fresh
        // cookies before the guard reads the identity.
        .layer(axum::middleware::from_fn_with_state(
            gateway.clone(),
            guard_route,
        ))
        .layer(axum::middleware::from_fn_with_state(gateway, refresh_session))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
