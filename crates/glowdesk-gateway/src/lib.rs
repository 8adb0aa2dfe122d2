//! Request Admission Pipeline
//!
//! Decides, for every inbound request, which salon it belongs to and
//! whether the caller may see what they asked for.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        ADMISSION PIPELINE                           │
//! │                                                                     │
//! │  request ──► SESSION REFRESHER ──► ROUTE CLASSIFIER ──► GUARD       │
//! │                │                        │                 │         │
//! │                │ validate/rotate        │ which group?    │         │
//! │                │ session cookies        │ tenant needed?  │         │
//! │                ▼                        ▼                 ▼         │
//! │         ┌────────────┐       ┌──────────────────┐  ┌────────────┐   │
//! │         │  SESSION   │       │ HOSTNAME RESOLVER│  │  TENANT +  │   │
//! │         │  SERVICE   │       │ host → slug      │  │ MEMBERSHIP │   │
//! │         └────────────┘       └──────────────────┘  │ DIRECTORIES│   │
//! │                                                    └────────────┘   │
//! │                                                                     │
//! │  outcome: permit with {tenant, user, role} context, or redirect     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard itself never builds an HTTP response; it returns
//! `Result<RequestContext, GuardDenial>` and the middleware boundary maps
//! denials to redirects. That keeps every admission decision unit-testable
//! without a router.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod context;
pub mod cookie;
pub mod guard;
pub mod hostname;
pub mod loader;
pub mod middleware;
pub mod routes;
pub mod session;

pub use context::{CurrentUser, Guarded, RequestContext, UserIdentity};
pub use guard::{GuardDenial, RouteGuard};
pub use hostname::resolve_tenant_slug;
pub use loader::TenantLoader;
pub use middleware::{denial_redirect, guard_route, refresh_session, GatewayState};
pub use routes::RouteGroup;
pub use session::{JwtSessions, RefreshedSession, SessionError, SessionService};
