//! Gateway Middleware
//!
//! The boundary layer: session refresh on every request, then the route
//! guard, with `GuardDenial` mapped to HTTP redirects here and nowhere
//! else.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use glowdesk_common::PlatformConfig;

use crate::context::{CurrentUser, RequestContext};
use crate::cookie::{parse_cookies, serialize_cookies};
use crate::guard::{GuardDenial, RouteGuard};
use crate::hostname::resolve_tenant_slug;
use crate::routes::RouteGroup;
use crate::session::{RefreshedSession, SessionService};

/// Shared state for the gateway middleware
#[derive(Clone)]
pub struct GatewayState {
    /// Platform configuration
    pub config: Arc<PlatformConfig>,
    /// The composed route guard
    pub guard: Arc<RouteGuard>,
    /// Session collaborator
    pub sessions: Arc<dyn SessionService>,
}

/// Map a denial to its redirect target.
///
/// `NoSession` and `NoMembership` share a target on purpose: an
/// unauthenticated probe must not learn whether a membership exists.
/// `InsufficientRole` stays inside the tenant: the caller is a member,
/// just not a privileged one.
pub fn denial_redirect(group: RouteGroup, denial: &GuardDenial, path: &str) -> String {
    if group == RouteGroup::Platform {
        // The platform console redirects every denial to root.
        return "/".to_string();
    }

    match denial {
        GuardDenial::NoTenant => "/".to_string(),
        GuardDenial::NoSession | GuardDenial::NoMembership => {
            format!("{}?next={}", group.login_path(), urlencoding::encode(path))
        }
        GuardDenial::InsufficientRole { .. } => group.landing_path().to_string(),
    }
}

/// Session refresher. Runs on every request regardless of route:
/// validates/rotates the inbound session cookies, forwards the fresh
/// token to downstream rendering, queues `Set-Cookie` for the client,
/// and bounces unauthenticated requests off protected paths.
pub async fn refresh_session(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_header = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let mut cookies = parse_cookies(cookie_header);

    let refreshed = match state.sessions.refresh(&cookies).await {
        Ok(refreshed) => refreshed,
        Err(err) => {
            tracing::warn!(error = %err, "session refresh failed");
            RefreshedSession::anonymous()
        }
    };

    // Rewrite the forwarded cookie header so downstream rendering and the
    // browser observe the same session.
    if let Some(token) = &refreshed.session_token {
        upsert_cookie(&mut cookies, &state.config.session_cookie, token);
        if let Ok(value) = HeaderValue::from_str(&serialize_cookies(&cookies)) {
            request.headers_mut().insert(header::COOKIE, value);
        }
    }

    request
        .extensions_mut()
        .insert(CurrentUser(refreshed.identity.clone()));

    let path = request.uri().path().to_string();
    let group = RouteGroup::classify(&path);

    if group.requires_session() && refreshed.identity.is_none() {
        let target = format!("{}?next={}", group.login_path(), urlencoding::encode(&path));
        tracing::debug!(path = %path, "no identity on protected path");
        let mut response = Redirect::temporary(&target).into_response();
        append_set_cookies(&mut response, &refreshed.set_cookies);
        return response;
    }

    let mut response = next.run(request).await;
    append_set_cookies(&mut response, &refreshed.set_cookies);
    response
}

/// Route guard middleware. Classifies the path, resolves the tenant slug
/// from the host header where the group calls for it, drives the guard,
/// and either attaches the admitted context or redirects.
pub async fn guard_route(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let group = RouteGroup::classify(&path);

    let slug = if group.resolves_tenant() {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok());
        resolve_tenant_slug(host, &state.config.root_domain)
    } else {
        None
    };

    let user = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .map(|c| c.0)
        .unwrap_or(None);

    let admitted = match group {
        RouteGroup::Platform => state.guard.admit_platform(user).await,
        RouteGroup::TenantAdminOnly | RouteGroup::TenantStaff => {
            state.guard.admit_tenant(group, slug.as_deref(), user).await
        }
        // Webhooks: no tenant context, ever.
        RouteGroup::Webhook => Ok(RequestContext::anonymous()),
        // Storefront and login pages render with whatever resolves.
        RouteGroup::Auth | RouteGroup::Public => Ok(RequestContext {
            tenant: state.guard.resolve_tenant(slug.as_deref()).await,
            user,
            role: None,
        }),
    };

    match admitted {
        Ok(context) => {
            tracing::debug!(path = %path, group = ?group, "request admitted");
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(denial) => {
            let target = denial_redirect(group, &denial, &path);
            tracing::debug!(path = %path, group = ?group, denial = ?denial, target = %target, "request denied");
            Redirect::temporary(&target).into_response()
        }
    }
}

fn upsert_cookie(cookies: &mut Vec<(String, String)>, name: &str, value: &str) {
    if let Some(pair) = cookies.iter_mut().find(|(n, _)| n == name) {
        pair.1 = value.to_string();
    } else {
        cookies.push((name.to_string(), value.to_string()));
    }
}

fn append_set_cookies(response: &mut Response, set_cookies: &[String]) {
    for cookie in set_cookies {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_redirect_targets() {
        assert_eq!(
            denial_redirect(RouteGroup::TenantStaff, &GuardDenial::NoTenant, "/admin"),
            "/"
        );
        assert_eq!(
            denial_redirect(RouteGroup::TenantStaff, &GuardDenial::NoSession, "/admin"),
            "/admin/login?next=%2Fadmin"
        );
        // Membership probes get the same answer as missing sessions.
        assert_eq!(
            denial_redirect(RouteGroup::TenantStaff, &GuardDenial::NoMembership, "/admin"),
            denial_redirect(RouteGroup::TenantStaff, &GuardDenial::NoSession, "/admin"),
        );
        assert_eq!(
            denial_redirect(
                RouteGroup::TenantAdminOnly,
                &GuardDenial::InsufficientRole {
                    role: glowdesk_tenant::Role::Secretary
                },
                "/admin/settings"
            ),
            "/admin"
        );
        assert_eq!(
            denial_redirect(RouteGroup::Platform, &GuardDenial::NoSession, "/superadmin"),
            "/"
        );
    }

    #[test]
    fn test_next_param_preserves_nested_path() {
        let target = denial_redirect(
            RouteGroup::TenantStaff,
            &GuardDenial::NoSession,
            "/admin/appointments/today",
        );
        assert_eq!(
            target,
            "/admin/login?next=%2Fadmin%2Fappointments%2Ftoday"
        );
    }

    #[test]
    fn test_upsert_cookie() {
        let mut cookies = vec![("theme".to_string(), "dark".to_string())];
        upsert_cookie(&mut cookies, "gd_session", "tok1");
        upsert_cookie(&mut cookies, "gd_session", "tok2");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[1], ("gd_session".to_string(), "tok2".to_string()));
    }
}
