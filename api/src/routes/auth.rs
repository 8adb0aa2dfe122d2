//! Login and logout endpoints
//!
//! Credential verification here backs the demo account directory; a
//! production deployment delegates it to the hosted identity provider
//! and only the cookie handling below remains.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use glowdesk_gateway::UserIdentity;

use crate::models::{ApiResponse, LoginRequest, LoginResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/superadmin/login", post(login))
        .route("/logout", post(logout))
}

/// Authenticate and set the session cookie
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(State(state): State<AppState>, Json(input): Json<LoginRequest>) -> Response {
    let account = match state.find_account(&input.email) {
        Some(account) if account.password == input.password => account,
        _ => {
            tracing::debug!(email = %input.email, "login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<LoginResponse>::error(
                    "invalid_credentials",
                    "email or password is incorrect",
                )),
            )
                .into_response();
        }
    };

    let identity = UserIdentity {
        user_id: account.user_id,
        email: account.email.clone(),
    };

    let set_cookie = match state.sessions.issue(&identity) {
        Ok(cookie) => cookie,
        Err(err) => {
            tracing::warn!(error = %err, "session issue failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LoginResponse>::error(
                    "session_error",
                    "could not establish a session",
                )),
            )
                .into_response();
        }
    };

    let next = input.next.unwrap_or_else(|| "/admin".to_string());
    tracing::info!(email = %identity.email, "login succeeded");

    (
        [(header::SET_COOKIE, set_cookie)],
        Json(ApiResponse::success(LoginResponse {
            user_id: identity.user_id,
            email: identity.email,
            next,
        })),
    )
        .into_response()
}

/// Clear the session cookie
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Json(ApiResponse::success(())),
    )
        .into_response()
}
