//! Session Service
//!
//! Validates and refreshes the identity session carried in cookies. The
//! trait is the boundary to the external identity collaborator; the
//! built-in [`JwtSessions`] implementation signs HS256 tokens with a
//! sliding 8-hour window.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::UserIdentity;
use crate::cookie::{build_clear_cookie, build_set_cookie, cookie_value, CookieOptions};

/// Session service error
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Token could not be produced
    #[error("token error: {0}")]
    Token(String),
}

/// Outcome of refreshing the inbound session cookies
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    /// The identity the cookies resolve to, if any
    pub identity: Option<UserIdentity>,
    /// Rotated session token to forward to downstream rendering
    pub session_token: Option<String>,
    /// `Set-Cookie` values queued for the client
    pub set_cookies: Vec<String>,
}

impl RefreshedSession {
    /// No identity, nothing queued
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            session_token: None,
            set_cookies: Vec::new(),
        }
    }
}

/// Identity/session collaborator boundary
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Resolve the current user from inbound cookies, without rotation
    async fn authenticate(
        &self,
        cookies: &[(String, String)],
    ) -> Result<Option<UserIdentity>, SessionError>;

    /// Validate the inbound cookies and rotate the session, returning the
    /// cookies to propagate to both the forwarded request and the response
    async fn refresh(&self, cookies: &[(String, String)]) -> Result<RefreshedSession, SessionError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    email: String,
    exp: usize,
}

/// HS256 session tokens in a cookie
pub struct JwtSessions {
    cookie_name: String,
    secret: String,
    ttl_hours: i64,
}

impl JwtSessions {
    /// Create a session service signing with the given secret
    pub fn new(cookie_name: &str, secret: &str) -> Self {
        Self {
            cookie_name: cookie_name.to_string(),
            secret: secret.to_string(),
            ttl_hours: 8,
        }
    }

    /// Issue a fresh session for a just-authenticated identity.
    /// Returns the `Set-Cookie` value for the client.
    pub fn issue(&self, identity: &UserIdentity) -> Result<String, SessionError> {
        let token = self.sign(identity)?;
        Ok(build_set_cookie(
            &self.cookie_name,
            &token,
            &CookieOptions::default(),
        ))
    }

    /// `Set-Cookie` value that ends the session
    pub fn clear_cookie(&self) -> String {
        build_clear_cookie(&self.cookie_name, &CookieOptions::default())
    }

    fn sign(&self, identity: &UserIdentity) -> Result<String, SessionError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::hours(self.ttl_hours))
            .ok_or_else(|| SessionError::Token("expiry overflow".into()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: identity.user_id,
            email: identity.email.clone(),
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| SessionError::Token(e.to_string()))
    }

    /// Decode a token; an invalid or expired token is simply no identity.
    fn verify(&self, token: &str) -> Option<UserIdentity> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .ok()?;

        Some(UserIdentity {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[async_trait]
impl SessionService for JwtSessions {
    async fn authenticate(
        &self,
        cookies: &[(String, String)],
    ) -> Result<Option<UserIdentity>, SessionError> {
        Ok(cookie_value(cookies, &self.cookie_name).and_then(|t| self.verify(t)))
    }

    async fn refresh(&self, cookies: &[(String, String)]) -> Result<RefreshedSession, SessionError> {
        let token = match cookie_value(cookies, &self.cookie_name) {
            Some(t) => t,
            None => return Ok(RefreshedSession::anonymous()),
        };

        match self.verify(token) {
            Some(identity) => {
                // Sliding window: every valid request re-issues the cookie.
                let rotated = self.sign(&identity)?;
                let set_cookie =
                    build_set_cookie(&self.cookie_name, &rotated, &CookieOptions::default());
                Ok(RefreshedSession {
                    identity: Some(identity),
                    session_token: Some(rotated),
                    set_cookies: vec![set_cookie],
                })
            }
            None => {
                // Stale or tampered token: drop it client-side too.
                Ok(RefreshedSession {
                    identity: None,
                    session_token: None,
                    set_cookies: vec![self.clear_cookie()],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::parse_cookies;

    fn identity() -> UserIdentity {
        UserIdentity {
            user_id: Uuid::new_v4(),
            email: "dana@royal.example".into(),
        }
    }

    #[tokio::test]
    async fn test_issue_then_authenticate() {
        let sessions = JwtSessions::new("gd_session", "test-secret");
        let me = identity();

        let set_cookie = sessions.issue(&me).unwrap();
        let token = set_cookie
            .strip_prefix("gd_session=")
            .unwrap()
            .split(';')
            .next()
            .unwrap();

        let cookies = parse_cookies(&format!("gd_session={token}"));
        let resolved = sessions.authenticate(&cookies).await.unwrap();
        assert_eq!(resolved, Some(me));
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let sessions = JwtSessions::new("gd_session", "test-secret");
        let set_cookie = sessions.issue(&identity()).unwrap();
        let token = set_cookie
            .strip_prefix("gd_session=")
            .unwrap()
            .split(';')
            .next()
            .unwrap();

        let cookies = parse_cookies(&format!("gd_session={token}"));
        let refreshed = sessions.refresh(&cookies).await.unwrap();

        assert!(refreshed.identity.is_some());
        assert!(refreshed.session_token.is_some());
        assert_eq!(refreshed.set_cookies.len(), 1);
    }

    #[tokio::test]
    async fn test_garbage_token_clears_cookie() {
        let sessions = JwtSessions::new("gd_session", "test-secret");
        let cookies = parse_cookies("gd_session=not-a-jwt");

        let refreshed = sessions.refresh(&cookies).await.unwrap();
        assert!(refreshed.identity.is_none());
        assert!(refreshed.set_cookies[0].contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let issuer = JwtSessions::new("gd_session", "secret-a");
        let verifier = JwtSessions::new("gd_session", "secret-b");

        let set_cookie = issuer.issue(&identity()).unwrap();
        let token = set_cookie
            .strip_prefix("gd_session=")
            .unwrap()
            .split(';')
            .next()
            .unwrap();

        let cookies = parse_cookies(&format!("gd_session={token}"));
        let resolved = verifier.authenticate(&cookies).await.unwrap();
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let sessions = JwtSessions::new("gd_session", "test-secret");
        let refreshed = sessions.refresh(&[]).await.unwrap();
        assert!(refreshed.identity.is_none());
        assert!(refreshed.set_cookies.is_empty());
    }
}
