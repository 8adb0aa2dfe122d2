//! Platform configuration
//!
//! Everything the admission pipeline needs from the environment: the root
//! domain for subdomain tenant resolution, the time bound on directory
//! lookups, and the session cookie parameters.

use std::time::Duration;

use crate::error::{GlowError, GlowResult};

/// Development hostname suffix. `royal.localhost` resolves tenant `royal`.
pub const DEV_SUFFIX: &str = ".localhost";

/// Default bound on a single directory round-trip.
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2_000;

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE: &str = "gd_session";

/// Platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Root domain, e.g. `glowdesk.app`. Tenants live on subdomains of it.
    pub root_domain: String,
    /// Upper bound on every tenant/membership/profile lookup. A lookup
    /// that exceeds this is treated as not-found (deny).
    pub lookup_timeout: Duration,
    /// Name of the session cookie.
    pub session_cookie: String,
    /// HS256 signing key for session tokens.
    pub session_secret: String,
}

impl PlatformConfig {
    /// Build a config for the given root domain with defaults elsewhere.
    pub fn new(root_domain: &str, session_secret: &str) -> Self {
        Self {
            root_domain: root_domain.to_ascii_lowercase(),
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            session_secret: session_secret.to_string(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// `GLOWDESK_ROOT_DOMAIN` is required; `GLOWDESK_SESSION_SECRET`,
    /// `GLOWDESK_LOOKUP_TIMEOUT_MS` and `GLOWDESK_SESSION_COOKIE` are
    /// optional.
    pub fn from_env() -> GlowResult<Self> {
        let root_domain = std::env::var("GLOWDESK_ROOT_DOMAIN")
            .map_err(|_| GlowError::ConfigError("GLOWDESK_ROOT_DOMAIN not set".into()))?;

        let session_secret = std::env::var("GLOWDESK_SESSION_SECRET")
            .unwrap_or_else(|_| "glowdesk-dev-secret-change-in-production".into());

        let lookup_timeout = match std::env::var("GLOWDESK_LOOKUP_TIMEOUT_MS") {
            Ok(raw) => {
                let ms: u64 = raw.parse().map_err(|_| {
                    GlowError::ConfigError(format!("invalid GLOWDESK_LOOKUP_TIMEOUT_MS: {raw}"))
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
        };

        let session_cookie = std::env::var("GLOWDESK_SESSION_COOKIE")
            .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.into());

        Ok(Self {
            root_domain: root_domain.to_ascii_lowercase(),
            lookup_timeout,
            session_cookie,
            session_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PlatformConfig::new("GlowDesk.App", "secret");
        assert_eq!(cfg.root_domain, "glowdesk.app");
        assert_eq!(cfg.lookup_timeout, Duration::from_millis(2_000));
        assert_eq!(cfg.session_cookie, "gd_session");
    }
}
