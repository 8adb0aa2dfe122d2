//! Hostname Resolution
//!
//! Derives a tenant slug from the request host header. Pure and
//! side-effect-free so it runs once per request before any data access.

use glowdesk_common::config::DEV_SUFFIX;

/// Resolve a tenant slug from a raw host header.
///
/// - `royal.localhost:3000` → `Some("royal")`
/// - `glowdesk.app` / `www.glowdesk.app` → `None` (marketing site)
/// - `royal.glowdesk.app` → `Some("royal")`
/// - missing header, empty label, unrelated domain → `None`
pub fn resolve_tenant_slug(host: Option<&str>, root_domain: &str) -> Option<String> {
    let raw = host?.trim();
    if raw.is_empty() {
        return None;
    }

    // Strip port, lowercase.
    let hostname = raw.split(':').next().unwrap_or(raw).to_ascii_lowercase();
    let root = root_domain.trim().trim_start_matches('.').to_ascii_lowercase();

    // Local development: <slug>.localhost
    if let Some(prefix) = hostname.strip_suffix(DEV_SUFFIX) {
        return if prefix.is_empty() {
            None
        } else {
            Some(prefix.to_string())
        };
    }

    // Bare root domain or its www variant: no tenant context.
    if hostname == root || hostname == format!("www.{root}") {
        return None;
    }

    // <label>.<root>: the subdomain label is the slug. Deeper nesting and
    // unrelated domains carry no tenant.
    if let Some(label) = hostname.strip_suffix(&format!(".{root}")) {
        if !label.is_empty() && !label.contains('.') {
            return Some(label.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "glowdesk.app";

    #[test]
    fn test_localhost_suffix_stripped() {
        assert_eq!(
            resolve_tenant_slug(Some("royal.localhost"), ROOT),
            Some("royal".into())
        );
        assert_eq!(
            resolve_tenant_slug(Some("royal.localhost:3000"), ROOT),
            Some("royal".into())
        );
        assert_eq!(
            resolve_tenant_slug(Some("ROYAL.LOCALHOST:3000"), ROOT),
            Some("royal".into())
        );
    }

    #[test]
    fn test_root_and_www_have_no_tenant() {
        assert_eq!(resolve_tenant_slug(Some("glowdesk.app"), ROOT), None);
        assert_eq!(resolve_tenant_slug(Some("www.glowdesk.app"), ROOT), None);
        assert_eq!(resolve_tenant_slug(Some("glowdesk.app:443"), ROOT), None);
    }

    #[test]
    fn test_subdomain_label_is_slug() {
        assert_eq!(
            resolve_tenant_slug(Some("royal.glowdesk.app"), ROOT),
            Some("royal".into())
        );
        assert_eq!(
            resolve_tenant_slug(Some("Luxe.GlowDesk.App:8443"), ROOT),
            Some("luxe".into())
        );
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(resolve_tenant_slug(None, ROOT), None);
        assert_eq!(resolve_tenant_slug(Some(""), ROOT), None);
        assert_eq!(resolve_tenant_slug(Some("localhost"), ROOT), None);
        assert_eq!(resolve_tenant_slug(Some(".localhost"), ROOT), None);
        assert_eq!(resolve_tenant_slug(Some(".glowdesk.app"), ROOT), None);
        assert_eq!(resolve_tenant_slug(Some("example.com"), ROOT), None);
        assert_eq!(
            resolve_tenant_slug(Some("deep.royal.glowdesk.app"), ROOT),
            None
        );
    }

    #[test]
    fn test_idempotent() {
        let first = resolve_tenant_slug(Some("royal.glowdesk.app"), ROOT);
        let second = resolve_tenant_slug(Some("royal.glowdesk.app"), ROOT);
        assert_eq!(first, second);
    }
}
