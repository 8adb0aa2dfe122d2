//! Cookie Utilities
//!
//! Parsing the inbound `Cookie` header and building `Set-Cookie` values
//! for the session refresher.

/// SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Attributes for a `Set-Cookie` value
#[derive(Debug, Clone)]
pub struct CookieOptions {
    /// Cookie path
    pub path: String,
    /// Max-Age in seconds; omitted for a session cookie
    pub max_age: Option<i64>,
    /// HttpOnly attribute
    pub http_only: bool,
    /// Secure attribute
    pub secure: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            max_age: None,
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

/// Parse a `Cookie` header into name/value pairs. Malformed fragments
/// are skipped.
pub fn parse_cookies(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|fragment| {
            let (name, value) = fragment.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Look up a cookie by name
pub fn cookie_value<'a>(cookies: &'a [(String, String)], name: &str) -> Option<&'a str> {
    cookies
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Serialize pairs back into a `Cookie` header value
pub fn serialize_cookies(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(n, v)| format!("{n}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build a `Set-Cookie` value
pub fn build_set_cookie(name: &str, value: &str, opts: &CookieOptions) -> String {
    let mut out = format!("{name}={value}; Path={}", opts.path);
    if let Some(max_age) = opts.max_age {
        out.push_str(&format!("; Max-Age={max_age}"));
    }
    out.push_str(&format!("; SameSite={}", opts.same_site.as_str()));
    if opts.http_only {
        out.push_str("; HttpOnly");
    }
    if opts.secure {
        out.push_str("; Secure");
    }
    out
}

/// Build a `Set-Cookie` value that expires the cookie immediately
pub fn build_clear_cookie(name: &str, opts: &CookieOptions) -> String {
    let mut expired = opts.clone();
    expired.max_age = Some(0);
    build_set_cookie(name, "", &expired)
}
