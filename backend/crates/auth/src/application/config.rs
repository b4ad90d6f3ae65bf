//! Application Configuration
//!
//! Configuration for the auth flows and the session gate.

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Public origin of this site, used to build e-mail links (no trailing slash)
    pub site_url: String,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// Holds the PKCE verifier between starting a flow and its callback
    pub verifier_cookie_name: String,
    /// Attributes shared by every cookie
    pub cookie: CookieConfig,
    /// Refresh cookie lifetime; outlives the access token so the gate can refresh
    pub refresh_cookie_max_age_secs: i64,
    pub verifier_cookie_max_age_secs: i64,
    /// Where a successful login or auto-confirmed sign-up goes by default
    pub post_auth_path: String,
    /// Route that completes PKCE flows
    pub callback_path: String,
    pub reset_password_path: String,
    pub gate: GateConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            access_cookie_name: "sb-access-token".to_string(),
            refresh_cookie_name: "sb-refresh-token".to_string(),
            verifier_cookie_name: "sb-code-verifier".to_string(),
            cookie: CookieConfig::default(),
            refresh_cookie_max_age_secs: 30 * 24 * 3600, // 30 days
            verifier_cookie_max_age_secs: 3600,          // 1 hour
            post_auth_path: "/onboarding/check".to_string(),
            callback_path: "/auth/callback".to_string(),
            reset_password_path: "/auth/reset-password".to_string(),
            gate: GateConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        let mut config = Self::default();
        config.cookie.secure = false;
        config
    }

    /// Absolute URL of a path on this site
    pub fn site_link(&self, path: &str) -> String {
        format!("{}{}", self.site_url.trim_end_matches('/'), path)
    }

    pub fn login_path(&self) -> &str {
        &self.gate.login_path
    }
}

/// Session gate configuration
///
/// Route lists are matched against the request path only (no query string).
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Prefixes passed through without any session lookup
    pub exempt_prefixes: Vec<String>,
    /// Exact paths passed through without any session lookup
    pub exempt_paths: Vec<String>,
    /// File extensions (without the dot) treated as static assets
    pub static_extensions: Vec<String>,
    /// Segment-aware prefixes that require a session
    pub protected_prefixes: Vec<String>,
    /// Exact paths that make no sense once signed in
    pub auth_only_paths: Vec<String>,
    /// Destination for signed-in users hitting an auth-only path
    pub landing_path: String,
    pub login_path: String,
    /// Query parameter carrying the return path on the login redirect
    pub return_to_param: String,
    /// Redirect counter header
    pub redirect_header: String,
    /// Redirect counter cookie (browsers do not replay custom headers)
    pub redirect_cookie: String,
    pub redirect_cookie_max_age_secs: i64,
    /// Above this many consecutive gate redirects the request is let through
    pub max_redirects: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            exempt_prefixes: strings(&["/_next/", "/static/", "/assets/", "/api/"]),
            exempt_paths: strings(&["/favicon.ico", "/auth/callback", "/api"]),
            static_extensions: strings(&[
                "svg", "png", "jpg", "jpeg", "gif", "webp", "ico", "css", "js", "map", "txt",
                "woff", "woff2",
            ]),
            protected_prefixes: strings(&[
                "/dashboard",
                "/onboarding",
                "/profile",
                "/family",
                "/settings",
            ]),
            auth_only_paths: strings(&["/auth/login", "/auth/signup", "/auth/forgot-password"]),
            landing_path: "/dashboard".to_string(),
            login_path: "/auth/login".to_string(),
            return_to_param: "redirectTo".to_string(),
            redirect_header: "x-gate-redirects".to_string(),
            redirect_cookie: "gate-redirects".to_string(),
            redirect_cookie_max_age_secs: 60,
            max_redirects: 2,
        }
    }
}
