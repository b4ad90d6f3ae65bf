//! Session Gate
//!
//! Pure routing decision made in front of every request. The middleware in
//! `presentation::middleware` supplies the inputs (path, whether a session was
//! found, the redirect counter) and carries out the result.

use crate::application::config::GateConfig;

/// How a path is treated by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Static assets, the code-exchange callback, API routes
    Exempt,
    Protected,
    AuthOnly,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin { return_to: String },
    RedirectToLanding,
}

impl GateConfig {
    /// Classify `path`, first match wins: exempt, protected, auth-only, public.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.is_exempt(path) {
            return RouteClass::Exempt;
        }

        if self
            .protected_prefixes
            .iter()
            .any(|prefix| matches_segment_prefix(path, prefix))
        {
            return RouteClass::Protected;
        }

        if self.auth_only_paths.iter().any(|p| p == path) {
            return RouteClass::AuthOnly;
        }

        RouteClass::Public
    }

    /// Decide what to do with a classified request.
    ///
    /// `redirects` is the number of gate redirects already issued in a row.
    /// Past the threshold everything is allowed, so a misconfigured route set
    /// degrades to an unguarded page instead of a redirect loop.
    pub fn decide(&self, class: RouteClass, path: &str, has_session: bool, redirects: u32) -> GateDecision {
        if redirects > self.max_redirects {
            return GateDecision::Allow;
        }

        match class {
            RouteClass::Protected if !has_session => GateDecision::RedirectToLogin {
                return_to: path.to_string(),
            },
            RouteClass::AuthOnly if has_session => GateDecision::RedirectToLanding,
            _ => GateDecision::Allow,
        }
    }

    fn is_exempt(&self, path: &str) -> bool {
        if self.exempt_paths.iter().any(|p| p == path) {
            return true;
        }

        if self.exempt_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            return true;
        }

        let last_segment = path.rsplit('/').next().unwrap_or_default();
        match last_segment.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self
                .static_extensions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(ext)),
            _ => false,
        }
    }
}

/// `/family` matches `/family` and `/family/...`, never `/familyx`.
fn matches_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GateConfig {
        GateConfig::default()
    }

    #[test]
    fn test_exempt_paths() {
        let gate = gate();
        for path in [
            "/_next/static/chunk.js",
            "/static/logo.svg",
            "/favicon.ico",
            "/images/hero.png",
            "/auth/callback",
            "/api/health",
        ] {
            assert_eq!(gate.classify(path), RouteClass::Exempt, "{path}");
        }
    }

    #[test]
    fn test_protected_prefixes_are_segment_aware() {
        let gate = gate();
        assert_eq!(gate.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(gate.classify("/family/members"), RouteClass::Protected);
        assert_eq!(gate.classify("/onboarding/add-children"), RouteClass::Protected);
        assert_eq!(gate.classify("/familyx"), RouteClass::Public);
        assert_eq!(gate.classify("/dashboards"), RouteClass::Public);
    }

    #[test]
    fn test_auth_only_is_exact() {
        let gate = gate();
        assert_eq!(gate.classify("/auth/login"), RouteClass::AuthOnly);
        assert_eq!(gate.classify("/auth/signup"), RouteClass::AuthOnly);
        assert_eq!(gate.classify("/auth/forgot-password"), RouteClass::AuthOnly);
        assert_eq!(gate.classify("/auth/reset-password"), RouteClass::Public);
    }

    #[test]
    fn test_root_and_join_are_public() {
        let gate = gate();
        assert_eq!(gate.classify("/"), RouteClass::Public);
        assert_eq!(gate.classify("/join"), RouteClass::Public);
    }

    #[test]
    fn test_protected_without_session_redirects_with_path() {
        let gate = gate();
        let decision = gate.decide(RouteClass::Protected, "/dashboard", false, 0);
        assert_eq!(
            decision,
            GateDecision::RedirectToLogin {
                return_to: "/dashboard".to_string()
            }
        );
        assert_eq!(
            gate.decide(RouteClass::Protected, "/dashboard", true, 0),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_auth_only_with_session_goes_to_landing() {
        let gate = gate();
        assert_eq!(
            gate.decide(RouteClass::AuthOnly, "/auth/login", true, 0),
            GateDecision::RedirectToLanding
        );
        assert_eq!(
            gate.decide(RouteClass::AuthOnly, "/auth/login", false, 0),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_counter_above_threshold_allows() {
        let gate = gate();
        assert_ne!(
            gate.decide(RouteClass::Protected, "/dashboard", false, 2),
            GateDecision::Allow
        );
        assert_eq!(
            gate.decide(RouteClass::Protected, "/dashboard", false, 3),
            GateDecision::Allow
        );
        assert_eq!(
            gate.decide(RouteClass::AuthOnly, "/auth/login", true, 3),
            GateDecision::Allow
        );
    }
}
