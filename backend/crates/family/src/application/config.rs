//! Application Configuration

/// Onboarding and family route configuration
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Public origin of this site, used for invitation links (no trailing slash)
    pub site_url: String,
    pub login_path: String,
    pub signup_path: String,
    /// Query parameter carrying the return path to login/sign-up
    pub return_to_param: String,
    pub dashboard_path: String,
    pub join_path: String,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            login_path: "/auth/login".to_string(),
            signup_path: "/auth/signup".to_string(),
            return_to_param: "redirectTo".to_string(),
            dashboard_path: "/dashboard".to_string(),
            join_path: "/join".to_string(),
        }
    }
}

impl OnboardingConfig {
    pub fn development() -> Self {
        Self::default()
    }

    pub fn invite_url(&self, code: &str) -> String {
        format!(
            "{}{}?code={}",
            self.site_url.trim_end_matches('/'),
            self.join_path,
            code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_url() {
        let config = OnboardingConfig {
            site_url: "https://family.example/".to_string(),
            ..OnboardingConfig::default()
        };
        assert_eq!(config.invite_url("ABCD2345"), "https://family.example/join?code=ABCD2345");
    }
}
