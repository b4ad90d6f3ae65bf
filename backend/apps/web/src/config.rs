//! Server configuration read from the environment

use anyhow::{Context, Result};
use auth::AuthConfig;
use family::OnboardingConfig;
use platform::supabase::SupabaseConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub supabase: SupabaseConfig,
    pub auth: AuthConfig,
    pub onboarding: OnboardingConfig,
}

impl WebConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let supabase_url = var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let anon_key = var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;
        let site_url = var("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a port number: {raw}"))?,
            None => DEFAULT_PORT,
        };

        // Secure cookies unless explicitly turned off for plain-http development
        let cookie_secure = match var("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("COOKIE_SECURE must be true or false, got {raw}"))?,
            None => !cfg!(debug_assertions),
        };

        let mut auth = AuthConfig {
            site_url: site_url.clone(),
            ..AuthConfig::default()
        };
        auth.cookie.secure = cookie_secure;
        if let Some(raw) = var("GATE_MAX_REDIRECTS") {
            auth.gate.max_redirects = raw
                .trim()
                .parse()
                .with_context(|| format!("GATE_MAX_REDIRECTS is not a number: {raw}"))?;
        }
        if let Some(landing) = var("LANDING_PATH") {
            auth.gate.landing_path = landing;
        }

        let onboarding = OnboardingConfig {
            site_url,
            ..OnboardingConfig::default()
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port,
            frontend_origins,
            supabase: SupabaseConfig::new(supabase_url, anon_key),
            auth,
            onboarding,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
