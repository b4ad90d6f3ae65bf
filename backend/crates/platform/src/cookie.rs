//! Cookie Management Infrastructure
//!
//! Common cookie attributes shared by the session, PKCE and loop-guard cookies.

use axum_extra::extract::cookie::{Cookie, SameSite as CookieSameSite};
use std::borrow::Cow;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl From<SameSite> for CookieSameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => CookieSameSite::Strict,
            SameSite::Lax => CookieSameSite::Lax,
            SameSite::None => CookieSameSite::None,
        }
    }
}

/// Cookie attributes applied to every cookie this service sets
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build a cookie carrying `value`; `max_age_secs = None` makes it a session cookie
    pub fn build(
        &self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
        max_age_secs: Option<i64>,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::build((name, value))
            .path(self.path.clone())
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site.into());

        if let Some(secs) = max_age_secs {
            cookie = cookie.max_age(time::Duration::seconds(secs));
        }

        cookie.build()
    }

    /// Cookie identifying `name` for removal from a jar (path must match)
    pub fn removal(&self, name: impl Into<Cow<'static, str>>) -> Cookie<'static> {
        Cookie::build((name, "")).path(self.path.clone()).build()
    }
}
