//! Session cookies
//!
//! Reading and writing the token pair and the PKCE verifier.

use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;

pub fn access_token<'a>(jar: &'a CookieJar, config: &AuthConfig) -> Option<&'a str> {
    jar.get(&config.access_cookie_name).map(|c| c.value())
}

pub fn refresh_token<'a>(jar: &'a CookieJar, config: &AuthConfig) -> Option<&'a str> {
    jar.get(&config.refresh_cookie_name).map(|c| c.value())
}

pub fn code_verifier<'a>(jar: &'a CookieJar, config: &AuthConfig) -> Option<&'a str> {
    jar.get(&config.verifier_cookie_name).map(|c| c.value())
}

pub fn store_session(jar: CookieJar, config: &AuthConfig, session: &Session) -> CookieJar {
    jar.add(config.cookie.build(
        config.access_cookie_name.clone(),
        session.access_token.clone(),
        Some(session.expires_in),
    ))
    .add(config.cookie.build(
        config.refresh_cookie_name.clone(),
        session.refresh_token.clone(),
        Some(config.refresh_cookie_max_age_secs),
    ))
}

pub fn clear_session(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    jar.remove(config.cookie.removal(config.access_cookie_name.clone()))
        .remove(config.cookie.removal(config.refresh_cookie_name.clone()))
}

pub fn store_verifier(jar: CookieJar, config: &AuthConfig, verifier: String) -> CookieJar {
    jar.add(config.cookie.build(
        config.verifier_cookie_name.clone(),
        verifier,
        Some(config.verifier_cookie_max_age_secs),
    ))
}

pub fn clear_verifier(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    jar.remove(config.cookie.removal(config.verifier_cookie_name.clone()))
}
