//! Session Gate Middleware
//!
//! Runs in front of every route. Resolves the session from the cookies
//! (refreshing it when needed), applies the gate decision, and hands the
//! session to downstream handlers through the request extensions.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use platform::url::with_query;

use crate::application::config::GateConfig;
use crate::application::current_session::{CurrentSessionUseCase, ResolvedSession, SessionLookup};
use crate::application::gate::{GateDecision, RouteClass};
use crate::domain::repository::AuthBackend;
use crate::presentation::cookies;
use crate::presentation::handlers::AuthAppState;

/// The session resolved by [`session_gate`], if any.
///
/// Always `None` on exempt routes, which are never looked up.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<ResolvedSession>);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<ResolvedSession>().cloned()))
    }
}

pub async fn session_gate<B>(
    State(state): State<AuthAppState<B>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let config = &state.config;
    let gate = &config.gate;
    let path = req.uri().path().to_string();

    let class = gate.classify(&path);
    if class == RouteClass::Exempt {
        return next.run(req).await;
    }

    let redirects = redirect_count(req.headers(), &jar, gate);

    let lookup = CurrentSessionUseCase::new(state.backend.clone())
        .execute(
            cookies::access_token(&jar, config),
            cookies::refresh_token(&jar, config),
        )
        .await;

    let lookup = match lookup {
        Ok(lookup) => lookup,
        Err(e) => {
            // Fail open: an unreachable backend must not lock everyone out
            tracing::warn!(error = %e, path = %path, "Session lookup failed, allowing request");
            return next.run(req).await;
        }
    };

    let mut jar = jar;
    match &lookup {
        SessionLookup::Refreshed(session) => {
            jar = cookies::store_session(jar, config, session);
        }
        SessionLookup::Anonymous { stale: true } => {
            tracing::debug!(path = %path, "Clearing rejected session cookies");
            jar = cookies::clear_session(jar, config);
        }
        _ => {}
    }

    let session = lookup.session();

    if redirects > gate.max_redirects {
        tracing::warn!(path = %path, redirects, "Redirect threshold exceeded, allowing request");
    }

    match gate.decide(class, &path, session.is_some(), redirects) {
        GateDecision::Allow => {
            if let Some(session) = session {
                req.extensions_mut().insert(session);
            }
            if jar.get(&gate.redirect_cookie).is_some() {
                jar = jar.remove(config.cookie.removal(gate.redirect_cookie.clone()));
            }
            let response = next.run(req).await;
            merge_gate_cookies(jar, response)
        }
        GateDecision::RedirectToLogin { return_to } => {
            tracing::debug!(path = %path, "No session, redirecting to login");
            let location = with_query(
                &gate.login_path,
                &[(gate.return_to_param.as_str(), return_to.as_str())],
            );
            gate_redirect(jar, &state, &location, redirects + 1)
        }
        GateDecision::RedirectToLanding => {
            tracing::debug!(path = %path, "Already signed in, redirecting to landing");
            gate_redirect(jar, &state, &gate.landing_path, redirects + 1)
        }
    }
}

/// Append the gate's cookie changes to the handler's response.
///
/// A cookie the handler set itself (a fresh login, a sign-out) wins over the
/// gate's refresh or cleanup of the same name.
fn merge_gate_cookies(jar: CookieJar, mut response: Response) -> Response {
    let handler_names: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(cookie_name)
        .map(str::to_string)
        .collect();

    let gate = jar.into_response();
    for value in gate.headers().get_all(header::SET_COOKIE) {
        let taken = value
            .to_str()
            .ok()
            .and_then(cookie_name)
            .is_some_and(|name| handler_names.iter().any(|n| n == name));
        if !taken {
            response.headers_mut().append(header::SET_COOKIE, value.clone());
        }
    }
    response
}

fn cookie_name(set_cookie: &str) -> Option<&str> {
    set_cookie.split_once('=').map(|(name, _)| name.trim())
}

/// Redirects already issued in a row; the larger of header and cookie wins
fn redirect_count(headers: &HeaderMap, jar: &CookieJar, gate: &GateConfig) -> u32 {
    let from_header = headers
        .get(gate.redirect_header.as_str())
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0);

    let from_cookie = jar
        .get(&gate.redirect_cookie)
        .and_then(|c| c.value().parse::<u32>().ok())
        .unwrap_or(0);

    from_header.max(from_cookie)
}

fn gate_redirect<B>(jar: CookieJar, state: &AuthAppState<B>, location: &str, count: u32) -> Response
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let gate = &state.config.gate;
    let jar = jar.add(state.config.cookie.build(
        gate.redirect_cookie.clone(),
        count.to_string(),
        Some(gate.redirect_cookie_max_age_secs),
    ));

    let mut response = (jar, Redirect::temporary(location)).into_response();
    if let Ok(name) = HeaderName::try_from(gate.redirect_header.as_str()) {
        response.headers_mut().insert(name, HeaderValue::from(count));
    }
    response
}
