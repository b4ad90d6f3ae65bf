//! Router assembly
//!
//! Mounts the auth pages under `/auth`, merges the family routes, and puts the
//! session gate in front of everything.

use auth::{AuthAppState, AuthBackend, AuthUser, CurrentSession, auth_router, with_session_gate};
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Json, Router, routing::get};
use family::{FamilyAppState, family_router};
use family::domain::repository::FamilyStore;
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

/// GET /
pub async fn landing(CurrentSession(session): CurrentSession) -> Json<LandingView> {
    Json(LandingView {
        signed_in: session.is_some(),
        user: session.map(|s| s.user),
    })
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn build_router<B, S>(auth_state: AuthAppState<B>, family_state: FamilyAppState<S, B>) -> Router
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: FamilyStore + Clone + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/", get(landing))
        .route("/api/health", get(health))
        .nest("/auth", auth_router(auth_state.clone()))
        .merge(family_router(family_state));

    with_session_gate(routes, auth_state)
}

/// CORS for the frontend origins. The gate's redirect counter header may be
/// sent by the frontend and read back from responses.
pub fn cors_layer(origins: &[String], redirect_header: &str) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut allowed_headers = vec![header::CONTENT_TYPE, header::ACCEPT];
    let mut exposed_headers = Vec::new();
    match HeaderName::try_from(redirect_header) {
        Ok(name) => {
            allowed_headers.push(name.clone());
            exposed_headers.push(name);
        }
        Err(e) => tracing::warn!(error = %e, header = redirect_header, "Invalid redirect header name"),
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list(allowed_headers))
        .expose_headers(ExposeHeaders::list(exposed_headers))
        .allow_credentials(true)
}
