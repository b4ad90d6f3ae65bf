//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::AuthBackend;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::session_gate;

/// Auth pages, meant to be nested under `/auth`
pub fn auth_router<B>(state: AuthAppState<B>) -> Router
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login::<B>))
        .route("/signup", get(handlers::signup_page).post(handlers::signup::<B>))
        .route(
            "/forgot-password",
            get(handlers::forgot_password_page).post(handlers::forgot_password::<B>),
        )
        .route(
            "/reset-password",
            get(handlers::reset_password_page).post(handlers::reset_password::<B>),
        )
        .route("/callback", get(handlers::callback::<B>))
        .route("/signout", post(handlers::sign_out::<B>))
        .with_state(state)
}

/// Put the session gate in front of every route of `router`
pub fn with_session_gate<B>(router: Router, state: AuthAppState<B>) -> Router
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(state, session_gate::<B>))
}
