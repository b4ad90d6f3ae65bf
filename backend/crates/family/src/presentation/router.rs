//! Family Router

use axum::{
    Router,
    routing::{get, post},
};
use auth::AuthBackend;

use crate::domain::repository::FamilyStore;
use crate::presentation::handlers::{self, FamilyAppState};

/// Onboarding, join and dashboard routes (absolute paths)
pub fn family_router<S, B>(state: FamilyAppState<S, B>) -> Router
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/onboarding/check", get(handlers::onboarding_check::<S, B>))
        .route(
            "/onboarding/create-family",
            get(handlers::create_family_page::<S, B>).post(handlers::create_family::<S, B>),
        )
        .route(
            "/onboarding/add-children",
            get(handlers::add_children_page::<S, B>).post(handlers::add_children::<S, B>),
        )
        .route(
            "/onboarding/add-children/skip",
            post(handlers::skip_add_children::<S, B>),
        )
        .route(
            "/onboarding/invite-parent",
            get(handlers::invite_parent_page::<S, B>).post(handlers::invite_parent::<S, B>),
        )
        .route(
            "/onboarding/invite-parent/skip",
            post(handlers::skip_invite_parent::<S, B>),
        )
        .route(
            "/onboarding/family-setup",
            get(handlers::family_setup_page::<S, B>).post(handlers::family_setup::<S, B>),
        )
        .route(
            "/onboarding/family-setup/invite",
            post(handlers::family_setup_invite::<S, B>),
        )
        .route("/onboarding/complete", get(handlers::complete_page::<S, B>))
        .route("/join", get(handlers::join::<S, B>))
        .route("/dashboard", get(handlers::dashboard::<S, B>))
        .with_state(state)
}
