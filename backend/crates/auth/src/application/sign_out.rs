//! Sign Out Use Case

use std::sync::Arc;

use crate::domain::repository::AuthBackend;

pub struct SignOutUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> SignOutUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Revoke the session upstream. Never fails: the cookies are cleared
    /// regardless, and a token the backend no longer knows is already signed out.
    pub async fn execute(&self, access_token: Option<&str>) {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            return;
        };

        if let Err(e) = self.backend.sign_out(token).await {
            tracing::warn!(error = %e, "Backend sign-out failed");
        }
    }
}
