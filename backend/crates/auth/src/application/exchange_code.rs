//! Exchange Code Use Case
//!
//! Completes the PKCE flow started by sign-up confirmation or password
//! recovery: the `code` from the e-mail link plus the verifier kept in the
//! browser buy a session.

use std::sync::Arc;

use crate::domain::entity::session::Session;
use crate::domain::repository::AuthBackend;
use crate::error::{AuthError, AuthResult};

pub struct ExchangeCodeUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> ExchangeCodeUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, code: Option<&str>, code_verifier: Option<&str>) -> AuthResult<Session> {
        let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::CodeExchange)?;
        let verifier = code_verifier
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::CodeExchange)?;

        match self.backend.exchange_code_for_session(code, verifier).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "Auth code exchanged");
                Ok(session)
            }
            // The backend refused the code itself (expired, reused, wrong verifier)
            Err(AuthError::Backend(e)) if e.status().is_some_and(|s| (400..500).contains(&s)) => {
                tracing::warn!(error = %e, "Auth code rejected");
                Err(AuthError::CodeExchange)
            }
            Err(e) => Err(e),
        }
    }
}
