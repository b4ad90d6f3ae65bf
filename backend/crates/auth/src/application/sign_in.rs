//! Sign In Use Case

use std::sync::Arc;

use crate::domain::entity::session::Session;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> SignInUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<Session> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".into(),
            ));
        }

        // A malformed address cannot belong to an account
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let session = self
            .backend
            .sign_in_with_password(&email, &input.password)
            .await?;

        tracing::info!(user_id = %session.user.id, "User signed in");

        Ok(session)
    }
}
