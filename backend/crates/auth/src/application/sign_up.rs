//! Sign Up Use Case
//!
//! Validates the form locally, registers the account with the hosted service
//! and creates the matching profile row.

use std::sync::Arc;

use platform::crypto::Pkce;

use crate::application::config::AuthConfig;
use crate::domain::entity::registration::Registration;
use crate::domain::entity::session::SignUpOutcome;
use crate::domain::repository::AuthBackend;
use crate::error::AuthResult;

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct SignUpOutput {
    pub outcome: SignUpOutcome,
    /// PKCE verifier for the confirmation link; kept in a cookie until the callback
    pub code_verifier: String,
}

pub struct SignUpUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<B> SignUpUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self { backend, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // No network call until the form is valid
        let registration = Registration::new(
            &input.email,
            &input.password,
            &input.confirm_password,
            &input.first_name,
            &input.last_name,
        )?;

        let pkce = Pkce::generate();
        let redirect_to = self.config.site_link(&self.config.callback_path);

        let outcome = self
            .backend
            .sign_up(&registration, &redirect_to, &pkce.challenge)
            .await?;

        tracing::info!(user_id = %outcome.user().id, "User registered");

        let access_token = match &outcome {
            SignUpOutcome::SignedIn(session) => Some(session.access_token.as_str()),
            SignUpOutcome::ConfirmationRequired(_) => None,
        };

        // The account exists at this point; a missing profile row is repaired
        // on first use, so the sign-up still succeeds.
        if let Err(e) = self
            .backend
            .create_profile(outcome.user(), access_token)
            .await
        {
            tracing::warn!(error = %e, user_id = %outcome.user().id, "Profile creation failed");
        }

        Ok(SignUpOutput {
            outcome,
            code_verifier: pkce.verifier,
        })
    }
}
