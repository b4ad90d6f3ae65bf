//! Password Reset Use Case
//!
//! Two halves: requesting the recovery e-mail, and setting the new password
//! once the recovery link has produced a session.

use std::sync::Arc;

use platform::crypto::Pkce;
use platform::url::with_query;

use crate::application::config::AuthConfig;
use crate::application::current_session::ResolvedSession;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::{email::Email, password::NewPassword};
use crate::error::{AuthError, AuthResult};

pub struct ForgotPasswordInput {
    pub email: String,
}

pub struct ResetPasswordInput {
    pub password: String,
    pub confirm_password: String,
}

pub struct PasswordResetUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<B> PasswordResetUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self { backend, config }
    }

    /// Send the recovery e-mail. Returns the PKCE verifier to keep for the callback.
    pub async fn request(&self, input: ForgotPasswordInput) -> AuthResult<String> {
        if input.email.trim().is_empty() {
            return Err(AuthError::Validation(
                "Please enter your email address".into(),
            ));
        }
        let email = Email::new(&input.email)?;

        let pkce = Pkce::generate();
        let callback = with_query(
            &self.config.callback_path,
            &[("next", self.config.reset_password_path.as_str())],
        );
        let redirect_to = self.config.site_link(&callback);

        self.backend
            .reset_password_for_email(&email, &redirect_to, &pkce.challenge)
            .await?;

        tracing::info!("Password recovery e-mail requested");

        Ok(pkce.verifier)
    }

    /// Set a new password for the signed-in (recovery) session
    pub async fn update(
        &self,
        session: Option<&ResolvedSession>,
        input: ResetPasswordInput,
    ) -> AuthResult<()> {
        if input.password.is_empty() || input.confirm_password.is_empty() {
            return Err(AuthError::Validation("Please fill in all fields".into()));
        }
        let password = NewPassword::new(&input.password, &input.confirm_password)?;

        let session = session.ok_or(AuthError::SessionRequired)?;

        self.backend
            .update_password(&session.access_token, &password)
            .await?;

        tracing::info!(user_id = %session.user.id, "Password updated");

        Ok(())
    }
}
