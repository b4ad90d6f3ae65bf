//! Back-end Trait
//!
//! Everything the auth flows need from the hosted auth service. The production
//! implementation lives in `infra::supabase`; tests use `crate::testing`.

use crate::domain::entity::registration::Registration;
use crate::domain::entity::session::{AuthUser, Session, SignUpOutcome};
use crate::domain::value_object::{email::Email, password::NewPassword};
use crate::error::AuthResult;

#[trait_variant::make(AuthBackend: Send)]
pub trait LocalAuthBackend {
    /// User owning `access_token`; `None` when the token is rejected
    async fn get_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>>;

    /// Trade a refresh token for a fresh session; `None` when it is rejected
    async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Option<Session>>;

    async fn sign_in_with_password(&self, email: &Email, password: &str) -> AuthResult<Session>;

    /// Register a new account.
    ///
    /// `redirect_to` is where the confirmation link lands, `code_challenge`
    /// the PKCE challenge matching the verifier kept in the browser.
    async fn sign_up(
        &self,
        registration: &Registration,
        redirect_to: &str,
        code_challenge: &str,
    ) -> AuthResult<SignUpOutcome>;

    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;

    /// Send the password recovery e-mail
    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
        code_challenge: &str,
    ) -> AuthResult<()>;

    async fn update_password(&self, access_token: &str, password: &NewPassword) -> AuthResult<()>;

    /// Complete a PKCE flow started by sign-up or recovery
    async fn exchange_code_for_session(&self, code: &str, code_verifier: &str) -> AuthResult<Session>;

    /// Insert the `profiles` row for a freshly registered user
    async fn create_profile(&self, user: &AuthUser, access_token: Option<&str>) -> AuthResult<()>;
}
