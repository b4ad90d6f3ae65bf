//! Hosted auth service back-end

use platform::supabase::{
    GoTrueSession, GoTrueUser, SignUpParams, SignUpResponse, SupabaseClient, SupabaseError,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::entity::registration::Registration;
use crate::domain::entity::session::{AuthUser, Session, SignUpOutcome};
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::{email::Email, password::NewPassword, user_id::UserId};
use crate::error::{AuthError, AuthResult};

const PROFILES_TABLE: &str = "profiles";

/// Auth back-end backed by GoTrue and the `profiles` table
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct ProfileRow<'a> {
    id: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: Option<&'a str>,
}

fn metadata_text(metadata: &Value, key: &str) -> String {
    metadata
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl From<GoTrueUser> for AuthUser {
    fn from(user: GoTrueUser) -> Self {
        Self {
            first_name: metadata_text(&user.user_metadata, "first_name"),
            last_name: metadata_text(&user.user_metadata, "last_name"),
            id: UserId::new(user.id),
            email: user.email,
        }
    }
}

impl From<GoTrueSession> for Session {
    fn from(session: GoTrueSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            expires_at: session.expires_at,
            user: session.user.into(),
        }
    }
}

fn is_invalid_credentials(e: &SupabaseError) -> bool {
    e.code() == Some("invalid_credentials")
        || e.code() == Some("invalid_grant")
        || e.backend_message()
            .is_some_and(|m| m.contains("Invalid login credentials"))
}

fn is_already_registered(e: &SupabaseError) -> bool {
    matches!(e.code(), Some("user_already_exists" | "email_exists"))
        || e.backend_message()
            .is_some_and(|m| m.contains("already registered"))
}

/// Token rejections come back as 400 (bad refresh token) or 401/403
fn is_token_rejected(e: &SupabaseError) -> bool {
    matches!(e.status(), Some(400 | 401 | 403))
}

impl AuthBackend for SupabaseAuth {
    async fn get_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>> {
        match self.client.get_user(access_token).await {
            Ok(user) => Ok(Some(user.into())),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Option<Session>> {
        match self.client.refresh_session(refresh_token).await {
            Ok(session) => Ok(Some(session.into())),
            Err(e) if is_token_rejected(&e) => {
                tracing::debug!(error = %e, "Refresh token rejected");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_in_with_password(&self, email: &Email, password: &str) -> AuthResult<Session> {
        self.client
            .sign_in_with_password(email.as_str(), password)
            .await
            .map(Session::from)
            .map_err(|e| {
                if is_invalid_credentials(&e) {
                    AuthError::InvalidCredentials
                } else {
                    e.into()
                }
            })
    }

    async fn sign_up(
        &self,
        registration: &Registration,
        redirect_to: &str,
        code_challenge: &str,
    ) -> AuthResult<SignUpOutcome> {
        let params = SignUpParams {
            email: registration.email.as_str().to_string(),
            password: registration.password.expose().to_string(),
            data: json!({
                "first_name": registration.first_name,
                "last_name": registration.last_name,
            }),
            code_challenge: code_challenge.to_string(),
            code_challenge_method: "s256",
        };

        let response = self
            .client
            .sign_up(&params, redirect_to)
            .await
            .map_err(|e| {
                if is_already_registered(&e) {
                    AuthError::EmailTaken
                } else {
                    e.into()
                }
            })?;

        match response {
            SignUpResponse::Session(session) => Ok(SignUpOutcome::SignedIn(session.into())),
            // An existing address is answered with a user that has no identities
            SignUpResponse::User(user) if user.identities.as_ref().is_some_and(Vec::is_empty) => {
                Err(AuthError::EmailTaken)
            }
            SignUpResponse::User(user) => Ok(SignUpOutcome::ConfirmationRequired(user.into())),
        }
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        match self.client.sign_out(access_token).await {
            Ok(()) => Ok(()),
            Err(e) if is_token_rejected(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
        code_challenge: &str,
    ) -> AuthResult<()> {
        self.client
            .recover(email.as_str(), redirect_to, code_challenge)
            .await?;
        Ok(())
    }

    async fn update_password(&self, access_token: &str, password: &NewPassword) -> AuthResult<()> {
        match self.client.update_password(access_token, password.expose()).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_unauthorized() => Err(AuthError::SessionRequired),
            Err(e) if e.code() == Some("same_password") => Err(AuthError::Validation(
                "The new password must be different from the old one".into(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn exchange_code_for_session(&self, code: &str, code_verifier: &str) -> AuthResult<Session> {
        let session = self
            .client
            .exchange_code_for_session(code, code_verifier)
            .await?;
        Ok(session.into())
    }

    async fn create_profile(&self, user: &AuthUser, access_token: Option<&str>) -> AuthResult<()> {
        let row = ProfileRow {
            id: user.id.as_str(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: user.email.as_deref(),
        };

        // Without a session the anon key is used; row-level security may refuse it
        let token = access_token.unwrap_or(&self.client.config().anon_key);
        self.client
            .insert_minimal(PROFILES_TABLE, token, &[row])
            .await?;
        Ok(())
    }
}
