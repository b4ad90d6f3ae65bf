//! In-memory auth back-end for tests
//!
//! Enabled inside this crate for unit tests and for dependent crates through
//! the `test-util` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use platform::supabase::SupabaseError;

use crate::domain::entity::registration::Registration;
use crate::domain::entity::session::{AuthUser, Session, SignUpOutcome};
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::{email::Email, password::NewPassword, user_id::UserId};
use crate::error::{AuthError, AuthResult};

const TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Debug, Default)]
struct FakeState {
    accounts: HashMap<String, Account>,
    access_tokens: HashMap<String, AuthUser>,
    refresh_tokens: HashMap<String, AuthUser>,
    codes: HashMap<String, AuthUser>,
    profiles: Vec<AuthUser>,
    recoveries: Vec<(String, String)>,
    signed_out: Vec<String>,
    next_id: usize,
    auto_confirm: bool,
    unreachable: bool,
}

/// Fake hosted auth service. Clones share state.
#[derive(Clone, Default)]
pub struct FakeAuthBackend {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<AtomicUsize>,
}

impl FakeAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_call(&self) -> AuthResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.lock().unreachable {
            return Err(AuthError::Backend(SupabaseError::Decode(
                "backend unreachable".into(),
            )));
        }
        Ok(())
    }

    /// Register an account that can sign in with `password`
    pub fn with_account(self, email: &str, password: &str, first_name: &str, last_name: &str) -> Self {
        {
            let mut state = self.lock();
            state.next_id += 1;
            let user = AuthUser {
                id: UserId::new(format!("user-{}", state.next_id)),
                email: Some(email.to_string()),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            };
            state.accounts.insert(
                email.to_string(),
                Account {
                    password: password.to_string(),
                    user,
                },
            );
        }
        self
    }

    /// Sign-ups return a session instead of waiting for e-mail confirmation
    pub fn auto_confirm(self) -> Self {
        self.lock().auto_confirm = true;
        self
    }

    /// Every call fails as if the backend could not be reached
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Issue a session for an existing account without counting a call
    pub fn issue_session(&self, email: &str) -> Session {
        let mut state = self.lock();
        let user = state
            .accounts
            .get(email)
            .map(|a| a.user.clone())
            .unwrap_or_else(|| panic!("no fake account for {email}"));
        Self::new_session(&mut state, user)
    }

    /// Make an access token unknown, as if it had expired
    pub fn expire_access_token(&self, token: &str) {
        self.lock().access_tokens.remove(token);
    }

    /// Register a PKCE code that exchanges into a session for `email`
    pub fn add_code(&self, code: &str, email: &str) {
        let mut state = self.lock();
        if let Some(account) = state.accounts.get(email).cloned() {
            state.codes.insert(code.to_string(), account.user);
        }
    }

    pub fn user(&self, email: &str) -> Option<AuthUser> {
        self.lock().accounts.get(email).map(|a| a.user.clone())
    }

    pub fn password_of(&self, email: &str) -> Option<String> {
        self.lock().accounts.get(email).map(|a| a.password.clone())
    }

    /// Number of back-end calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn profiles(&self) -> Vec<AuthUser> {
        self.lock().profiles.clone()
    }

    /// `(email, redirect_to)` of every recovery e-mail requested
    pub fn recoveries(&self) -> Vec<(String, String)> {
        self.lock().recoveries.clone()
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.lock().signed_out.clone()
    }

    fn new_session(state: &mut FakeState, user: AuthUser) -> Session {
        state.next_id += 1;
        let access_token = format!("access-{}", state.next_id);
        let refresh_token = format!("refresh-{}", state.next_id);
        state.access_tokens.insert(access_token.clone(), user.clone());
        state.refresh_tokens.insert(refresh_token.clone(), user.clone());

        Session {
            access_token,
            refresh_token,
            expires_in: TOKEN_LIFETIME_SECS,
            expires_at: None,
            user,
        }
    }
}

impl AuthBackend for FakeAuthBackend {
    async fn get_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>> {
        self.record_call()?;
        Ok(self.lock().access_tokens.get(access_token).cloned())
    }

    async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Option<Session>> {
        self.record_call()?;
        let mut state = self.lock();
        // Refresh tokens are single use
        match state.refresh_tokens.remove(refresh_token) {
            Some(user) => Ok(Some(Self::new_session(&mut state, user))),
            None => Ok(None),
        }
    }

    async fn sign_in_with_password(&self, email: &Email, password: &str) -> AuthResult<Session> {
        self.record_call()?;
        let mut state = self.lock();
        let user = match state.accounts.get(email.as_str()) {
            Some(account) if account.password == password => account.user.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        Ok(Self::new_session(&mut state, user))
    }

    async fn sign_up(
        &self,
        registration: &Registration,
        _redirect_to: &str,
        _code_challenge: &str,
    ) -> AuthResult<SignUpOutcome> {
        self.record_call()?;
        let mut state = self.lock();
        let email = registration.email.as_str().to_string();
        if state.accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }

        state.next_id += 1;
        let user = AuthUser {
            id: UserId::new(format!("user-{}", state.next_id)),
            email: Some(email.clone()),
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
        };
        state.accounts.insert(
            email,
            Account {
                password: registration.password.expose().to_string(),
                user: user.clone(),
            },
        );

        if state.auto_confirm {
            Ok(SignUpOutcome::SignedIn(Self::new_session(&mut state, user)))
        } else {
            Ok(SignUpOutcome::ConfirmationRequired(user))
        }
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.record_call()?;
        let mut state = self.lock();
        state.access_tokens.remove(access_token);
        state.signed_out.push(access_token.to_string());
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
        _code_challenge: &str,
    ) -> AuthResult<()> {
        self.record_call()?;
        self.lock()
            .recoveries
            .push((email.as_str().to_string(), redirect_to.to_string()));
        Ok(())
    }

    async fn update_password(&self, access_token: &str, password: &NewPassword) -> AuthResult<()> {
        self.record_call()?;
        let mut state = self.lock();
        let user = state
            .access_tokens
            .get(access_token)
            .cloned()
            .ok_or(AuthError::SessionRequired)?;
        if let Some(account) = state.accounts.values_mut().find(|a| a.user.id == user.id) {
            account.password = password.expose().to_string();
        }
        Ok(())
    }

    async fn exchange_code_for_session(&self, code: &str, _code_verifier: &str) -> AuthResult<Session> {
        self.record_call()?;
        let mut state = self.lock();
        match state.codes.remove(code) {
            Some(user) => Ok(Self::new_session(&mut state, user)),
            None => Err(AuthError::CodeExchange),
        }
    }

    async fn create_profile(&self, user: &AuthUser, _access_token: Option<&str>) -> AuthResult<()> {
        self.record_call()?;
        self.lock().profiles.push(user.clone());
        Ok(())
    }
}
