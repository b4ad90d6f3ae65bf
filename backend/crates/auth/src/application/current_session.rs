//! Current Session Use Case
//!
//! Resolves the session carried by the request cookies: the access token is
//! checked first, and when it is missing or rejected the refresh token is
//! traded for a new pair.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entity::session::{AuthUser, Session};
use crate::domain::repository::AuthBackend;
use crate::error::AuthResult;

/// A verified session, as seen by handlers
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSession {
    pub user: AuthUser,
    #[serde(skip)]
    pub access_token: String,
}

impl From<&Session> for ResolvedSession {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            access_token: session.access_token.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionLookup {
    /// The access token is still valid
    Active(ResolvedSession),
    /// A new token pair was issued; the caller must write it back to the cookies
    Refreshed(Session),
    /// No usable session. `stale` is set when cookies were present but rejected.
    Anonymous { stale: bool },
}

impl SessionLookup {
    pub fn session(&self) -> Option<ResolvedSession> {
        match self {
            SessionLookup::Active(resolved) => Some(resolved.clone()),
            SessionLookup::Refreshed(session) => Some(ResolvedSession::from(session)),
            SessionLookup::Anonymous { .. } => None,
        }
    }
}

pub struct CurrentSessionUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> CurrentSessionUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> AuthResult<SessionLookup> {
        let access_token = access_token.filter(|t| !t.is_empty());
        let refresh_token = refresh_token.filter(|t| !t.is_empty());

        if let Some(token) = access_token {
            if let Some(user) = self.backend.get_user(token).await? {
                return Ok(SessionLookup::Active(ResolvedSession {
                    user,
                    access_token: token.to_string(),
                }));
            }
        }

        if let Some(token) = refresh_token {
            if let Some(session) = self.backend.refresh_session(token).await? {
                tracing::debug!(user_id = %session.user.id, "Session refreshed");
                return Ok(SessionLookup::Refreshed(session));
            }
        }

        Ok(SessionLookup::Anonymous {
            stale: access_token.is_some() || refresh_token.is_some(),
        })
    }
}
