//! Family Setup Use Case
//!
//! Single-page variant of the later wizard steps. After the children are
//! stored the session is checked again, since the token may have expired
//! while the user was filling in the page.

use std::sync::Arc;

use auth::{AuthBackend, ResolvedSession};
use platform::url::with_query;

use crate::application::add_children::{AddChildrenUseCase, ChildInput};
use crate::application::config::OnboardingConfig;
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::family_id::FamilyId;
use crate::error::FamilyResult;

const SIGN_IN_AGAIN_MESSAGE: &str = "Your family has been created. Please sign in again.";

pub struct FamilySetupUseCase<S, B>
where
    S: FamilyStore,
    B: AuthBackend,
{
    store: Arc<S>,
    auth: Arc<B>,
    config: Arc<OnboardingConfig>,
}

impl<S, B> FamilySetupUseCase<S, B>
where
    S: FamilyStore,
    B: AuthBackend,
{
    pub fn new(store: Arc<S>, auth: Arc<B>, config: Arc<OnboardingConfig>) -> Self {
        Self {
            store,
            auth,
            config,
        }
    }

    /// Store the children and return where to go next
    pub async fn execute(
        &self,
        session: &ResolvedSession,
        family_id: &FamilyId,
        entries: &[ChildInput],
    ) -> FamilyResult<String> {
        AddChildrenUseCase::new(self.store.clone())
            .execute(Caller::from(session), family_id, entries)
            .await?;

        let still_signed_in = match self.auth.get_user(&session.access_token).await {
            Ok(user) => user.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Session re-check failed");
                false
            }
        };

        if still_signed_in {
            Ok(self.config.dashboard_path.clone())
        } else {
            Ok(with_query(
                &self.config.login_path,
                &[("message", SIGN_IN_AGAIN_MESSAGE)],
            ))
        }
    }
}
