//! Onboarding Sequencer
//!
//! The wizard is a fixed sequence of steps. The family created in the first
//! step travels through the rest as the `family_id` query parameter. Entering
//! a step is a pure check of the session and that cursor; this module decides
//! and the handlers carry out the resulting navigation.

use auth::ResolvedSession;
use platform::url::with_query;

use crate::application::config::OnboardingConfig;
use crate::domain::value_object::family_id::FamilyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    CreateFamily,
    AddChildren,
    InviteParent,
    /// Children and invitation on one page
    FamilySetup,
    Complete,
}

impl OnboardingStep {
    pub fn path(&self) -> &'static str {
        match self {
            OnboardingStep::CreateFamily => "/onboarding/create-family",
            OnboardingStep::AddChildren => "/onboarding/add-children",
            OnboardingStep::InviteParent => "/onboarding/invite-parent",
            OnboardingStep::FamilySetup => "/onboarding/family-setup",
            OnboardingStep::Complete => "/onboarding/complete",
        }
    }

    /// Step reached by submitting or skipping this one
    pub fn next(&self) -> Option<OnboardingStep> {
        match self {
            OnboardingStep::CreateFamily => Some(OnboardingStep::AddChildren),
            OnboardingStep::AddChildren => Some(OnboardingStep::InviteParent),
            OnboardingStep::InviteParent => Some(OnboardingStep::Complete),
            OnboardingStep::FamilySetup | OnboardingStep::Complete => None,
        }
    }

    pub fn requires_family(&self) -> bool {
        !matches!(self, OnboardingStep::CreateFamily)
    }

    /// Location of this step for `family_id`
    pub fn location(&self, family_id: &FamilyId) -> String {
        with_query(self.path(), &[("family_id", family_id.as_str())])
    }
}

/// Where to send the browser instead of rendering the step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation(pub String);

/// What a step handler may use once entry is granted
#[derive(Debug, Clone)]
pub struct StepAccess {
    pub session: ResolvedSession,
    /// Always `Some` for steps after creation
    pub family_id: Option<FamilyId>,
}

impl StepAccess {
    /// Cursor of a step that requires one
    pub fn family(&self) -> Option<&FamilyId> {
        self.family_id.as_ref()
    }
}

/// Decide whether `step` may be entered.
///
/// No session: login, returning to the step. A later step without a usable
/// `family_id`: back to family creation.
pub fn enter(
    config: &OnboardingConfig,
    step: OnboardingStep,
    session: Option<ResolvedSession>,
    family_id: Option<&str>,
) -> Result<StepAccess, Navigation> {
    let Some(session) = session else {
        return Err(Navigation(with_query(
            &config.login_path,
            &[(config.return_to_param.as_str(), step.path())],
        )));
    };

    let family_id = FamilyId::parse(family_id);
    if step.requires_family() && family_id.is_none() {
        return Err(Navigation(OnboardingStep::CreateFamily.path().to_string()));
    }

    Ok(StepAccess { session, family_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::AuthUser;
    use auth::UserId;

    fn session() -> ResolvedSession {
        ResolvedSession {
            user: AuthUser {
                id: UserId::new("u1"),
                email: None,
                first_name: String::new(),
                last_name: String::new(),
            },
            access_token: "t".to_string(),
        }
    }

    #[test]
    fn test_no_session_goes_to_login_with_step() {
        let config = OnboardingConfig::default();
        let result = enter(&config, OnboardingStep::AddChildren, None, Some("abc123"));
        assert_eq!(
            result.unwrap_err(),
            Navigation("/auth/login?redirectTo=/onboarding/add-children".to_string())
        );
    }

    #[test]
    fn test_later_steps_need_family_id() {
        let config = OnboardingConfig::default();
        for step in [
            OnboardingStep::AddChildren,
            OnboardingStep::InviteParent,
            OnboardingStep::FamilySetup,
            OnboardingStep::Complete,
        ] {
            for family_id in [None, Some(""), Some("   ")] {
                let result = enter(&config, step, Some(session()), family_id);
                assert_eq!(
                    result.unwrap_err(),
                    Navigation("/onboarding/create-family".to_string()),
                    "{step:?} {family_id:?}"
                );
            }
        }
    }

    #[test]
    fn test_create_family_needs_no_cursor() {
        let config = OnboardingConfig::default();
        let access = enter(&config, OnboardingStep::CreateFamily, Some(session()), None).unwrap();
        assert!(access.family_id.is_none());
    }

    #[test]
    fn test_sequence_preserves_family_id() {
        let family_id = FamilyId::from_db("abc123");
        let next = OnboardingStep::AddChildren.next().unwrap();
        assert_eq!(next.location(&family_id), "/onboarding/invite-parent?family_id=abc123");
        assert_eq!(
            OnboardingStep::InviteParent.next().unwrap().location(&family_id),
            "/onboarding/complete?family_id=abc123"
        );
    }
}
