//! HTTP Handlers
//!
//! Every onboarding handler starts by entering its step; a refused entry is
//! answered with the redirect the sequencer chose.

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use auth::{AuthBackend, CurrentSession};
use platform::url::with_query;
use std::sync::Arc;

use crate::application::step::{self, Navigation, OnboardingStep, StepAccess};
use crate::application::{
    AddChildrenUseCase, CreateFamilyUseCase, DashboardUseCase, FamilySetupUseCase,
    InviteParentUseCase, JoinFamilyUseCase, OnboardingCheckUseCase, OnboardingConfig,
};
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::{
    color::PRESET_COLORS, family_id::FamilyId, invitation_code::InvitationCode,
};
use crate::error::{FamilyError, FamilyResult};
use crate::presentation::dto::{ChildrenForm, CreateFamilyForm, JoinQuery, StepQuery, StepView};

/// Shared state for family handlers
#[derive(Clone)]
pub struct FamilyAppState<S, B>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    /// Used to re-check the session after the combined setup step
    pub auth: Arc<B>,
    pub config: Arc<OnboardingConfig>,
}

impl<S, B> FamilyAppState<S, B>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    pub fn new(store: S, auth: Arc<B>, config: OnboardingConfig) -> Self {
        Self {
            store: Arc::new(store),
            auth,
            config: Arc::new(config),
        }
    }

    fn enter(
        &self,
        step: OnboardingStep,
        session: Option<auth::ResolvedSession>,
        family_id: Option<&str>,
    ) -> Result<StepAccess, Response> {
        step::enter(&self.config, step, session, family_id).map_err(redirect)
    }

    fn login_redirect(&self, return_to: &str) -> Response {
        let location = with_query(
            &self.config.login_path,
            &[(self.config.return_to_param.as_str(), return_to)],
        );
        Redirect::to(&location).into_response()
    }
}

fn redirect(Navigation(location): Navigation) -> Response {
    Redirect::to(&location).into_response()
}

/// Cursor of an entered step that requires one
fn cursor(access: &StepAccess) -> FamilyResult<&FamilyId> {
    access
        .family()
        .ok_or_else(|| FamilyError::Internal("step entered without family_id".into()))
}

// ============================================================================
// Create family
// ============================================================================

/// GET /onboarding/create-family
pub async fn create_family_page<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
) -> Response
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    match state.enter(OnboardingStep::CreateFamily, session, None) {
        Ok(_) => Json(StepView::new("create-family", None)).into_response(),
        Err(response) => response,
    }
}

/// POST /onboarding/create-family
pub async fn create_family<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Form(form): Form<CreateFamilyForm>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::CreateFamily, session, None) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };

    let family = CreateFamilyUseCase::new(state.store.clone())
        .execute(Caller::from(&access.session), &form.family_name)
        .await?;

    let next = OnboardingStep::AddChildren.location(&family.id);
    Ok(Redirect::to(&next).into_response())
}

// ============================================================================
// Add children
// ============================================================================

/// GET /onboarding/add-children
pub async fn add_children_page<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> Response
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    match state.enter(OnboardingStep::AddChildren, session, query.family_id.as_deref()) {
        Ok(access) => Json(StepView {
            preset_colors: Some(PRESET_COLORS),
            ..StepView::new("add-children", access.family_id)
        })
        .into_response(),
        Err(response) => response,
    }
}

/// POST /onboarding/add-children
pub async fn add_children<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
    Json(form): Json<ChildrenForm>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::AddChildren, session, query.family_id.as_deref()) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };
    let family_id = cursor(&access)?;

    AddChildrenUseCase::new(state.store.clone())
        .execute(Caller::from(&access.session), family_id, &form.into_inputs())
        .await?;

    let next = OnboardingStep::InviteParent.location(family_id);
    Ok(Redirect::to(&next).into_response())
}

/// POST /onboarding/add-children/skip
pub async fn skip_add_children<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::AddChildren, session, query.family_id.as_deref()) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };

    let next = OnboardingStep::InviteParent.location(cursor(&access)?);
    Ok(Redirect::to(&next).into_response())
}

// ============================================================================
// Invite parent
// ============================================================================

/// GET /onboarding/invite-parent
pub async fn invite_parent_page<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> Response
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    match state.enter(OnboardingStep::InviteParent, session, query.family_id.as_deref()) {
        Ok(access) => Json(StepView::new("invite-parent", access.family_id)).into_response(),
        Err(response) => response,
    }
}

/// POST /onboarding/invite-parent
///
/// Answers with the code and link to share; the page stays on this step.
pub async fn invite_parent<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::InviteParent, session, query.family_id.as_deref()) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };
    let family_id = cursor(&access)?;

    let invitation = InviteParentUseCase::new(state.store.clone(), state.config.clone())
        .execute(Caller::from(&access.session), family_id)
        .await?;

    Ok(Json(invitation).into_response())
}

/// POST /onboarding/invite-parent/skip
///
/// Also used by the "finish" button once an invitation was shared.
pub async fn skip_invite_parent<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::InviteParent, session, query.family_id.as_deref()) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };

    let next = OnboardingStep::Complete.location(cursor(&access)?);
    Ok(Redirect::to(&next).into_response())
}

// ============================================================================
// Family setup (children + invitation on one page)
// ============================================================================

/// GET /onboarding/family-setup
pub async fn family_setup_page<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> Response
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    match state.enter(OnboardingStep::FamilySetup, session, query.family_id.as_deref()) {
        Ok(access) => Json(StepView {
            preset_colors: Some(PRESET_COLORS),
            ..StepView::new("family-setup", access.family_id)
        })
        .into_response(),
        Err(response) => response,
    }
}

/// POST /onboarding/family-setup
pub async fn family_setup<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
    Json(form): Json<ChildrenForm>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::FamilySetup, session, query.family_id.as_deref()) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };
    let family_id = cursor(&access)?;

    let next = FamilySetupUseCase::new(state.store.clone(), state.auth.clone(), state.config.clone())
        .execute(&access.session, family_id, &form.into_inputs())
        .await?;

    Ok(Redirect::to(&next).into_response())
}

/// POST /onboarding/family-setup/invite
///
/// Invitation form of the combined page; the page stays put.
pub async fn family_setup_invite<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let access = match state.enter(OnboardingStep::FamilySetup, session, query.family_id.as_deref()) {
        Ok(access) => access,
        Err(response) => return Ok(response),
    };
    let family_id = cursor(&access)?;

    let invitation = InviteParentUseCase::new(state.store.clone(), state.config.clone())
        .execute(Caller::from(&access.session), family_id)
        .await?;

    Ok(Json(invitation).into_response())
}

// ============================================================================
// Complete
// ============================================================================

/// GET /onboarding/complete
pub async fn complete_page<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<StepQuery>,
) -> Response
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    match state.enter(OnboardingStep::Complete, session, query.family_id.as_deref()) {
        Ok(access) => Json(StepView {
            celebrate: true,
            dashboard_path: Some(state.config.dashboard_path.clone()),
            ..StepView::new("complete", access.family_id)
        })
        .into_response(),
        Err(response) => response,
    }
}

// ============================================================================
// Post-login routing
// ============================================================================

/// GET /onboarding/check
pub async fn onboarding_check<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
) -> Response
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let Some(session) = session else {
        return state.login_redirect("/onboarding/check");
    };

    let target = OnboardingCheckUseCase::new(state.store.clone(), state.config.clone())
        .execute(Caller::from(&session))
        .await;

    Redirect::to(&target).into_response()
}

// ============================================================================
// Join
// ============================================================================

/// GET /join?code=
pub async fn join<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<JoinQuery>,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let Some(code) = InvitationCode::parse(query.code.as_deref()) else {
        return Ok(Redirect::to("/").into_response());
    };

    let Some(session) = session else {
        // New co-parents usually have no account yet
        let return_to = with_query(&state.config.join_path, &[("code", code.as_str())]);
        let location = with_query(
            &state.config.signup_path,
            &[(state.config.return_to_param.as_str(), return_to.as_str())],
        );
        return Ok(Redirect::to(&location).into_response());
    };

    JoinFamilyUseCase::new(state.store.clone())
        .execute(Caller::from(&session), &code)
        .await?;

    Ok(Redirect::to(&state.config.dashboard_path).into_response())
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /dashboard
pub async fn dashboard<S, B>(
    State(state): State<FamilyAppState<S, B>>,
    CurrentSession(session): CurrentSession,
) -> FamilyResult<Response>
where
    S: FamilyStore + Clone + Send + Sync + 'static,
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let Some(session) = session else {
        return Ok(state.login_redirect(&state.config.dashboard_path));
    };

    let output = DashboardUseCase::new(state.store.clone())
        .execute(&session)
        .await?;

    Ok(Json(output).into_response())
}
