//! HTTP Handlers
//!
//! GET routes return JSON page views; POST routes take form bodies and answer
//! with a `303 See Other` redirect, or a problem document the form renders
//! inline.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use platform::url::{local_path, with_query};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ExchangeCodeUseCase, ForgotPasswordInput, PasswordResetUseCase, ResetPasswordInput,
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::entity::session::SignUpOutcome;
use crate::domain::repository::AuthBackend;
use crate::error::AuthResult;
use crate::presentation::cookies;
use crate::presentation::dto::{
    AuthPageQuery, AuthPageView, CallbackQuery, ForgotPasswordForm, LoginForm, MessageResponse,
    ResetPasswordForm, ResetPasswordView, SignUpForm,
};
use crate::presentation::middleware::CurrentSession;

const CONFIRM_EMAIL_MESSAGE: &str = "Check your email to confirm your account";
const RECOVERY_SENT_MESSAGE: &str = "Check your email for a link to reset your password";
const PASSWORD_UPDATED_MESSAGE: &str = "Your password has been updated";

/// Shared state for auth handlers and the session gate
#[derive(Clone)]
pub struct AuthAppState<B>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    pub backend: Arc<B>,
    pub config: Arc<AuthConfig>,
}

impl<B> AuthAppState<B>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    pub fn new(backend: B, config: AuthConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}

/// Caller-supplied return path if it is local, else `fallback`
fn return_path<'a>(candidate: Option<&'a str>, fallback: &'a str) -> &'a str {
    local_path(candidate).unwrap_or(fallback)
}

// ============================================================================
// Login
// ============================================================================

/// GET /auth/login
pub async fn login_page(Query(query): Query<AuthPageQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "login",
        message: query.message,
        redirect_to: query.redirect_to,
    })
}

/// POST /auth/login
pub async fn login<B>(
    State(state): State<AuthAppState<B>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AuthResult<(CookieJar, Redirect)>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.backend.clone());

    let session = use_case
        .execute(SignInInput {
            email: form.email,
            password: form.password,
        })
        .await?;

    let jar = cookies::store_session(jar, &state.config, &session);
    let target = return_path(form.redirect_to.as_deref(), &state.config.post_auth_path);

    Ok((jar, Redirect::to(target)))
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /auth/signup
pub async fn signup_page(Query(query): Query<AuthPageQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "signup",
        message: query.message,
        redirect_to: query.redirect_to,
    })
}

/// POST /auth/signup
pub async fn signup<B>(
    State(state): State<AuthAppState<B>>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> AuthResult<(CookieJar, Redirect)>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.backend.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
            first_name: form.first_name,
            last_name: form.last_name,
        })
        .await?;

    let return_to = local_path(form.redirect_to.as_deref());

    match output.outcome {
        SignUpOutcome::SignedIn(session) => {
            let jar = cookies::store_session(jar, &state.config, &session);
            let target = return_to.unwrap_or(&state.config.post_auth_path);
            Ok((jar, Redirect::to(target)))
        }
        SignUpOutcome::ConfirmationRequired(_) => {
            let jar = cookies::store_verifier(jar, &state.config, output.code_verifier);
            let mut params = vec![("message", CONFIRM_EMAIL_MESSAGE)];
            if let Some(path) = return_to {
                params.push((state.config.gate.return_to_param.as_str(), path));
            }
            let location = with_query(state.config.login_path(), &params);
            Ok((jar, Redirect::to(&location)))
        }
    }
}

// ============================================================================
// Password reset
// ============================================================================

/// GET /auth/forgot-password
pub async fn forgot_password_page(Query(query): Query<AuthPageQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "forgot-password",
        message: query.message,
        redirect_to: None,
    })
}

/// POST /auth/forgot-password
pub async fn forgot_password<B>(
    State(state): State<AuthAppState<B>>,
    jar: CookieJar,
    Form(form): Form<ForgotPasswordForm>,
) -> AuthResult<(CookieJar, Json<MessageResponse>)>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(state.backend.clone(), state.config.clone());

    let verifier = use_case
        .request(ForgotPasswordInput { email: form.email })
        .await?;

    let jar = cookies::store_verifier(jar, &state.config, verifier);

    Ok((
        jar,
        Json(MessageResponse {
            message: RECOVERY_SENT_MESSAGE.to_string(),
        }),
    ))
}

/// GET /auth/reset-password
pub async fn reset_password_page(CurrentSession(session): CurrentSession) -> Json<ResetPasswordView> {
    Json(ResetPasswordView {
        page: "reset-password",
        has_session: session.is_some(),
    })
}

/// POST /auth/reset-password
///
/// The recovery session is ended afterwards so the user signs in with the
/// new password.
pub async fn reset_password<B>(
    State(state): State<AuthAppState<B>>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    Form(form): Form<ResetPasswordForm>,
) -> AuthResult<(CookieJar, Redirect)>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(state.backend.clone(), state.config.clone());

    use_case
        .update(
            session.as_ref(),
            ResetPasswordInput {
                password: form.password,
                confirm_password: form.confirm_password,
            },
        )
        .await?;

    SignOutUseCase::new(state.backend.clone())
        .execute(session.as_ref().map(|s| s.access_token.as_str()))
        .await;

    let jar = cookies::clear_session(jar, &state.config);
    let location = with_query(
        state.config.login_path(),
        &[("message", PASSWORD_UPDATED_MESSAGE)],
    );

    Ok((jar, Redirect::to(&location)))
}

// ============================================================================
// Callback
// ============================================================================

/// GET /auth/callback
///
/// Always redirects; a failed exchange lands on the login page with a message.
pub async fn callback<B>(
    State(state): State<AuthAppState<B>>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Response
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let use_case = ExchangeCodeUseCase::new(state.backend.clone());

    let result = use_case
        .execute(
            query.code.as_deref(),
            cookies::code_verifier(&jar, &state.config),
        )
        .await;

    let jar = cookies::clear_verifier(jar, &state.config);

    match result {
        Ok(session) => {
            let jar = cookies::store_session(jar, &state.config, &session);
            let target = return_path(query.next.as_deref(), "/");
            (jar, Redirect::to(target)).into_response()
        }
        Err(e) => {
            let message = e.to_app_error().message().to_string();
            let location = with_query(state.config.login_path(), &[("message", message.as_str())]);
            (jar, Redirect::to(&location)).into_response()
        }
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /auth/signout
pub async fn sign_out<B>(
    State(state): State<AuthAppState<B>>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> (CookieJar, Redirect)
where
    B: AuthBackend + Clone + Send + Sync + 'static,
{
    let token = session
        .as_ref()
        .map(|s| s.access_token.as_str())
        .or_else(|| cookies::access_token(&jar, &state.config));

    SignOutUseCase::new(state.backend.clone()).execute(token).await;

    let jar = cookies::clear_session(jar, &state.config);
    (jar, Redirect::to(state.config.login_path()))
}
