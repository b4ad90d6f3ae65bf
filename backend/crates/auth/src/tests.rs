//! Router-level tests: the session gate and the auth flows driven through HTTP

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use axum::routing::get;

    use crate::application::config::AuthConfig;
    use crate::presentation::handlers::AuthAppState;
    use crate::presentation::middleware::CurrentSession;
    use crate::presentation::router::{auth_router, with_session_gate};
    use crate::testing::FakeAuthBackend;

    pub const EMAIL: &str = "jo@example.com";
    pub const PASSWORD: &str = "correct-horse";

    async fn whoami(CurrentSession(session): CurrentSession) -> String {
        session.map(|s| s.user.id.to_string()).unwrap_or_default()
    }

    pub fn backend() -> FakeAuthBackend {
        FakeAuthBackend::new().with_account(EMAIL, PASSWORD, "Jo", "Doe")
    }

    pub fn app(backend: FakeAuthBackend) -> Router {
        let state = AuthAppState::new(backend, AuthConfig::development());
        let router = Router::new()
            .nest("/auth", auth_router(state.clone()))
            .route("/", get(whoami))
            .route("/dashboard", get(whoami))
            .route("/onboarding/create-family", get(whoami))
            .route("/api/health", get(|| async { "ok" }))
            .route("/static/app.css", get(|| async { "body{}" }));
        with_session_gate(router, state)
    }

    pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn location(response: &Response<Body>) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// Value of cookie `name` set by the response, if any
    pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        set_cookies(response).into_iter().find_map(|c| {
            c.strip_prefix(&prefix)
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }
}

#[cfg(test)]
mod gate_tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::support::*;

    #[tokio::test]
    async fn test_protected_without_session_redirects_to_login() {
        let response = app(backend())
            .oneshot(get_request("/dashboard", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/auth/login?redirectTo=/dashboard");
        assert_eq!(response.headers()["x-gate-redirects"], "1");
        assert_eq!(cookie_value(&response, "gate-redirects").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_protected_with_session_passes_session_to_handler() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        let cookie = format!("sb-access-token={}", session.access_token);

        let response = app(backend)
            .oneshot(get_request("/dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, session.user.id.to_string());
    }

    #[tokio::test]
    async fn test_auth_only_with_session_redirects_to_landing() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        let cookie = format!("sb-access-token={}", session.access_token);

        let response = app(backend)
            .oneshot(get_request("/auth/login", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn test_exempt_paths_skip_session_lookup() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        let cookie = format!("sb-access-token={}", session.access_token);

        for path in ["/api/health", "/static/app.css"] {
            let response = app(backend.clone())
                .oneshot(get_request(path, Some(&cookie)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_counter_above_threshold_allows() {
        let request = {
            let mut request = get_request("/dashboard", None);
            request
                .headers_mut()
                .insert("x-gate-redirects", "3".parse().unwrap());
            request
        };

        let response = app(backend()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_counter_cookie_is_honoured_and_cleared() {
        let response = app(backend())
            .oneshot(get_request("/dashboard", Some("gate-redirects=3")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = set_cookies(&response)
            .into_iter()
            .any(|c| c.starts_with("gate-redirects=;") || c.starts_with("gate-redirects=\"\""));
        assert!(cleared);
    }

    #[tokio::test]
    async fn test_counter_at_threshold_still_redirects() {
        let response = app(backend())
            .oneshot(get_request("/dashboard", Some("gate-redirects=2")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["x-gate-redirects"], "3");
    }

    #[tokio::test]
    async fn test_expired_access_token_is_refreshed() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        backend.expire_access_token(&session.access_token);
        let cookie = format!(
            "sb-access-token={}; sb-refresh-token={}",
            session.access_token, session.refresh_token
        );

        let response = app(backend)
            .oneshot(get_request("/dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let new_access = cookie_value(&response, "sb-access-token").unwrap();
        assert_ne!(new_access, session.access_token);
        assert!(cookie_value(&response, "sb-refresh-token").is_some());
        assert_eq!(body_text(response).await, session.user.id.to_string());
    }

    #[tokio::test]
    async fn test_rejected_cookies_are_cleared() {
        let response = app(backend())
            .oneshot(get_request(
                "/dashboard",
                Some("sb-access-token=bogus; sb-refresh-token=bogus"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(cookie_value(&response, "sb-access-token").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_open() {
        let backend = backend();
        backend.set_unreachable(true);

        let response = app(backend)
            .oneshot(get_request("/dashboard", Some("sb-access-token=whatever")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_root_is_allowed_without_session() {
        let response = app(backend())
            .oneshot(get_request("/", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[cfg(test)]
mod flow_tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::support::*;

    #[tokio::test]
    async fn test_signup_short_password_rejected_before_network() {
        let backend = backend();
        let body = "email=new%40example.com&password=1234567&confirm_password=1234567\
                    &first_name=Sam&last_name=Doe";

        let response = app(backend.clone())
            .oneshot(form_request("/auth/signup", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Password must be at least 8 characters");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_signup_requires_all_fields() {
        let backend = backend();
        let response = app(backend.clone())
            .oneshot(form_request("/auth/signup", "email=new%40example.com", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "All fields are required");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_signup_awaiting_confirmation() {
        let backend = backend();
        let body = "email=new%40example.com&password=password1&confirm_password=password1\
                    &first_name=Sam&last_name=Doe";

        let response = app(backend.clone())
            .oneshot(form_request("/auth/signup", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/auth/login?message="));
        assert!(cookie_value(&response, "sb-code-verifier").is_some());
        assert!(cookie_value(&response, "sb-access-token").is_none());

        let profiles = backend.profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].first_name, "Sam");
    }

    #[tokio::test]
    async fn test_signup_auto_confirmed_signs_in() {
        let backend = backend().auto_confirm();
        let body = "email=new%40example.com&password=password1&confirm_password=password1\
                    &first_name=Sam&last_name=Doe&redirect_to=%2Fjoin%3Fcode%3DABCD2345";

        let response = app(backend)
            .oneshot(form_request("/auth/signup", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/join?code=ABCD2345");
        assert!(cookie_value(&response, "sb-access-token").is_some());
    }

    #[tokio::test]
    async fn test_signup_existing_email() {
        let body = "email=jo%40example.com&password=password1&confirm_password=password1\
                    &first_name=Jo&last_name=Doe";

        let response = app(backend())
            .oneshot(form_request("/auth/signup", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["detail"], "This email is already in use");
    }

    #[tokio::test]
    async fn test_login_success_goes_to_post_auth_route() {
        let body = format!("email=jo%40example.com&password={PASSWORD}");

        let response = app(backend())
            .oneshot(form_request("/auth/login", &body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/onboarding/check");
        assert!(cookie_value(&response, "sb-access-token").is_some());
        assert!(cookie_value(&response, "sb-refresh-token").is_some());
    }

    #[tokio::test]
    async fn test_login_honours_local_redirect_only() {
        let local = format!("email=jo%40example.com&password={PASSWORD}&redirect_to=%2Fdashboard");
        let response = app(backend())
            .oneshot(form_request("/auth/login", &local, None))
            .await
            .unwrap();
        assert_eq!(location(&response), "/dashboard");

        let foreign =
            format!("email=jo%40example.com&password={PASSWORD}&redirect_to=%2F%2Fevil.example");
        let response = app(backend())
            .oneshot(form_request("/auth/login", &foreign, None))
            .await
            .unwrap();
        assert_eq!(location(&response), "/onboarding/check");
    }

    #[tokio::test]
    async fn test_login_with_rejected_cookies_keeps_new_session() {
        let body = format!("email=jo%40example.com&password={PASSWORD}");

        let response = app(backend())
            .oneshot(form_request(
                "/auth/login",
                &body,
                Some("sb-access-token=bogus; sb-refresh-token=bogus"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        for name in ["sb-access-token", "sb-refresh-token"] {
            let prefix = format!("{name}=");
            let set: Vec<_> = set_cookies(&response)
                .into_iter()
                .filter(|c| c.starts_with(&prefix))
                .collect();
            assert_eq!(set.len(), 1, "{name}: {set:?}");
            assert!(!cookie_value(&response, name).unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_login_rejects_control_characters_in_redirect() {
        for redirect in ["%2F%09%2Fevil.example", "%2Fa%0Ab", "%2Fa%5C%5Cb"] {
            let body =
                format!("email=jo%40example.com&password={PASSWORD}&redirect_to={redirect}");
            let response = app(backend())
                .oneshot(form_request("/auth/login", &body, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{redirect}");
            assert_eq!(location(&response), "/onboarding/check", "{redirect}");
        }
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let response = app(backend())
            .oneshot(form_request(
                "/auth/login",
                "email=jo%40example.com&password=nope",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "Incorrect email or password");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let backend = backend();
        let response = app(backend.clone())
            .oneshot(form_request("/auth/login", "email=&password=", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "Email and password are required"
        );
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_login_page_echoes_query() {
        let response = app(backend())
            .oneshot(get_request("/auth/login?redirectTo=/dashboard&message=Hi", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["page"], "login");
        assert_eq!(json["redirect_to"], "/dashboard");
        assert_eq!(json["message"], "Hi");
    }

    #[tokio::test]
    async fn test_forgot_password_sends_recovery_link() {
        let backend = backend();
        let response = app(backend.clone())
            .oneshot(form_request(
                "/auth/forgot-password",
                "email=jo%40example.com",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(cookie_value(&response, "sb-code-verifier").is_some());
        assert_eq!(
            backend.recoveries(),
            vec![(
                "jo@example.com".to_string(),
                "http://localhost:3000/auth/callback?next=/auth/reset-password".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_forgot_password_requires_email() {
        let response = app(backend())
            .oneshot(form_request("/auth/forgot-password", "email=", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "Please enter your email address"
        );
    }

    #[tokio::test]
    async fn test_callback_exchanges_code() {
        let backend = backend();
        backend.add_code("code-1", EMAIL);

        let response = app(backend)
            .oneshot(get_request(
                "/auth/callback?code=code-1&next=/auth/reset-password",
                Some("sb-code-verifier=verifier"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/reset-password");
        assert!(cookie_value(&response, "sb-access-token").is_some());
        assert_eq!(cookie_value(&response, "sb-code-verifier").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_callback_without_verifier_goes_to_login() {
        let backend = backend();
        backend.add_code("code-1", EMAIL);

        let response = app(backend)
            .oneshot(get_request("/auth/callback?code=code-1", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/auth/login?message="));
        assert!(cookie_value(&response, "sb-access-token").is_none());
    }

    #[tokio::test]
    async fn test_reset_password_requires_session() {
        let response = app(backend())
            .oneshot(form_request(
                "/auth/reset-password",
                "password=new-password&confirm_password=new-password",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reset_password_updates_and_signs_out() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        let cookie = format!("sb-access-token={}", session.access_token);

        let response = app(backend.clone())
            .oneshot(form_request(
                "/auth/reset-password",
                "password=new-password&confirm_password=new-password",
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/auth/login?message=Your+password+has+been+updated"
        );
        assert_eq!(backend.password_of(EMAIL).as_deref(), Some("new-password"));
        assert_eq!(backend.signed_out(), vec![session.access_token]);
    }

    #[tokio::test]
    async fn test_sign_out_clears_cookies() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        let cookie = format!(
            "sb-access-token={}; sb-refresh-token={}",
            session.access_token, session.refresh_token
        );

        let response = app(backend.clone())
            .oneshot(form_request("/auth/signout", "", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login");
        assert_eq!(cookie_value(&response, "sb-access-token").as_deref(), Some(""));
        assert_eq!(cookie_value(&response, "sb-refresh-token").as_deref(), Some(""));
        assert_eq!(backend.signed_out(), vec![session.access_token]);
    }

    #[tokio::test]
    async fn test_sign_out_after_refresh_clears_cookies() {
        let backend = backend();
        let session = backend.issue_session(EMAIL);
        backend.expire_access_token(&session.access_token);
        let cookie = format!(
            "sb-access-token={}; sb-refresh-token={}",
            session.access_token, session.refresh_token
        );

        let response = app(backend.clone())
            .oneshot(form_request("/auth/signout", "", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        for name in ["sb-access-token", "sb-refresh-token"] {
            let prefix = format!("{name}=");
            let set: Vec<_> = set_cookies(&response)
                .into_iter()
                .filter(|c| c.starts_with(&prefix))
                .collect();
            assert_eq!(set.len(), 1, "{name}: {set:?}");
            assert_eq!(cookie_value(&response, name).as_deref(), Some(""));
        }

        // The refreshed token is the one revoked
        let signed_out = backend.signed_out();
        assert_eq!(signed_out.len(), 1);
        assert_ne!(signed_out[0], session.access_token);
    }
}
