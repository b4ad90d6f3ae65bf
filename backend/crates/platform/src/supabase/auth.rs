//! GoTrue endpoints

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{SupabaseClient, SupabaseResult};

/// User object as returned by GoTrue
#[derive(Debug, Clone, Deserialize)]
pub struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
    /// Empty for an obfuscated "already registered" sign-up answer
    #[serde(default)]
    pub identities: Option<Vec<Value>>,
}

/// Token grant response
#[derive(Debug, Clone, Deserialize)]
pub struct GoTrueSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: GoTrueUser,
}

/// `/signup` answers with a session when e-mail confirmation is disabled,
/// otherwise with the bare user.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(GoTrueSession),
    User(GoTrueUser),
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpParams {
    pub email: String,
    pub password: String,
    pub data: Value,
    pub code_challenge: String,
    pub code_challenge_method: &'static str,
}

impl SupabaseClient {
    /// `GET /user` for the owner of `access_token`
    pub async fn get_user(&self, access_token: &str) -> SupabaseResult<GoTrueUser> {
        let url = self.config.auth_url("user");
        Self::send_json(self.request(Method::GET, url, Some(access_token))).await
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> SupabaseResult<GoTrueSession> {
        let url = self.config.auth_url("token");
        let request = self
            .request(Method::POST, url, None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        Self::send_json(request).await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> SupabaseResult<GoTrueSession> {
        let url = self.config.auth_url("token");
        let request = self
            .request(Method::POST, url, None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        Self::send_json(request).await
    }

    /// PKCE code exchange (`grant_type=pkce`)
    pub async fn exchange_code_for_session(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> SupabaseResult<GoTrueSession> {
        let url = self.config.auth_url("token");
        let request = self
            .request(Method::POST, url, None)
            .query(&[("grant_type", "pkce")])
            .json(&json!({ "auth_code": auth_code, "code_verifier": code_verifier }));
        Self::send_json(request).await
    }

    pub async fn sign_up(
        &self,
        params: &SignUpParams,
        redirect_to: &str,
    ) -> SupabaseResult<SignUpResponse> {
        let url = self.config.auth_url("signup");
        let request = self
            .request(Method::POST, url, None)
            .query(&[("redirect_to", redirect_to)])
            .json(params);
        Self::send_json(request).await
    }

    pub async fn sign_out(&self, access_token: &str) -> SupabaseResult<()> {
        let url = self.config.auth_url("logout");
        Self::send_empty(self.request(Method::POST, url, Some(access_token))).await
    }

    /// Send the password recovery e-mail
    pub async fn recover(
        &self,
        email: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> SupabaseResult<()> {
        let url = self.config.auth_url("recover");
        let request = self
            .request(Method::POST, url, None)
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({
                "email": email,
                "code_challenge": code_challenge,
                "code_challenge_method": "s256",
            }));
        Self::send_empty(request).await
    }

    pub async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> SupabaseResult<GoTrueUser> {
        let url = self.config.auth_url("user");
        let request = self
            .request(Method::PUT, url, Some(access_token))
            .json(&json!({ "password": password }));
        Self::send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_response_with_session() {
        let body = r#"{
            "access_token": "a", "refresh_token": "r", "expires_in": 3600,
            "token_type": "bearer",
            "user": { "id": "u1", "email": "a@b.co", "identities": [{}] }
        }"#;
        let parsed: SignUpResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(parsed, SignUpResponse::Session(s) if s.user.id == "u1"));
    }

    #[test]
    fn test_sign_up_response_without_session() {
        let body = r#"{ "id": "u2", "email": "a@b.co", "identities": [] }"#;
        let parsed: SignUpResponse = serde_json::from_str(body).unwrap();
        match parsed {
            SignUpResponse::User(user) => {
                assert_eq!(user.id, "u2");
                assert_eq!(user.identities.map(|i| i.len()), Some(0));
            }
            SignUpResponse::Session(_) => panic!("expected bare user"),
        }
    }
}
