//! Hosted backend client (Supabase)
//!
//! A thin, cloneable handle over `reqwest` for the two services the
//! application consumes:
//! - GoTrue (`/auth/v1`) in [`auth`]
//! - PostgREST (`/rest/v1`) in [`rest`]
//!
//! The handle is constructed once at startup and injected into each feature
//! router; nothing here is global.

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

pub use auth::{GoTrueSession, GoTrueUser, SignUpParams, SignUpResponse};
pub use config::SupabaseConfig;
pub use error::{SupabaseError, SupabaseResult};

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> SupabaseResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Request carrying the `apikey` header and a bearer token.
    ///
    /// Without a user token the anon key is used as bearer, which is how
    /// GoTrue and PostgREST identify anonymous callers.
    fn request(&self, method: Method, url: String, bearer: Option<&str>) -> RequestBuilder {
        let token = bearer.unwrap_or(&self.config.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> SupabaseResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(SupabaseError::from_response(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SupabaseError::Decode(e.to_string()))
    }

    async fn send_empty(request: RequestBuilder) -> SupabaseResult<()> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(SupabaseError::from_response(status.as_u16(), &body));
        }

        Ok(())
    }
}
