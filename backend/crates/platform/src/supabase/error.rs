//! Supabase client errors

use serde_json::Value;
use thiserror::Error;

pub type SupabaseResult<T> = Result<T, SupabaseError>;

#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Network failure, timeout, or TLS error
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A success response whose body did not match the expected shape
    #[error("Unexpected backend response: {0}")]
    Decode(String),
}

impl SupabaseError {
    /// Build an `Api` error from a GoTrue or PostgREST error body.
    ///
    /// GoTrue uses `msg`/`error_description`/`error_code`, PostgREST uses
    /// `message`/`code`; whichever is present wins.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let json: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        let text = |key: &str| json.get(key).and_then(Value::as_str).map(str::to_string);

        let message = text("msg")
            .or_else(|| text("message"))
            .or_else(|| text("error_description"))
            .or_else(|| text("error"))
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

        let code = text("error_code")
            .or_else(|| text("code"))
            .or_else(|| text("error"));

        SupabaseError::Api {
            status,
            code,
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SupabaseError::Api { status, .. } => Some(*status),
            SupabaseError::Transport(e) => e.status().map(|s| s.as_u16()),
            SupabaseError::Decode(_) => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            SupabaseError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True when the backend refused the caller's token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// True when the request never got an answer (connect error, timeout)
    pub fn is_unreachable(&self) -> bool {
        match self {
            SupabaseError::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Backend-provided message, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            SupabaseError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}
