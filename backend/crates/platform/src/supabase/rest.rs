//! PostgREST endpoints
//!
//! Generic select/insert over a table. Row-level security applies to the
//! bearer token passed in, so callers always hand over the user's token.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{SupabaseClient, SupabaseResult};

impl SupabaseClient {
    /// `GET /rest/v1/{table}?{filters}`
    ///
    /// Filters use PostgREST syntax, e.g. `("user_id", "eq.<id>")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: &str,
        filters: &[(&str, String)],
    ) -> SupabaseResult<Vec<T>> {
        tracing::debug!(table, "Backend select");
        let url = self.config.rest_url(table);
        let request = self
            .request(Method::GET, url, Some(access_token))
            .query(filters);
        Self::send_json(request).await
    }

    /// Insert rows and return them as stored
    pub async fn insert<B, T>(&self, table: &str, access_token: &str, rows: &B) -> SupabaseResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, "Backend insert");
        let url = self.config.rest_url(table);
        let request = self
            .request(Method::POST, url, Some(access_token))
            .header("Prefer", "return=representation")
            .json(rows);
        Self::send_json(request).await
    }

    /// Insert rows without reading them back
    pub async fn insert_minimal<B>(&self, table: &str, access_token: &str, rows: &B) -> SupabaseResult<()>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(table, "Backend insert");
        let url = self.config.rest_url(table);
        let request = self
            .request(Method::POST, url, Some(access_token))
            .header("Prefer", "return=minimal")
            .json(rows);
        Self::send_empty(request).await
    }
}
