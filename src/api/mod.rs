//! REST API Client
//!
//! Frontend bindings to backend endpoints, organized by resource.
//! Every request carries the stored bearer token when there is one.

mod auth;
mod dashboard;
mod notifications;
mod projects;
mod tasks;
mod users;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::from_api;
use crate::storage::TokenStorage;

// Re-export all public items
pub use auth::*;
pub use dashboard::*;
pub use notifications::*;
pub use projects::*;
pub use tasks::*;
pub use users::*;

/// Characters that cannot appear raw inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'/').add(b'?').add(b'#').add(b'%').add(b'"');

/// Encode an id for use as a path segment
pub fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct ApiClient {
    base_url: &'static str,
    tokens: TokenStorage,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.api_url,
            tokens: TokenStorage::new(config.token_key),
        }
    }

    pub fn tokens(&self) -> TokenStorage {
        self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = reqwest::Client::new().request(method, self.url(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.json::<Value>().await?;
        Ok(from_api(body)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(query);
        Self::decode(Self::execute(builder).await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        Self::decode(Self::execute(builder).await?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        Self::decode(Self::execute(builder).await?).await
    }

    /// Send a body and ignore whatever comes back
    pub async fn send_discarding<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(method, path).json(body);
        Self::execute(builder).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        Self::execute(self.request(Method::DELETE, path)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let api = ApiClient::new(&Config::default());
        assert_eq!(api.url("/projects"), "http://localhost:3000/api/projects");
    }

    #[test]
    fn test_segment_escapes_separators() {
        assert_eq!(segment("64f1c0ffee"), "64f1c0ffee");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
    }
}
