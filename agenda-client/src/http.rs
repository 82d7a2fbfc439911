//! HTTP client for the scheduling backend
//!
//! Single entry point for every request: the bearer token is read from the
//! injected [`Session`] on each call, and a 401 clears it before the error is
//! handed back. One attempt per request, no retries.

use std::time::Duration;

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// PATCH without a body (state transitions such as `/cancel`)
    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;

    /// Session whose token authenticates the requests
    fn session(&self) -> &Session;
}

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    config: ClientConfig,
    session: Session,
}

impl NetworkHttpClient {
    pub fn new(config: ClientConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn auth_header(&self) -> Option<String> {
        self.session.token().map(|t| format!("Bearer {}", t))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!(method = %method, url = %url, "Sending request");
        let mut req = self.client.request(method, url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let url = response.url().path().to_string();

        if status == StatusCode::UNAUTHORIZED {
            let body = non_empty(response.text().await.ok());
            self.session.clear();
            tracing::warn!(path = %url, "Received 401, session token cleared");
            return Err(ClientError::Unauthorized { body });
        }

        if !status.is_success() {
            let body = non_empty(response.text().await.ok());
            tracing::debug!(path = %url, status = %status, "Request failed");
            return Err(ClientError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return empty_body();
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Value for a 2xx without a body: `null` where the target accepts it,
/// otherwise an empty object so acknowledgement structs take their defaults.
fn empty_body<T: DeserializeOwned>() -> ClientResult<T> {
    use serde_json::{Map, Value};

    serde_json::from_value(Value::Null)
        .or_else(|_| serde_json::from_value(Value::Object(Map::new())))
        .map_err(Into::into)
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::PATCH, path)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
