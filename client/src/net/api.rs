//! REST client for the Doughbox API.
//!
//! ERROR HANDLING
//! ==============
//! Every non-success response is normalized into a [`session::ApiError`]
//! before it reaches callers, so pages only ever branch on
//! `{ status, error, message, details }`. A request that never got a
//! response is reported separately as [`FetchError::Network`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::Serialize;
use session::ApiError;

use super::types::{FetchError, Payload};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8084";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as a bearer token on every request when set.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), api_token: None, timeout: DEFAULT_TIMEOUT }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client holding the session cookie between requests.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the underlying client cannot be
    /// built (e.g. no TLS backend).
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::network)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_token: config.api_token,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET path`, returning JSON or text depending on the content type.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`] when no response arrives, [`FetchError::Api`]
    /// for any non-success status.
    pub async fn fetch(&self, path: &str) -> Result<Payload, FetchError> {
        let res = self.request(Method::GET, path).send().await.map_err(FetchError::network)?;
        tracing::debug!(%path, status = res.status().as_u16(), "fetch");
        read_payload(res).await
    }

    /// Send `payload` as JSON with `method`. Only success or failure is
    /// reported; the response body is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch`].
    pub async fn send_mutate<T>(&self, path: &str, payload: &T, method: Method) -> Result<(), FetchError>
    where
        T: Serialize + ?Sized,
    {
        let res = self
            .request(method.clone(), path)
            .json(payload)
            .send()
            .await
            .map_err(FetchError::network)?;
        tracing::debug!(%path, %method, status = res.status().as_u16(), "mutate");
        if !res.status().is_success() {
            return Err(FetchError::Api(api_error(res).await));
        }
        Ok(())
    }
}

fn content_type(res: &Response) -> String {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

async fn read_payload(res: Response) -> Result<Payload, FetchError> {
    if !res.status().is_success() {
        return Err(FetchError::Api(api_error(res).await));
    }
    let content_type = content_type(&res);
    let body = res.text().await.map_err(FetchError::network)?;
    decode_body(&content_type, body)
}

pub(crate) fn decode_body(content_type: &str, body: String) -> Result<Payload, FetchError> {
    if content_type.contains(JSON_CONTENT_TYPE) {
        return serde_json::from_str(&body)
            .map(Payload::Json)
            .map_err(|e| FetchError::Decode(e.to_string()));
    }
    Ok(Payload::Text(body))
}

async fn api_error(res: Response) -> ApiError {
    let status = res.status();
    let content_type = content_type(&res);
    // An unreadable body still yields an error with the status intact.
    let body = res.text().await.unwrap_or_default();
    ApiError::from_response(status.as_u16(), status.canonical_reason(), &content_type, &body)
}
