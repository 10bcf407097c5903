//! HTTP client for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every service call goes through `ApiClient`. It attaches the bearer token
//! currently held in storage (read per request, so login and logout take
//! effect immediately), sends JSON or multipart bodies, and turns non-2xx
//! responses into `ApiError::Status` carrying the server's message.
//!
//! RESPONSE SHAPES
//! ===============
//! The backend wraps most payloads as `{ "data": ... }` but not all of them.
//! `get`/`post_json`/... unwrap the envelope when a non-null `data` key is
//! present and otherwise decode the body as-is. `get_body` skips unwrapping
//! for endpoints whose envelope carries siblings (pagination). List decoding
//! is element-wise lenient: a malformed entry is logged and dropped, and a
//! non-array payload reads as an empty list.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::multipart::MultipartPayload;
use crate::config::ClientConfig;
use crate::storage::{ACCESS_TOKEN_KEY, KeyValueStore, StorageError};

/// Query string pairs; empty values are dropped before sending.
pub type Query<'a> = [(&'a str, String)];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: StatusCode, message: Option<String>, body: Value },
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid multipart part: {0}")]
    Multipart(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Message supplied by the server body (`error`, then `message`), if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The server message when there is one, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Bearer-authenticated client for the PawsConnect REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    media_base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("media_base_url", &self.media_base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from config, sharing `store` for the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            media_base_url: config.media_base_url.clone(),
            store,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn media_base_url(&self) -> &str {
        &self.media_base_url
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Absolute URL for an API path such as `/posts/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        tracing::debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match self.store.get(ACCESS_TOKEN_KEY) {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = parse_body(&bytes);
        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(%status, message = message.as_deref().unwrap_or(""), "api error response");
            return Err(ApiError::Status { status, message, body });
        }
        Ok(body)
    }

    // =========================================================================
    // RAW VALUE REQUESTS
    // =========================================================================

    /// `GET` returning the whole decoded body without envelope handling.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn get_value(&self, path: &str, query: &Query<'_>) -> Result<Value, ApiError> {
        let pairs = non_empty_pairs(query);
        self.send(self.request(Method::GET, path).query(&pairs)).await
    }

    /// Send a JSON (or empty) body with `method`, returning the raw body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await
    }

    /// Send a multipart body with `method`, returning the raw body.
    ///
    /// # Errors
    ///
    /// Returns an error if a part is invalid, on transport failure, or on
    /// non-2xx status.
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        payload: MultipartPayload,
    ) -> Result<Value, ApiError> {
        let form = payload.into_form().map_err(ApiError::Multipart)?;
        self.send(self.request(method, path).multipart(form)).await
    }

    // =========================================================================
    // TYPED HELPERS
    // =========================================================================

    /// `GET` and decode the enveloped payload.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or shape mismatch.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T, ApiError> {
        let body = self.get_value(path, query).await?;
        decode_enveloped(body)
    }

    /// `GET` and decode the whole body, ignoring any envelope.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or shape mismatch.
    pub async fn get_body<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T, ApiError> {
        let body = self.get_value(path, query).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// `GET` a collection, decoding each element leniently.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<Vec<T>, ApiError> {
        let body = self.get_value(path, query).await?;
        Ok(decode_list(unwrap_envelope(body)))
    }

    /// `POST` a JSON body and decode the enveloped reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or shape mismatch.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode_enveloped(self.send_json(Method::POST, path, Some(body)).await?)
    }

    /// `PUT` a JSON body and decode the enveloped reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or shape mismatch.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode_enveloped(self.send_json(Method::PUT, path, Some(body)).await?)
    }

    /// Send a bodiless request and decode the enveloped reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or shape mismatch.
    pub async fn call<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ApiError> {
        decode_enveloped(self.send_json::<Value>(method, path, None).await?)
    }

    /// Send a bodiless request whose reply is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn call_unit(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.send_json::<Value>(method, path, None).await.map(drop)
    }

    /// Send a multipart body and decode the enveloped reply.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid parts, transport failure, non-2xx status,
    /// or shape mismatch.
    pub async fn multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: MultipartPayload,
    ) -> Result<T, ApiError> {
        decode_enveloped(self.send_multipart(method, path, payload).await?)
    }
}

// =============================================================================
// DECODING
// =============================================================================

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn non_empty_pairs<'a>(query: &'a Query<'a>) -> Vec<(&'a str, &'a str)> {
    query
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (*key, value.as_str()))
        .collect()
}

/// Empty bodies read as `null`; non-JSON bodies are kept as a string.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Server error text: the `error` field, then `message`.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Return the value under a non-null `data` key, or the body itself.
#[must_use]
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) if !inner.is_null() => inner,
            Some(inner) => {
                map.insert("data".to_owned(), inner);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Decode after unwrapping the `data` envelope.
///
/// # Errors
///
/// Returns an error if the payload does not match `T`.
pub fn decode_enveloped<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(unwrap_envelope(body))?)
}

/// Decode a JSON array element-wise, dropping entries that do not match `T`.
#[must_use]
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::warn!("expected a list payload; treating as empty");
        }
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed list entry");
                None
            }
        })
        .collect()
}
