//! HTTP client for the commerce API.
//!
//! Wraps `gloo_net` with the two things every call needs: the
//! `Authorization: Bearer` header taken from the session store, and a
//! uniform error type that keeps the status and body of failed responses
//! for logging. There is no retry and no client-side timeout; every
//! failure is terminal for the user action that triggered it.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::system::auth::storage;

/// Base URL of the commerce API. Login and the anonymous single-product
/// fetch are the only endpoints called without a bearer token.
pub const API_BASE: &str = "https://api.example.com/api";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport itself failed (DNS, connection reset, CORS, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered outside the 2xx range. The body is kept
    /// verbatim so callers can log what the API actually said.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The response arrived but was not the JSON we expected.
    #[error("invalid response body: {0}")]
    Decode(String),
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

fn with_auth(builder: RequestBuilder, authenticated: bool) -> RequestBuilder {
    if !authenticated {
        return builder;
    }
    // Absence of a token is not checked here: the server rejects the
    // request and the failure surfaces through the normal error path.
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn into_checked(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    into_checked(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str, authenticated: bool) -> Result<T, ApiError> {
    let response = with_auth(Request::get(&api_url(path)), authenticated)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

pub async fn post_json<T: DeserializeOwned, B: Serialize>(
    path: &str,
    body: &B,
    authenticated: bool,
) -> Result<T, ApiError> {
    let response = with_auth(Request::post(&api_url(path)), authenticated)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

pub async fn put_json<T: DeserializeOwned, B: Serialize>(
    path: &str,
    body: &B,
    authenticated: bool,
) -> Result<T, ApiError> {
    let response = with_auth(Request::put(&api_url(path)), authenticated)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

pub async fn patch_json<T: DeserializeOwned, B: Serialize>(
    path: &str,
    body: &B,
    authenticated: bool,
) -> Result<T, ApiError> {
    let response = with_auth(Request::patch(&api_url(path)), authenticated)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

/// PATCH without a request body (the flip-status endpoint).
pub async fn patch_empty<T: DeserializeOwned>(path: &str, authenticated: bool) -> Result<T, ApiError> {
    let response = with_auth(Request::patch(&api_url(path)), authenticated)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

pub async fn delete_json<T: DeserializeOwned>(path: &str, authenticated: bool) -> Result<T, ApiError> {
    let response = with_auth(Request::delete(&api_url(path)), authenticated)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("/orders/admin/all"),
            "https://api.example.com/api/orders/admin/all"
        );
    }

    #[test]
    fn test_error_display_keeps_status_and_body() {
        let err = ApiError::Http {
            status: 422,
            body: r#"{"error":"price must be positive"}"#.to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("price must be positive"));
    }
}
