use async_trait::async_trait;
use axum::http::{header, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned a non-JSON body: {0}")]
    InvalidBody(String),
}

/// Typed client interface for the backend service: (method, path, body) in,
/// (status, body) out. Kept independent of the transport library so it can
/// be swapped or mocked in tests without touching route logic.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn forward(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(StatusCode, Value), UpstreamError>;
}

/// reqwest-backed passthrough client. No retry, no timeout override, no
/// payload transformation; the caller's Authorization header travels
/// untouched and the upstream status code is relayed verbatim.
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstream {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(&config::config().upstream.base_url)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn forward(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(StatusCode, Value), UpstreamError> {
        let mut request = self.client.request(method, self.url_for(path));

        if let Some(authorization) = authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;

        Ok((status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url_and_path() {
        let client = HttpUpstream::new("http://localhost:5000");
        assert_eq!(client.url_for("/api/brands"), "http://localhost:5000/api/brands");
    }

    #[test]
    fn tolerates_trailing_slash_in_base_url() {
        let client = HttpUpstream::new("http://localhost:5000/");
        assert_eq!(client.url_for("/api/brands"), "http://localhost:5000/api/brands");
    }
}
