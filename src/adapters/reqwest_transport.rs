use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use crate::{
    core::{
        request::{CallOptions, Request},
        response::Response,
    },
    ports::transport::{Transport, TransportError, TransportResult},
};

/// Default transport adapter using reqwest with rustls TLS.
///
/// Responsibilities:
/// * Validates and applies every merged request header
/// * Sends the optional pass-through body
/// * Honors the per-call timeout option
/// * Resolves HTTP error statuses as a `Response` with `ok: false`
/// * Maps failures below the HTTP layer to [`TransportError`]
///
/// This adapter is intentionally minimal; retries / circuit breaking can be
/// layered on a different abstraction if required.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport with a default client.
    pub fn new() -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Connection(format!("failed to build client: {e}")))?;

        tracing::debug!("created reqwest transport");
        Ok(Self { client })
    }

    /// Wrap an already-configured client (proxies, pools, custom TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Convert the merged string headers into validated header material.
    fn build_headers(request: &Request) -> TransportResult<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidRequest(format!("invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::InvalidRequest(format!("invalid value for header '{name}': {e}"))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    async fn exchange(
        &self,
        method: Method,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        let headers = Self::build_headers(request)?;

        let mut builder = self
            .client
            .request(method.clone(), &request.full_path)
            .headers(headers);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let timeout = options.and_then(|opts| opts.timeout);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(http.method = %method, url = %request.full_path, "sending request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout()
                && let Some(timeout) = timeout
            {
                return TransportError::Timeout(timeout);
            }
            TransportError::Connection(format!(
                "{method} {} failed: {e}",
                request.full_path
            ))
        })?;

        let status = response.status();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let data = response.text().await.map_err(|e| {
            TransportError::Connection(format!(
                "{method} {} failed reading body: {e}",
                request.full_path
            ))
        })?;

        tracing::debug!(http.status_code = status.as_u16(), url = %request.full_path, "request completed");

        Ok(Response::from_status(status, data, response_headers))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.exchange(Method::GET, request, options).await
    }

    async fn put(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.exchange(Method::PUT, request, options).await
    }

    async fn post(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.exchange(Method::POST, request, options).await
    }

    async fn head(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.exchange(Method::HEAD, request, options).await
    }

    async fn delete(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.exchange(Method::DELETE, request, options).await
    }

    async fn patch(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.exchange(Method::PATCH, request, options).await
    }
}
