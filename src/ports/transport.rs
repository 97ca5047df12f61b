use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::{
    request::{CallOptions, Request},
    response::Response,
};

/// Custom error type for transport operations
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum TransportError {
    /// Error when the exchange fails below the HTTP layer
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error when the per-call deadline elapses
    #[error("Timeout error after {0:?}")]
    Timeout(Duration),

    /// Error when the built request cannot be sent as-is
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// What a single dispatch produced: a response (HTTP error statuses
/// included) or a transport failure. After-hooks observe this whole value.
pub type DispatchOutcome = TransportResult<Response>;

/// Transport defines the port (interface) for performing the actual network
/// exchange, one method per HTTP verb.
///
/// The core calls exactly these six operations; any HTTP client satisfying
/// this contract is a valid collaborator. The provided
/// [`ReqwestTransport`](crate::adapters::ReqwestTransport) is one concrete
/// instance; a mocked implementation is the primary seam for testing.
///
/// Implementations must resolve HTTP error statuses as a `Response` with
/// `ok: false` and reserve `Err` for failures below the HTTP layer.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Perform a GET exchange for the given request.
    async fn get(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response>;

    /// Perform a PUT exchange for the given request.
    async fn put(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response>;

    /// Perform a POST exchange for the given request.
    async fn post(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response>;

    /// Perform a HEAD exchange for the given request.
    async fn head(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response>;

    /// Perform a DELETE exchange for the given request.
    async fn delete(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response>;

    /// Perform a PATCH exchange for the given request.
    async fn patch(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response>;
}
