//! The transport's answer to a dispatched request.
use http::StatusCode;

use crate::config::models::Headers;

/// Transport-specific metadata riding along with a response for advanced
/// inspection.
#[derive(Debug, Clone, Default)]
pub struct ResponseExtras {
    /// HTTP status code, when the transport has one
    pub status: Option<StatusCode>,
    /// Response headers as reported by the transport
    pub headers: Headers,
}

/// Outcome of a single dispatch, produced once by the transport and handed to
/// after-hooks and then the caller.
///
/// An HTTP error status is still a *successful* dispatch: a 404 arrives here
/// with `ok: false` rather than as a transport error.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Whether the status code landed in [200, 299]
    pub ok: bool,
    /// Raw text body
    pub data: String,
    /// Transport metadata
    pub extras: ResponseExtras,
}

impl Response {
    /// Build a response from a status code and raw body, deriving `ok`.
    pub fn from_status(status: StatusCode, data: String, headers: Headers) -> Self {
        Self {
            ok: status.is_success(),
            data,
            extras: ResponseExtras {
                status: Some(status),
                headers,
            },
        }
    }
}
