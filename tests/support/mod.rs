//! Shared transport stubs for the integration suites.
#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use apimap::{
    CallOptions, DispatchOutcome, Headers, Request, Response, Transport, TransportError,
    TransportResult,
};
use async_trait::async_trait;

/// One dispatch as the stub transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub verb: &'static str,
    pub full_path: String,
    pub headers: Headers,
    pub timeout: Option<Duration>,
}

type OutcomeFn = Box<dyn Fn(&Request) -> DispatchOutcome + Send + Sync>;

/// Deterministic transport stub: records every dispatch and answers from a
/// programmable outcome function.
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    outcome: OutcomeFn,
}

impl RecordingTransport {
    /// Resolve every dispatch with the request's full path echoed as `data`.
    pub fn echo() -> Arc<Self> {
        Self::with_outcome(|request| {
            Ok(Response {
                ok: true,
                data: request.full_path.clone(),
                extras: Default::default(),
            })
        })
    }

    /// Reject every dispatch with a connection error.
    pub fn failing(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::with_outcome(move |_| Err(TransportError::Connection(message.clone())))
    }

    pub fn with_outcome(
        outcome: impl Fn(&Request) -> DispatchOutcome + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Box::new(outcome),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(
        &self,
        verb: &'static str,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.calls.lock().unwrap().push(RecordedCall {
            verb,
            full_path: request.full_path.clone(),
            headers: request.headers.clone(),
            timeout: options.and_then(|opts| opts.timeout),
        });
        (self.outcome)(request)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.record("GET", request, options)
    }

    async fn put(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.record("PUT", request, options)
    }

    async fn post(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.record("POST", request, options)
    }

    async fn head(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.record("HEAD", request, options)
    }

    async fn delete(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.record("DELETE", request, options)
    }

    async fn patch(
        &self,
        request: &Request,
        options: Option<&CallOptions>,
    ) -> TransportResult<Response> {
        self.record("PATCH", request, options)
    }
}
