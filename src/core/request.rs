//! Per-call value objects: parameters, arguments, and the built request.
use std::{sync::Arc, time::Duration};

use bytes::Bytes;

use crate::config::models::{EndpointConfig, Headers};

/// Insertion-ordered request parameters.
///
/// Keys matching a `{key}` placeholder in the path template are consumed by
/// substitution; the rest become the query string in the order they were
/// inserted. Values are stringified on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert. A repeated key overwrites the earlier value in place,
    /// keeping its original position.
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Free-form options bag handed through to the transport untouched by the
/// core. The default transport honors `timeout`; custom adapters may read
/// anything they stash in `extra`.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Per-call deadline applied by the transport
    pub timeout: Option<Duration>,
    /// Adapter-specific settings
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Optional per-call arguments for an endpoint method.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub params: Option<RequestParams>,
    pub body: Option<Bytes>,
    pub headers: Option<Headers>,
    pub options: Option<CallOptions>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, params: RequestParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a single call-site header override.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn options(mut self, options: CallOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// A fully resolved request, built fresh for every call and never mutated
/// once dispatch begins.
#[derive(Debug, Clone)]
pub struct Request {
    /// Resolved URL: map host + resource host + substituted template + query
    pub full_path: String,
    /// The originating endpoint declaration
    pub endpoint: Arc<EndpointConfig>,
    /// Headers merged across map, resource, endpoint, and call scopes
    pub headers: Headers,
    /// Optional pass-through payload
    pub body: Option<Bytes>,
    /// The original parameter map, if any
    pub params: Option<RequestParams>,
}

impl Request {
    /// Assemble a request from its already-resolved parts.
    pub fn build(
        full_path: String,
        endpoint: Arc<EndpointConfig>,
        headers: Headers,
        body: Option<Bytes>,
        params: Option<RequestParams>,
    ) -> Self {
        Self {
            full_path,
            endpoint,
            headers,
            body,
            params,
        }
    }
}
