//! Configuration data structures for apimap.
//!
//! These types map directly to TOML (also JSON / YAML) configuration files. They are
//! intentionally serde‑friendly and include defaults so that minimal configs remain concise.
//! Lifecycle hooks are code rather than data, so they ride along as `#[serde(skip)]` fields:
//! a file-loaded config is purely declarative and hooks are attached programmatically.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::hooks::{AfterHook, BeforeHook};

/// String-to-string header map merged across scopes (global → resource → endpoint → call).
pub type Headers = HashMap<String, String>;

/// HTTP verbs the transport boundary understands.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Put,
    Post,
    Head,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Canonical wire spelling of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Head => "HEAD",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, templated HTTP operation within a resource.
///
/// `path` may contain `{key}` placeholders resolved from the per-call
/// parameter map. Immutable once registered with a resource map.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EndpointConfig {
    /// Unique key within the owning resource
    pub name: String,
    /// Path template, concatenated after the resource host (e.g. "/users/{id}")
    pub path: String,
    /// HTTP verb, GET when unspecified
    pub method: HttpMethod,
    /// Endpoint-level header overrides
    pub headers: Headers,
    /// Gating interceptor run before dispatch
    #[serde(skip)]
    pub before_request: Option<BeforeHook>,
    /// Observational interceptor run after dispatch
    #[serde(skip)]
    pub after_response: Option<AfterHook>,
}

impl EndpointConfig {
    /// Shorthand for the common name + path + verb case.
    pub fn new(name: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method,
            ..Self::default()
        }
    }
}

/// A named group of endpoints sharing a host segment and header/hook defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResourceConfig {
    /// Unique key within the api map
    pub name: String,
    /// Host segment concatenated after the map-level host (e.g. "/v1")
    pub host: String,
    /// Resource-level header defaults
    pub headers: Headers,
    /// Gating interceptor run before dispatch, after the map-level hook
    #[serde(skip)]
    pub before_request: Option<BeforeHook>,
    /// Observational interceptor run after dispatch, after the map-level hook
    #[serde(skip)]
    pub after_response: Option<AfterHook>,
    /// Endpoint declarations, names unique within this resource
    pub endpoints: Vec<EndpointConfig>,
}

/// Root configuration: global defaults plus the resource declarations.
///
/// Supplied once at [`ApiMap::new`](crate::core::ApiMap::new); never mutated
/// afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Base host every full path starts with (e.g. "https://api.example.com")
    pub host: String,
    /// Global header defaults
    pub headers: Headers,
    /// Gating interceptor run first before every dispatch
    #[serde(skip)]
    pub before_request: Option<BeforeHook>,
    /// Observational interceptor run first after every dispatch
    #[serde(skip)]
    pub after_response: Option<AfterHook>,
    /// Resource declarations, names unique within the map
    pub resources: Vec<ResourceConfig>,
}
