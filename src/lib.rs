//! apimap - a declarative HTTP API-client generator.
//!
//! apimap turns a static description of hosts, resources, and endpoints into
//! callable endpoint methods. Each call merges configuration layers, resolves
//! its path template, runs a chain of lifecycle hooks, and dispatches through
//! a pluggable transport. The crate follows a **hexagonal architecture**:
//! business logic lives in `core`, the transport **port** (trait) in `ports`,
//! and the provided reqwest implementation in `adapters`.
//!
//! # Features
//! - Declarative configuration (programmatic, or YAML / JSON / TOML files)
//! - Header defaults merged across map, resource, endpoint, and call scopes
//! - `{key}` path templates with leftover parameters as an encoded query string
//! - Before-request hooks that gate dispatch, after-response hooks that observe it
//! - A six-verb transport trait as the seam for custom clients and test stubs
//! - Construction-time validation with aggregated errors
//! - Structured tracing via `tracing`
//!
//! # Quick Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use apimap::{ApiMap, CallArgs, ReqwestTransport, RequestParams, config::ApiConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // Load a declarative description (see config::load_config for files)
//! let cfg: ApiConfig = serde_json::from_str(
//!     r#"{
//!         "host": "https://api.example.com",
//!         "resources": [{
//!             "name": "users", "host": "/v1",
//!             "endpoints": [{"name": "get", "path": "/users/{id}"}]
//!         }]
//!     }"#,
//! )?;
//!
//! let api = ApiMap::new(cfg, Arc::new(ReqwestTransport::new()?))?;
//! let users = api.resource("users").expect("configured above");
//! let response = users
//!     .call("get", CallArgs::new().params(RequestParams::new().set("id", 42)))
//!     .await?;
//! assert!(response.ok);
//! # Ok(()) }
//! ```
//!
//! # Architecture
//! The crate separates **ports** (traits) from **adapters** (implementations)
//! while keeping business logic inside `core`. End users should prefer the
//! re‑exports documented below instead of reaching into internal modules
//! directly.
//!
//! # Error Handling
//! All fallible APIs return a domain specific error type (`CallError`,
//! `TransportError`, `ValidationError`); the config loader returns
//! `eyre::Result` with context attached. Before-request hooks are the only
//! user-triggerable fail-fast path; after-response hooks are observational
//! and can never change a call's outcome.
//!
//! # Concurrency
//! Configuration is sealed after construction and shared read-only. Every
//! call builds its own request/response pair; concurrent calls interleave
//! freely with no shared mutable state, no locks, and no cancellation beyond
//! what the transport itself provides.
//!
//! # License
//! Licensed under Apache-2.0.
pub mod adapters;
pub mod config;
pub mod core;
pub mod ports;

// Re-export the types most consumers need
pub use crate::{
    adapters::ReqwestTransport,
    config::models::{ApiConfig, EndpointConfig, Headers, HttpMethod, ResourceConfig},
    core::{
        api_map::ApiMap,
        hooks::{
            AfterHook, BeforeHook, HookError, HookResult, HookScope, HookVeto, RequestHook,
            ResponseHook,
        },
        request::{CallArgs, CallOptions, Request, RequestParams},
        resource_map::{CallError, EndpointMethod, ResourceMap},
        response::{Response, ResponseExtras},
    },
    ports::transport::{DispatchOutcome, Transport, TransportError, TransportResult},
};
