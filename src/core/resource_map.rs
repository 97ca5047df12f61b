//! The live, callable surface bound to one resource declaration.
//!
//! A `ResourceMap` seals its endpoint declarations into a name → endpoint
//! lookup table at construction. Callable handles capture the endpoint
//! *name*, not the declaration itself, and re-resolve through the table on
//! every call. The call pipeline is: merge headers, build the full path,
//! construct the request, gate on before-hooks, dispatch through the
//! transport verb method, run after-hooks, settle with the dispatch outcome.
use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::models::{EndpointConfig, Headers, HttpMethod, ResourceConfig},
    core::{
        api_map::MapShared,
        hooks::{self, AfterHook, BeforeHook, HookScope, HookVeto},
        path,
        request::{CallArgs, CallOptions, Request},
        response::Response,
    },
    ports::transport::{DispatchOutcome, Transport, TransportError},
};

/// Ways an endpoint call can fail.
///
/// After-hook failures never appear here: they are observed and logged, and
/// the dispatch outcome stands.
#[derive(Debug, Error)]
pub enum CallError {
    /// A before-request hook blocked the dispatch; the transport was never
    /// invoked
    #[error(transparent)]
    Vetoed(#[from] HookVeto),

    /// The called endpoint name is not registered with the resource
    #[error("unknown endpoint '{name}'")]
    UnknownEndpoint { name: String },

    /// The transport failed below the HTTP layer
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub(crate) struct ResourceInner {
    name: String,
    host: String,
    headers: Headers,
    before_request: Option<BeforeHook>,
    after_response: Option<AfterHook>,
    endpoints: HashMap<String, Arc<EndpointConfig>>,
    shared: Arc<MapShared>,
}

/// A named group of endpoints bound to shared map-level defaults.
///
/// Cheap to clone (Arc inside); a clone held by a caller stays callable even
/// after the map drops the named lookup via
/// [`remove_resource_map`](crate::core::ApiMap::remove_resource_map).
#[derive(Clone)]
pub struct ResourceMap {
    inner: Arc<ResourceInner>,
}

impl ResourceMap {
    pub(crate) fn new(shared: Arc<MapShared>, resource: ResourceConfig) -> Self {
        let endpoints = resource
            .endpoints
            .into_iter()
            .map(|endpoint| (endpoint.name.clone(), Arc::new(endpoint)))
            .collect();

        Self {
            inner: Arc::new(ResourceInner {
                name: resource.name,
                host: resource.host,
                headers: resource.headers,
                before_request: resource.before_request,
                after_response: resource.after_response,
                endpoints,
                shared,
            }),
        }
    }

    /// The resource's unique name within its map.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Host segment appended after the map-level host.
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    /// Names of every registered endpoint.
    pub fn endpoint_names(&self) -> impl Iterator<Item = &str> {
        self.inner.endpoints.keys().map(String::as_str)
    }

    /// Fetch the callable handle for a registered endpoint.
    pub fn endpoint(&self, name: &str) -> Option<EndpointMethod> {
        self.inner.endpoints.contains_key(name).then(|| EndpointMethod {
            inner: Arc::clone(&self.inner),
            endpoint: name.to_string(),
        })
    }

    /// Look up an endpoint by name and invoke it in one step.
    pub async fn call(&self, endpoint: &str, args: CallArgs) -> Result<Response, CallError> {
        invoke(&self.inner, endpoint, args).await
    }
}

/// Callable handle to a single endpoint.
///
/// Holds the endpoint *name* and resolves it through the owning resource's
/// lookup table on every call. Cloneable and independent: concurrent calls
/// build their own request/response pairs and never share state.
#[derive(Clone)]
pub struct EndpointMethod {
    inner: Arc<ResourceInner>,
    endpoint: String,
}

impl EndpointMethod {
    /// The endpoint name this handle resolves.
    pub fn name(&self) -> &str {
        &self.endpoint
    }

    /// Run the full request lifecycle for this endpoint.
    pub async fn call(&self, args: CallArgs) -> Result<Response, CallError> {
        invoke(&self.inner, &self.endpoint, args).await
    }
}

async fn invoke(
    inner: &Arc<ResourceInner>,
    endpoint_name: &str,
    args: CallArgs,
) -> Result<Response, CallError> {
    let endpoint = inner
        .endpoints
        .get(endpoint_name)
        .cloned()
        .ok_or_else(|| CallError::UnknownEndpoint {
            name: endpoint_name.to_string(),
        })?;

    let CallArgs {
        params,
        body,
        headers: call_headers,
        options,
    } = args;

    // Merge order: map, resource, endpoint, call site. Later layers win per key.
    let mut headers = inner.shared.headers.clone();
    headers.extend(inner.headers.clone());
    headers.extend(endpoint.headers.clone());
    if let Some(call_headers) = call_headers {
        headers.extend(call_headers);
    }

    let full_path = path::build_full_path(
        &inner.shared.host,
        &inner.host,
        &endpoint.path,
        params.as_ref(),
    );

    let request = Request::build(full_path, Arc::clone(&endpoint), headers, body, params);

    let span = tracing::debug_span!(
        "endpoint_call",
        resource = %inner.name,
        endpoint = %endpoint_name,
        http.method = %endpoint.method,
        request.id = %Uuid::new_v4(),
        http.status_code = tracing::field::Empty,
    );

    async {
        hooks::run_before_chain(
            [
                (HookScope::Global, inner.shared.before_request.as_ref()),
                (HookScope::Resource, inner.before_request.as_ref()),
                (HookScope::Endpoint, endpoint.before_request.as_ref()),
            ],
            &request,
        )
        .await?;

        let outcome = dispatch(inner.shared.transport.as_ref(), &request, options.as_ref()).await;

        if let Ok(response) = &outcome
            && let Some(status) = response.extras.status
        {
            tracing::Span::current().record("http.status_code", status.as_u16());
        }

        // After-hooks observe both branches and never change which one settles.
        hooks::run_after_chain(
            [
                (HookScope::Global, inner.shared.after_response.as_ref()),
                (HookScope::Resource, inner.after_response.as_ref()),
                (HookScope::Endpoint, endpoint.after_response.as_ref()),
            ],
            &request,
            &outcome,
        )
        .await;

        outcome.map_err(CallError::from)
    }
    .instrument(span)
    .await
}

/// Route the request to the transport method matching the endpoint's verb.
async fn dispatch(
    transport: &dyn Transport,
    request: &Request,
    options: Option<&CallOptions>,
) -> DispatchOutcome {
    match request.endpoint.method {
        HttpMethod::Get => transport.get(request, options).await,
        HttpMethod::Put => transport.put(request, options).await,
        HttpMethod::Post => transport.post(request, options).await,
        HttpMethod::Head => transport.head(request, options).await,
        HttpMethod::Delete => transport.delete(request, options).await,
        HttpMethod::Patch => transport.patch(request, options).await,
    }
}
