//! Root container for an API description.
//!
//! The `ApiMap` aggregates the global defaults (host, headers, hooks), the
//! injected transport, and one [`ResourceMap`] per configured resource. The
//! transport is always a constructor argument; there is no ambient default.
//! Configuration is validated up front and sealed afterwards: resource maps
//! share it read-only, and the only mutation points are the explicit
//! add/remove recomposition methods below.
use std::{collections::HashMap, sync::Arc};

use crate::{
    config::{
        models::{ApiConfig, Headers, ResourceConfig},
        validation::{ApiConfigValidator, ValidationError},
    },
    core::{
        hooks::{AfterHook, BeforeHook},
        resource_map::ResourceMap,
    },
    ports::transport::Transport,
};

/// Map-level state shared read-only by every resource map.
pub(crate) struct MapShared {
    pub(crate) host: String,
    pub(crate) headers: Headers,
    pub(crate) before_request: Option<BeforeHook>,
    pub(crate) after_response: Option<AfterHook>,
    pub(crate) transport: Arc<dyn Transport>,
}

/// The root of a generated API client.
///
/// Construct with [`ApiMap::new`] by passing an [`ApiConfig`] and the
/// transport to dispatch through. Each configured resource is exposed via
/// [`ApiMap::resource`], and each endpoint through
/// [`ResourceMap::endpoint`](crate::core::ResourceMap::endpoint).
pub struct ApiMap {
    shared: Arc<MapShared>,
    resources: HashMap<String, ResourceMap>,
}

impl std::fmt::Debug for ApiMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMap")
            .field("host", &self.shared.host)
            .field("resources", &self.resources.len())
            .finish()
    }
}

impl ApiMap {
    /// Validate the configuration and build one resource map per declared
    /// resource.
    ///
    /// Duplicate resource or endpoint names are configuration errors; see
    /// [`ApiConfigValidator`].
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>) -> Result<Self, ValidationError> {
        ApiConfigValidator::validate(&config)?;

        let ApiConfig {
            host,
            headers,
            before_request,
            after_response,
            resources,
        } = config;

        let shared = Arc::new(MapShared {
            host,
            headers,
            before_request,
            after_response,
            transport,
        });

        let mut map = Self {
            shared,
            resources: HashMap::new(),
        };
        let built = map.build_resource_maps(resources);
        map.add_resource_maps(built);

        tracing::debug!(
            host = %map.shared.host,
            resources = map.resources.len(),
            "api map constructed"
        );
        Ok(map)
    }

    /// Base host every full path starts with.
    pub fn host(&self) -> &str {
        &self.shared.host
    }

    /// Global header defaults.
    pub fn headers(&self) -> &Headers {
        &self.shared.headers
    }

    /// Fetch a resource map by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceMap> {
        self.resources.get(name)
    }

    /// Names of every attached resource map.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Build a resource map bound to this map's defaults without attaching it.
    pub fn build_resource_map(&self, resource: ResourceConfig) -> ResourceMap {
        ResourceMap::new(Arc::clone(&self.shared), resource)
    }

    /// Build one resource map per declaration without attaching them.
    pub fn build_resource_maps(&self, resources: Vec<ResourceConfig>) -> Vec<ResourceMap> {
        resources
            .into_iter()
            .map(|resource| self.build_resource_map(resource))
            .collect()
    }

    /// Attach a resource map under its name. An existing entry of the same
    /// name is replaced (last one attached wins).
    pub fn add_resource_map(&mut self, map: ResourceMap) {
        tracing::debug!(resource = %map.name(), "attaching resource map");
        self.resources.insert(map.name().to_string(), map);
    }

    /// Attach several resource maps; see [`ApiMap::add_resource_map`].
    pub fn add_resource_maps(&mut self, maps: impl IntoIterator<Item = ResourceMap>) {
        for map in maps {
            self.add_resource_map(map);
        }
    }

    /// Drop the named lookup for a resource map, returning it if present.
    /// Clones held elsewhere stay callable; only the name disappears.
    pub fn remove_resource_map(&mut self, name: &str) -> Option<ResourceMap> {
        tracing::debug!(resource = %name, "removing resource map");
        self.resources.remove(name)
    }

    /// Drop several named lookups; see [`ApiMap::remove_resource_map`].
    pub fn remove_resource_maps<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.remove_resource_map(name);
        }
    }
}
