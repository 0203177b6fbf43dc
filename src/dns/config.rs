//! Resolver configuration.
//!
//! Builds the resolver stack used by [`Hostname::resolve_with`]: an optional
//! cache on top of optional overrides on top of a backend.
//!
//! [`Hostname::resolve_with`]: crate::name::Hostname::resolve_with

use super::cache::CachingResolver;
use super::gai::GaiResolver;
use super::hickory::HickoryResolver;
use super::resolve::{DnsResolverWithOverrides, Resolve};
use crate::name::Hostname;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// Which built-in resolver answers lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `getaddrinfo` on the blocking pool.
    System,
    /// hickory-dns with the system configuration.
    #[default]
    Hickory,
}

/// Configuration for the resolver stack.
#[derive(Clone, Default)]
pub struct ResolverConfig {
    /// Built-in backend, used when no custom resolver is set.
    pub backend: Backend,

    /// Custom resolver (None = use `backend`).
    pub resolver: Option<Arc<dyn Resolve>>,

    /// Hostname overrides (hostname -> addresses).
    pub overrides: HashMap<Hostname, Vec<IpAddr>>,

    /// Cache TTL for successful answers (None = no cache).
    pub cache_ttl: Option<Duration>,
}

impl ResolverConfig {
    /// Create config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the built-in backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Use a custom resolver instead of the built-in backend.
    pub fn resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Pin `host` to `addrs`.
    pub fn with_override(mut self, host: Hostname, addrs: Vec<IpAddr>) -> Self {
        self.overrides.insert(host, addrs);
        self
    }

    /// Enable the host cache.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Build the resolver stack.
    pub fn build(&self) -> Arc<dyn Resolve> {
        let base: Arc<dyn Resolve> = match (&self.resolver, self.backend) {
            (Some(custom), _) => custom.clone(),
            (None, Backend::System) => Arc::new(GaiResolver::new()),
            (None, Backend::Hickory) => Arc::new(HickoryResolver::new()),
        };

        let resolver: Arc<dyn Resolve> = if self.overrides.is_empty() {
            base
        } else {
            Arc::new(DnsResolverWithOverrides::new(base, self.overrides.clone()))
        };

        let resolver: Arc<dyn Resolve> = match self.cache_ttl {
            Some(ttl) => Arc::new(CachingResolver::new(resolver, ttl)),
            None => resolver,
        };

        tracing::debug!(
            backend = ?self.backend,
            custom = self.resolver.is_some(),
            overrides = self.overrides.len(),
            cache_ttl = ?self.cache_ttl,
            "built resolver stack"
        );
        resolver
    }
}

impl std::fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("backend", &self.backend)
            .field("resolver", &self.resolver.is_some())
            .field("overrides_count", &self.overrides.len())
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
