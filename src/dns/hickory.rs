//! Async DNS resolver using hickory-dns.
//!
//! This resolver provides fully async DNS resolution with support for:
//! - DNS-over-HTTPS (DoH)
//! - DNS-over-TLS (DoT)
//! - System DNS configuration auto-detection
//! - IPv4 + IPv6 lookup
//!
//! # Performance
//!
//! Unlike `GaiResolver`, this resolver is fully async and doesn't require
//! spawning blocking tasks. It maintains connection pools to DNS servers
//! for better performance under load.

use super::options::ResolveOptions;
use super::resolve::{with_timeout, Addrs, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    ResolveError, TokioResolver,
};
use std::sync::{Arc, LazyLock};

/// Async DNS resolver backed by hickory-dns.
///
/// This resolver is lazily initialized on first use and shared across
/// all instances via a static `LazyLock`. It automatically configures
/// itself based on the system's DNS settings.
///
/// The shared resolver always asks for both A and AAAA records; the
/// request's address family is applied to the answer.
///
/// # Example
///
/// ```rust,ignore
/// use hostname::dns::{HickoryResolver, Resolve, ResolveOptions};
/// use hostname::Hostname;
///
/// let resolver = HickoryResolver::new();
/// let host = Hostname::parse("example.com")?;
/// let addrs = host.resolve_with(&resolver, ResolveOptions::new().port(443)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: &'static LazyLock<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver`.
    ///
    /// The underlying resolver is lazily initialized on first DNS query.
    /// It will attempt to read system DNS configuration; if that fails,
    /// it falls back to sensible defaults.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
            let mut builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

            builder.build()
        });

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            options.socket_kinds()?;

            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let lookup = with_timeout(options.timeout, domain, async {
                resolver
                    .resolver
                    .lookup_ip(domain)
                    .await
                    .map_err(|e| lookup_error(domain, e))
            })
            .await?;

            let resolved = options.expand(lookup.iter())?;
            if resolved.is_empty() {
                return Err(NetError::no_addresses(domain, "No addresses returned"));
            }

            tracing::debug!(domain = %domain, count = resolved.len(), "hickory-dns resolution complete");
            Ok::<Addrs, NetError>(Box::new(resolved.into_iter()))
        })
    }
}

/// Maps a hickory failure: an empty answer or NXDOMAIN means the name has no
/// addresses, anything else means the resolver itself failed.
fn lookup_error(domain: &str, e: ResolveError) -> NetError {
    if e.is_no_records_found() {
        tracing::debug!(domain = %domain, error = %e, "hickory-dns found no records");
        return NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                e.to_string(),
            )),
        };
    }
    tracing::warn!(domain = %domain, error = %e, "hickory-dns lookup failed");
    NetError::NameResolutionFailed
}
