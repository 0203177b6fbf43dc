//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`, executed in a thread pool to avoid blocking the async runtime.
//!
//! # When to Use
//!
//! - When you need to respect system DNS configuration (/etc/resolv.conf,
//!   /etc/hosts, nsswitch)
//! - When DoH/DoT is not required
//! - As a fallback when hickory-dns is not available

use super::options::ResolveOptions;
use super::resolve::{with_timeout, Addrs, Name, Resolve, Resolving};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::net::ToSocketAddrs;
use tokio::task::JoinError;

/// System DNS resolver using `getaddrinfo` in a thread pool.
///
/// This resolver wraps the standard library's `ToSocketAddrs` trait and
/// executes resolution in `tokio::task::spawn_blocking` to avoid blocking
/// the async runtime.
///
/// # Performance
///
/// Each resolution spawns a blocking task. For high-throughput scenarios,
/// consider using `HickoryResolver` which is fully async.
///
/// When a timeout fires the blocking lookup is abandoned, not cancelled; it
/// finishes on its pool thread and the answer is dropped.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving {
        Box::pin(async move {
            // Reject contradictory hints before touching the system resolver
            options.socket_kinds()?;

            let host = name.as_str().to_string();
            let domain = host.clone();
            let port = options.port;

            let lookup = async move {
                tokio::task::spawn_blocking(move || {
                    tracing::debug!(host = %host, "resolving via getaddrinfo");
                    (host.as_str(), port)
                        .to_socket_addrs()
                        .map(|iter| iter.collect::<Vec<_>>())
                })
                .await
                .map_err(join_failed)
            };

            let addrs = with_timeout(options.timeout, &domain, lookup)
                .await?
                .map_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                    e
                })
                .dns_context(&domain)?;

            let resolved = options.expand(addrs.into_iter().map(|addr| addr.ip()))?;
            if resolved.is_empty() {
                return Err(NetError::no_addresses(
                    domain,
                    "No addresses returned by getaddrinfo",
                ));
            }

            tracing::debug!(domain = %domain, count = resolved.len(), "DNS resolution complete");
            Ok::<Addrs, NetError>(Box::new(resolved.into_iter()))
        })
    }
}

/// A join error (cancellation, panic) means the lookup never ran to
/// completion, not that the name is missing.
fn join_failed(e: JoinError) -> NetError {
    tracing::error!(error = %e, "DNS resolution task failed");
    NetError::NameResolutionFailed
}
