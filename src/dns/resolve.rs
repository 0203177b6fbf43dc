//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the DNS abstraction layer.

use super::options::{ResolveOptions, ResolvedAddr};
use crate::base::neterror::NetError;
use crate::name::Hostname;
use std::{collections::HashMap, fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc};

/// The canonical text of a hostname, as handed to a resolver.
///
/// Built from a [`Hostname`] via [`Hostname::to_name`], so it is always in
/// lowercase dotted form without a trailing dot.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<Hostname> for Name {
    fn from(value: Hostname) -> Self {
        value.to_name()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for an `Iterator` trait object over resolved addresses.
pub type Addrs = Box<dyn Iterator<Item = ResolvedAddr> + Send>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// Equivalent to Chromium's `HostResolver`. Implementations must be
/// thread-safe.
///
/// # Design Notes
///
/// - Resolution is assumed to always be ready (no backpressure).
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    /// Resolves a name to addresses matching `options`.
    ///
    /// Returned addresses carry `options.port`. An empty answer is an error,
    /// never an empty iterator.
    fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving {
        (**self).resolve(name, options)
    }
}

/// Runs `lookup`, bounded by `timeout` when one is set.
pub(crate) async fn with_timeout<T, F>(
    timeout: Option<std::time::Duration>,
    domain: &str,
    lookup: F,
) -> Result<T, NetError>
where
    F: Future<Output = Result<T, NetError>>,
{
    let Some(limit) = timeout else {
        return lookup.await;
    };
    match tokio::time::timeout(limit, lookup).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(domain = %domain, timeout = ?limit, "DNS resolution timed out");
            Err(NetError::DnsTimedOut)
        }
    }
}

/// DNS resolver wrapper that supports hostname overrides.
///
/// This resolver first checks a map of hostname-to-address overrides before
/// falling back to the underlying resolver. Useful for:
/// - Testing without real DNS
/// - Forcing specific IPs for certain domains
/// - Local development with custom hostnames
///
/// Overridden answers still honour the family, socket type, protocol and
/// port of the request.
///
/// # Example
///
/// ```rust,ignore
/// use hostname::dns::{DnsResolverWithOverrides, HickoryResolver};
/// use hostname::Hostname;
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert(
///     Hostname::parse("api.local")?,
///     vec!["127.0.0.1".parse().unwrap()],
/// );
///
/// let resolver = DnsResolverWithOverrides::new(
///     Arc::new(HickoryResolver::new()),
///     overrides,
/// );
/// ```
pub struct DnsResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<Hostname, Vec<IpAddr>>>,
}

impl DnsResolverWithOverrides {
    /// Creates a new resolver with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fallback resolver for non-overridden hostnames.
    /// * `overrides` - Map of hostnames to their addresses.
    pub fn new(inner: Arc<dyn Resolve>, overrides: HashMap<Hostname, Vec<IpAddr>>) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Resolve for DnsResolverWithOverrides {
    fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving {
        let hit = Hostname::try_parse(name.as_str()).and_then(|host| self.overrides.get(&host));

        if let Some(ips) = hit {
            tracing::trace!(domain = %name, "answering from DNS override");
            let result = options.expand(ips.iter().copied()).and_then(|resolved| {
                if resolved.is_empty() {
                    Err(NetError::no_addresses(
                        name.as_str(),
                        "No override address matches the requested family",
                    ))
                } else {
                    Ok(Box::new(resolved.into_iter()) as Addrs)
                }
            });
            return Box::pin(std::future::ready(result));
        }

        self.inner.resolve(name, options)
    }
}

impl fmt::Debug for DnsResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::options::{AddressFamily, Protocol, SocketType};
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
    use std::time::Duration;

    #[test]
    fn test_name_from_hostname() {
        let host = Hostname::parse("Example.COM.").unwrap();
        let name = Name::from(host);
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn test_name_equality() {
        let name1 = Name::new("example.com");
        let name2 = Name::new("example.com");
        let name3 = Name::new("other.com");

        assert_eq!(name1, name2);
        assert_ne!(name1, name3);
    }

    #[test]
    fn test_name_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Name::new("example.com"));
        set.insert(Name::new("example.com")); // Duplicate

        assert_eq!(set.len(), 1);
    }

    struct MockResolver {
        response: Vec<IpAddr>,
    }

    impl Resolve for MockResolver {
        fn resolve(&self, _name: Name, options: ResolveOptions) -> Resolving {
            let result = options
                .expand(self.response.clone())
                .map(|resolved| Box::new(resolved.into_iter()) as Addrs);
            Box::pin(async move { result })
        }
    }

    fn mock(ip: IpAddr) -> Arc<dyn Resolve> {
        Arc::new(MockResolver { response: vec![ip] })
    }

    fn overrides(host: &str, ips: Vec<IpAddr>) -> HashMap<Hostname, Vec<IpAddr>> {
        let mut map = HashMap::new();
        map.insert(Hostname::parse(host).unwrap(), ips);
        map
    }

    #[tokio::test]
    async fn test_override_resolver_hit() {
        let resolver = DnsResolverWithOverrides::new(
            mock(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))),
            overrides(
                "override.local",
                vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))],
            ),
        );
        let options = ResolveOptions::new()
            .socket_type(SocketType::Stream)
            .port(8080);

        let addrs: Vec<_> = resolver
            .resolve(Name::new("override.local"), options)
            .await
            .unwrap()
            .collect();

        assert_eq!(addrs.len(), 1);
        assert_eq!(
            addrs[0].addr,
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080)
        );
        assert_eq!(addrs[0].protocol, Protocol::Tcp);
    }

    #[tokio::test]
    async fn test_override_resolver_miss() {
        let resolver = DnsResolverWithOverrides::new(
            mock(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))),
            overrides("override.local", vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]),
        );

        let addrs: Vec<_> = resolver
            .resolve(Name::new("not-overridden.com"), ResolveOptions::new())
            .await
            .unwrap()
            .collect();

        // One address, reported for both TCP and UDP
        assert_eq!(addrs.len(), 2);
        assert!(addrs
            .iter()
            .all(|a| a.addr.ip() == IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))));
    }

    #[tokio::test]
    async fn test_override_family_mismatch() {
        let resolver = DnsResolverWithOverrides::new(
            mock(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))),
            overrides("v6only.local", vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]),
        );

        let result = resolver
            .resolve(
                Name::new("v6only.local"),
                ResolveOptions::new().family(AddressFamily::Ipv4),
            )
            .await;

        assert!(matches!(result, Err(e) if e.is_not_found()));
    }

    #[test]
    fn test_override_count() {
        let resolver = DnsResolverWithOverrides::new(
            mock(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            overrides("a.local", vec![]),
        );
        assert_eq!(resolver.override_count(), 1);
        assert!(format!("{resolver:?}").contains("override_count: 1"));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result: Result<(), NetError> = with_timeout(
            Some(Duration::from_millis(10)),
            "slow.example.com",
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;
        assert!(matches!(result, Err(NetError::DnsTimedOut)));
    }

    #[tokio::test]
    async fn test_with_timeout_unbounded() {
        let result = with_timeout(None, "example.com", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
