//! Host cache for resolved addresses.
//!
//! Successful answers are kept for a fixed TTL, keyed by the name together
//! with every request option that shapes the answer. Failures are never
//! cached.

use super::options::{AddressFamily, Protocol, ResolveOptions, ResolvedAddr, SocketType};
use super::resolve::{Addrs, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    name: Name,
    family: AddressFamily,
    socket_type: SocketType,
    protocol: Protocol,
    port: u16,
}

impl CacheKey {
    fn new(name: &Name, options: &ResolveOptions) -> Self {
        Self {
            name: name.clone(),
            family: options.family,
            socket_type: options.socket_type,
            protocol: options.protocol,
            port: options.port,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    addrs: Vec<ResolvedAddr>,
    expires: OffsetDateTime,
}

impl CacheEntry {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires
    }
}

/// Resolver wrapper that caches successful answers for a fixed TTL.
///
/// Clones share the same cache.
///
/// # Example
///
/// ```rust,ignore
/// use hostname::dns::{CachingResolver, HickoryResolver};
/// use std::{sync::Arc, time::Duration};
///
/// let resolver = CachingResolver::new(Arc::new(HickoryResolver::new()), Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct CachingResolver {
    inner: Arc<dyn Resolve>,
    ttl: time::Duration,
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
}

impl CachingResolver {
    /// Wraps `inner`, keeping answers for `ttl`.
    pub fn new(inner: Arc<dyn Resolve>, ttl: std::time::Duration) -> Self {
        // Saturate rather than fail on absurd TTLs
        let ttl = time::Duration::try_from(ttl).unwrap_or(time::Duration::MAX);
        Self {
            inner,
            ttl,
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Number of cached answers, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached answer.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drop expired answers. Every insert also does this.
    pub fn purge_expired(&self) {
        let now = OffsetDateTime::now_utc();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }

    fn lookup(&self, key: &CacheKey) -> Option<Vec<ResolvedAddr>> {
        let now = OffsetDateTime::now_utc();
        let cached = self
            .entries
            .get(key)
            .map(|entry| (entry.is_expired(now), entry.addrs.clone()));

        match cached {
            Some((false, addrs)) => Some(addrs),
            Some((true, _)) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }
}

impl Resolve for CachingResolver {
    fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving {
        let key = CacheKey::new(&name, &options);

        if let Some(addrs) = self.lookup(&key) {
            tracing::trace!(domain = %name, count = addrs.len(), "DNS cache hit");
            let hit: Result<Addrs, NetError> = Ok(Box::new(addrs.into_iter()));
            return Box::pin(std::future::ready(hit));
        }

        tracing::trace!(domain = %name, "DNS cache miss");
        let pending = self.inner.resolve(name, options);
        let entries = self.entries.clone();
        let ttl = self.ttl;

        Box::pin(async move {
            let addrs: Vec<ResolvedAddr> = pending.await?.collect();
            let now = OffsetDateTime::now_utc();
            // Drop dead answers before the map grows
            entries.retain(|_, entry| !entry.is_expired(now));
            let expires = now.saturating_add(ttl);
            entries.insert(
                key,
                CacheEntry {
                    addrs: addrs.clone(),
                    expires,
                },
            );
            Ok::<Addrs, NetError>(Box::new(addrs.into_iter()))
        })
    }
}

impl fmt::Debug for CachingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingResolver")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingResolver {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingResolver {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Resolve for CountingResolver {
        fn resolve(&self, name: Name, options: ResolveOptions) -> Resolving {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if self.fail {
                Err(NetError::no_addresses(name.as_str(), "mock failure"))
            } else {
                options
                    .expand([IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))])
                    .map(|resolved| Box::new(resolved.into_iter()) as Addrs)
            };
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn test_cache_hit() {
        let inner = CountingResolver::new(false);
        let cache = CachingResolver::new(inner.clone(), Duration::from_secs(60));

        let first: Vec<_> = cache
            .resolve(Name::new("example.com"), ResolveOptions::new())
            .await
            .unwrap()
            .collect();
        let second: Vec<_> = cache
            .resolve(Name::new("example.com"), ResolveOptions::new())
            .await
            .unwrap()
            .collect();

        assert_eq!(first, second);
        assert_eq!(inner.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_keyed_by_options() {
        let inner = CountingResolver::new(false);
        let cache = CachingResolver::new(inner.clone(), Duration::from_secs(60));

        let _ = cache
            .resolve(Name::new("example.com"), ResolveOptions::new().port(80))
            .await
            .unwrap();
        let addrs: Vec<_> = cache
            .resolve(Name::new("example.com"), ResolveOptions::new().port(443))
            .await
            .unwrap()
            .collect();

        assert_eq!(inner.calls(), 2);
        assert!(addrs.iter().all(|a| a.addr.port() == 443));
    }

    #[tokio::test]
    async fn test_cache_expiry() {
        let inner = CountingResolver::new(false);
        let cache = CachingResolver::new(inner.clone(), Duration::ZERO);

        for _ in 0..2 {
            let _ = cache
                .resolve(Name::new("example.com"), ResolveOptions::new())
                .await
                .unwrap();
        }

        assert_eq!(inner.calls(), 2);
        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_expired_entries_do_not_accumulate() {
        let inner = CountingResolver::new(false);
        let cache = CachingResolver::new(inner.clone(), Duration::ZERO);

        for i in 0..50 {
            let _ = cache
                .resolve(Name::new(format!("host{i}.example")), ResolveOptions::new())
                .await
                .unwrap();
            assert!(cache.len() <= 1);
        }

        let _ = cache
            .resolve(Name::new("one-more.example"), ResolveOptions::new())
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(inner.calls(), 51);
    }

    #[tokio::test]
    async fn test_live_entries_survive_insert() {
        let cache = CachingResolver::new(CountingResolver::new(false), Duration::from_secs(60));
        for name in ["a.example", "b.example", "c.example"] {
            let _ = cache
                .resolve(Name::new(name), ResolveOptions::new())
                .await
                .unwrap();
        }
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn test_failures_not_cached() {
        let inner = CountingResolver::new(true);
        let cache = CachingResolver::new(inner.clone(), Duration::from_secs(60));

        for _ in 0..2 {
            let result = cache
                .resolve(Name::new("missing.example"), ResolveOptions::new())
                .await;
            assert!(matches!(result, Err(e) if e.is_not_found()));
        }

        assert_eq!(inner.calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = CachingResolver::new(CountingResolver::new(false), Duration::from_secs(60));
        let _ = cache
            .resolve(Name::new("example.com"), ResolveOptions::new())
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
