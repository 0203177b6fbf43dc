//! DNS Resolution Module
//!
//! Provides pluggable resolution for [`Hostname`](crate::name::Hostname)s:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver
//! - Hostname-to-IP override mechanism
//! - TTL host cache
//!
//! # Architecture
//!
//! This module mirrors Chromium's `HostResolver` concept. The `Resolve`
//! trait is the core abstraction; [`ResolverConfig`] stacks the wrappers on
//! top of a backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostname::dns::{ResolveOptions, ResolverConfig};
//! use hostname::Hostname;
//!
//! let resolver = ResolverConfig::new().build();
//! let host = Hostname::parse("example.com")?;
//! for addr in host.resolve_with(&resolver, ResolveOptions::new().port(443)).await? {
//!     println!("Resolved: {}", addr.addr);
//! }
//! ```

mod cache;
mod config;
mod gai;
mod hickory;
mod options;
mod resolve;

pub use cache::CachingResolver;
pub use config::{Backend, ResolverConfig};
pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use options::{AddressFamily, Protocol, ResolveOptions, ResolvedAddr, SocketType};
pub use resolve::{Addrs, DnsResolverWithOverrides, Name, Resolve, Resolving};
