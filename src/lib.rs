//! # hostname
//!
//! A validated, immutable DNS hostname type for Rust.
//!
//! `hostname` parses and validates host names in a single pass, then offers
//! the structural queries a network stack needs: label access, TLD checks,
//! subdomain tests, hierarchy navigation and an ordering that follows the
//! domain tree from the top-level domain inward.
//!
//! ## Features
//!
//! - **Strict syntax**: letters, digits, `-` and `_`; labels of 1-63
//!   characters; at most 127 labels and 253 characters overall
//! - **Case folding**: `WWW.Example.COM.` and `www.example.com` are equal
//! - **Hierarchy**: `parent`, `nth_parent` and `child` keep every limit
//! - **Public Suffix List**: public suffix and registrable domain lookups
//! - **Resolution**: pluggable resolvers (getaddrinfo, hickory-dns) with
//!   overrides and a TTL cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostname::dns::{ResolveOptions, ResolverConfig};
//! use hostname::Hostname;
//!
//! #[tokio::main]
//! async fn main() {
//!     let host = Hostname::parse("www.example.com").unwrap();
//!     assert!(host.is_subdomain_of(&host.parent().unwrap()));
//!
//!     let resolver = ResolverConfig::new().build();
//!     for addr in host
//!         .resolve_with(&resolver, ResolveOptions::new().port(443))
//!         .await
//!         .unwrap()
//!     {
//!         println!("{}", addr.addr);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`name`] - Label rules, the parser and the [`Hostname`] type
//! - [`dns`] - Resolver trait, backends, overrides and caching
//! - [`base`] - Error codes shared by resolvers

pub mod base;
pub mod dns;
pub mod name;

pub use name::{Hostname, HostnameError, Label, LabelFault, MalformedReason};
