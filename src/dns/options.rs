//! Socket parameters for a resolution request.

use crate::base::neterror::NetError;
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

/// Address family filter (`AF_UNSPEC`, `AF_INET`, `AF_INET6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    #[default]
    Unspecified,
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn matches(self, ip: &IpAddr) -> bool {
        match self {
            AddressFamily::Unspecified => true,
            AddressFamily::Ipv4 => ip.is_ipv4(),
            AddressFamily::Ipv6 => ip.is_ipv6(),
        }
    }
}

/// Socket type hint (`SOCK_STREAM`, `SOCK_DGRAM`, or any).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketType {
    #[default]
    Any,
    Stream,
    Datagram,
}

/// Transport protocol hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Any,
    Tcp,
    Udp,
}

/// Socket type / protocol pairs a resolver can answer with.
const SOCKET_KINDS: [(SocketType, Protocol); 2] = [
    (SocketType::Stream, Protocol::Tcp),
    (SocketType::Datagram, Protocol::Udp),
];

/// One resolved address together with the socket parameters it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedAddr {
    pub addr: SocketAddr,
    pub socket_type: SocketType,
    pub protocol: Protocol,
}

/// Per-request resolution options.
///
/// Mirrors the `getaddrinfo` hints: the family filters addresses, while the
/// socket type and protocol select which `(type, protocol)` entries are
/// produced for each address. With both left as `Any`, every address is
/// reported once for TCP streams and once for UDP datagrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Address family filter
    pub family: AddressFamily,
    /// Socket type hint
    pub socket_type: SocketType,
    /// Protocol hint
    pub protocol: Protocol,
    /// Port stamped on every returned address
    pub port: u16,
    /// Upper bound on the whole lookup (None = wait for the resolver)
    pub timeout: Option<Duration>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            family: AddressFamily::Unspecified,
            socket_type: SocketType::Any,
            protocol: Protocol::Any,
            port: 0,
            timeout: None,
        }
    }
}

impl ResolveOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set address family.
    pub fn family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    /// Set socket type.
    pub fn socket_type(mut self, socket_type: SocketType) -> Self {
        self.socket_type = socket_type;
        self
    }

    /// Set protocol.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set lookup timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The `(socket type, protocol)` pairs selected by these options.
    ///
    /// Fails with [`NetError::InvalidArgument`] for contradictory hints such
    /// as a stream socket over UDP.
    pub fn socket_kinds(&self) -> Result<Vec<(SocketType, Protocol)>, NetError> {
        let kinds: Vec<_> = SOCKET_KINDS
            .into_iter()
            .filter(|(ty, proto)| {
                (self.socket_type == SocketType::Any || self.socket_type == *ty)
                    && (self.protocol == Protocol::Any || self.protocol == *proto)
            })
            .collect();

        if kinds.is_empty() {
            tracing::debug!(
                socket_type = ?self.socket_type,
                protocol = ?self.protocol,
                "incompatible socket type and protocol"
            );
            return Err(NetError::InvalidArgument);
        }
        Ok(kinds)
    }

    /// Turns raw lookup results into resolved addresses: filters by family,
    /// drops duplicate IPs, applies the port and fans out over socket kinds.
    pub fn expand<I>(&self, ips: I) -> Result<Vec<ResolvedAddr>, NetError>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let kinds = self.socket_kinds()?;
        let mut seen: Vec<IpAddr> = Vec::new();
        let mut resolved = Vec::new();

        for ip in ips {
            if !self.family.matches(&ip) || seen.contains(&ip) {
                continue;
            }
            seen.push(ip);
            for (socket_type, protocol) in &kinds {
                resolved.push(ResolvedAddr {
                    addr: SocketAddr::new(ip, self.port),
                    socket_type: *socket_type,
                    protocol: *protocol,
                });
            }
        }
        Ok(resolved)
    }
}
