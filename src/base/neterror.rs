use std::{io, sync::Arc};
use thiserror::Error;

/// Resolution failures, numbered after Chromium's `net_error_list.h`.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    #[error("Invalid argument")]
    InvalidArgument,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved: {domain}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Name resolution failed")]
    NameResolutionFailed,
    #[error("DNS timed out")]
    DnsTimedOut,
    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::InvalidArgument => -4,
            NetError::NameNotResolved => -105,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::NameResolutionFailed => -137,
            NetError::DnsTimedOut => -803,
            NetError::Unknown(code) => *code,
        }
    }

    /// Create a `NameNotResolvedFor` error from an IO error.
    pub fn dns_failed(domain: impl Into<String>, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.into(),
            source: Arc::new(source),
        }
    }

    /// Create a `NameNotResolvedFor` error for a lookup that succeeded but
    /// produced no usable address.
    pub fn no_addresses(domain: impl Into<String>, detail: &str) -> Self {
        NetError::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, detail.to_string()))
    }

    /// True for failures that mean the name has no answer, as opposed to the
    /// resolver itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. }
        )
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -4 => NetError::InvalidArgument,
            -105 => NetError::NameNotResolved,
            -137 => NetError::NameResolutionFailed,
            -803 => NetError::DnsTimedOut,
            _ => NetError::Unknown(code),
        }
    }
}
