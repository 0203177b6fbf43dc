//! Ergonomic error context helpers.
//!
//! Provides an extension trait for adding context to `Result` types,
//! converting IO errors from the system resolver into `NetError` variants.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add DNS resolution context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use hostname::base::context::IoResultExt;
    ///
    /// let addrs = ("example.com", 0).to_socket_addrs()
    ///     .dns_context("example.com")?;
    /// // Error: "Name not resolved: example.com"
    /// ```
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| NetError::dns_failed(domain, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_dns_context() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "no such host"));
        let err = result.dns_context("unknown.example.com").unwrap_err();

        match &err {
            NetError::NameNotResolvedFor { domain, .. } => {
                assert_eq!(domain, "unknown.example.com");
            }
            _ => panic!("Expected NameNotResolvedFor"),
        }
        assert_eq!(err.to_string(), "Name not resolved: unknown.example.com");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_dns_context_passes_ok() {
        let result: Result<u16, io::Error> = Ok(53);
        assert_eq!(result.dns_context("example.com").unwrap(), 53);
    }
}
