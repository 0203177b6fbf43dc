//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): resolution error codes matching `net_error_list.h`
//! - [`IoResultExt`](context::IoResultExt): context for IO errors from the system resolver

pub mod context;
pub mod neterror;
