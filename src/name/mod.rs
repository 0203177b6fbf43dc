//! Hostname parsing, validation and hierarchy.
//!
//! - [`label`]: character rules, [`Label`] and the label-sequence validator
//! - [`parser`]: single-pass text scanner
//! - [`Hostname`]: the immutable value type built on both
//! - [`error`]: [`HostnameError`] and its structural reasons

pub mod error;
mod hostname;
pub mod label;
pub mod parser;
mod psl;

pub use error::{HostnameError, LabelFault, MalformedReason};
pub use hostname::Hostname;
pub use label::{Label, MAX_LABELS, MAX_LABEL_LEN, MAX_NAME_LEN};
