//! Hostname construction and derivation errors.

use thiserror::Error;

/// Why a single label was rejected.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum LabelFault {
    #[error("label is empty")]
    Empty,
    #[error("label exceeds 63 characters")]
    TooLong,
    #[error("label must start and end with an alphanumeric character")]
    BadBoundary,
    #[error("label contains invalid character {0:?}")]
    BadCharacter(char),
}

/// Structural reason a hostname was rejected.
///
/// Indices in parser variants are byte offsets into the input text; indices
/// in [`MalformedReason::InvalidLabel`] are positions in the label sequence.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MalformedReason {
    #[error("no labels")]
    EmptySequence,
    #[error("{count} labels exceeds the limit of 127")]
    TooManyLabels { count: usize },
    #[error("encoded length {len} is outside 1..=253")]
    TotalLengthOutOfRange { len: usize },
    #[error("label {index}: {fault}")]
    InvalidLabel { index: usize, fault: LabelFault },
    #[error("invalid character {ch:?} at offset {index}")]
    InvalidCharacter { ch: char, index: usize },
    #[error("empty label at offset {index}")]
    EmptyLabel { index: usize },
    #[error("label starting at offset {index} exceeds 63 characters")]
    LabelTooLong { index: usize },
    #[error("label starting at offset {index} must start and end with an alphanumeric character")]
    BadLabelBoundary { index: usize },
    #[error("URL host is not a domain name")]
    NotADomain,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HostnameError {
    #[error("malformed hostname {input:?}: {reason}")]
    Malformed {
        input: String,
        reason: MalformedReason,
    },
    #[error("{hostname} is a top-level domain and has no parent")]
    NoParent { hostname: String },
}

impl HostnameError {
    pub(crate) fn malformed(input: impl Into<String>, reason: MalformedReason) -> Self {
        HostnameError::Malformed {
            input: input.into(),
            reason,
        }
    }

    /// True for every structural rejection, false for `NoParent`.
    pub fn is_malformed(&self) -> bool {
        matches!(self, HostnameError::Malformed { .. })
    }

    /// The structural reason, if this is a malformed-input error.
    pub fn reason(&self) -> Option<MalformedReason> {
        match self {
            HostnameError::Malformed { reason, .. } => Some(*reason),
            HostnameError::NoParent { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = HostnameError::malformed("a..b", MalformedReason::EmptyLabel { index: 2 });
        assert_eq!(
            err.to_string(),
            "malformed hostname \"a..b\": empty label at offset 2"
        );
        assert!(err.is_malformed());
        assert_eq!(err.reason(), Some(MalformedReason::EmptyLabel { index: 2 }));
    }

    #[test]
    fn test_no_parent() {
        let err = HostnameError::NoParent {
            hostname: "com".to_string(),
        };
        assert!(!err.is_malformed());
        assert_eq!(err.reason(), None);
        assert_eq!(err.to_string(), "com is a top-level domain and has no parent");
    }

    #[test]
    fn test_label_fault_display() {
        let reason = MalformedReason::InvalidLabel {
            index: 1,
            fault: LabelFault::BadCharacter('*'),
        };
        assert_eq!(reason.to_string(), "label 1: label contains invalid character '*'");
    }
}
