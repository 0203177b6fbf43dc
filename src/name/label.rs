//! Label character rules and the label-sequence validator.
//!
//! The predicates here are shared by [`validate`] and the text parser so both
//! factory paths enforce exactly the same rules.

use super::error::{LabelFault, MalformedReason};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref, str::FromStr};

/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;
/// Maximum number of labels in a hostname.
pub const MAX_LABELS: usize = 127;
/// Maximum encoded length of a hostname, separators included.
pub const MAX_NAME_LEN: usize = 253;

/// Characters allowed anywhere in a label.
#[inline]
pub fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Characters allowed at the first and last position of a label.
#[inline]
pub fn is_boundary_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// A single validated, lowercase hostname label.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Label(Box<str>);

impl Label {
    /// Validates `text` as a single label and case-folds it.
    pub fn new(text: &str) -> Result<Self, LabelFault> {
        check_label(text)?;
        Ok(Self(text.to_ascii_lowercase().into_boxed_str()))
    }

    /// Wraps text the parser has already checked and folded.
    pub(crate) fn from_folded(text: String) -> Self {
        debug_assert!(check_label(&text).is_ok());
        debug_assert!(!text.bytes().any(|b| b.is_ascii_uppercase()));
        Self(text.into_boxed_str())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Label {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<Label> for String {
    fn from(value: Label) -> Self {
        value.0.into_string()
    }
}

impl TryFrom<String> for Label {
    type Error = LabelFault;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Label::new(&value)
    }
}

impl TryFrom<&str> for Label {
    type Error = LabelFault;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Label::new(value)
    }
}

impl FromStr for Label {
    type Err = LabelFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::new(s)
    }
}

/// Checks a single label against the length and character rules.
pub fn check_label(label: &str) -> Result<(), LabelFault> {
    if label.is_empty() {
        return Err(LabelFault::Empty);
    }
    if let Some(c) = label.chars().find(|&c| !is_label_char(c)) {
        return Err(LabelFault::BadCharacter(c));
    }
    // Only ASCII remains, so byte length is character length.
    if label.len() > MAX_LABEL_LEN {
        return Err(LabelFault::TooLong);
    }
    let bytes = label.as_bytes();
    if !is_boundary_char(bytes[0] as char) || !is_boundary_char(bytes[bytes.len() - 1] as char) {
        return Err(LabelFault::BadBoundary);
    }
    Ok(())
}

/// Sum of label lengths plus one separator between each pair.
pub(crate) fn encoded_len<S: AsRef<str>>(labels: &[S]) -> usize {
    let chars: usize = labels.iter().map(|l| l.as_ref().len()).sum();
    chars + labels.len().saturating_sub(1)
}

/// Whole-sequence size check: label count and total encoded length.
pub fn check_size<S: AsRef<str>>(labels: &[S]) -> Result<(), MalformedReason> {
    if labels.is_empty() {
        return Err(MalformedReason::EmptySequence);
    }
    if labels.len() > MAX_LABELS {
        return Err(MalformedReason::TooManyLabels {
            count: labels.len(),
        });
    }
    let len = encoded_len(labels);
    if !(1..=MAX_NAME_LEN).contains(&len) {
        return Err(MalformedReason::TotalLengthOutOfRange { len });
    }
    Ok(())
}

/// Validates an already-split label sequence and case-folds every label.
pub fn validate<I, S>(labels: I) -> Result<Vec<Label>, MalformedReason>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let labels: Vec<S> = labels.into_iter().collect();
    check_size(labels.as_slice())?;

    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            Label::new(label.as_ref())
                .map_err(|fault| MalformedReason::InvalidLabel { index, fault })
        })
        .collect()
}
