//! The validated hostname value type.

use super::error::{HostnameError, MalformedReason};
use super::label::{check_size, encoded_len, validate, Label};
use super::parser;
use crate::dns::{Name, Resolve, ResolveOptions, Resolving};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, ops::Index, slice, str::FromStr};
use url::{Host, Url};

/// An immutable, syntactically valid DNS hostname.
///
/// Labels are stored most specific first and folded to lowercase, so
/// `WWW.Example.COM.` and `www.example.com` are the same value and hash
/// identically.
///
/// Ordering follows the domain hierarchy: labels are compared from the
/// top-level domain inward, and a name sorts after all of its ancestors.
///
/// # Example
///
/// ```
/// use hostname::Hostname;
///
/// let host = Hostname::parse("WWW.Example.COM.").unwrap();
/// assert_eq!(host.to_string(), "www.example.com");
/// assert_eq!(host.level_count(), 3);
/// assert!(host.has_tld("com"));
///
/// let parent = host.parent().unwrap();
/// assert!(host.is_subdomain_of(&parent));
/// assert!(parent < host);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Hostname {
    labels: Vec<Label>,
}

impl Hostname {
    /// Parses free-form text, accepting one trailing `.`.
    pub fn parse(text: &str) -> Result<Self, HostnameError> {
        parser::parse(text)
            .map(Self::from_validated)
            .map_err(|reason| reject(text, reason))
    }

    /// Like [`Hostname::parse`], discarding the failure reason.
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Builds a hostname from labels that are already split, most specific
    /// first. Labels are case-folded.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, HostnameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<S> = labels.into_iter().collect();
        validate(&labels)
            .map(Self::from_validated)
            .map_err(|reason| {
                let input = labels
                    .iter()
                    .map(|l| l.as_ref())
                    .collect::<Vec<&str>>()
                    .join(".");
                reject(&input, reason)
            })
    }

    /// Like [`Hostname::from_labels`], discarding the failure reason.
    pub fn try_from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_labels(labels).ok()
    }

    /// Extracts the host of a URL. IP literals and host-less URLs are
    /// rejected.
    pub fn from_url(url: &Url) -> Result<Self, HostnameError> {
        match url.host() {
            Some(Host::Domain(domain)) => Self::parse(domain),
            _ => Err(reject(url.as_str(), MalformedReason::NotADomain)),
        }
    }

    fn from_validated(labels: Vec<Label>) -> Self {
        debug_assert!(check_size(labels.as_slice()).is_ok());
        Self { labels }
    }

    /// Encoded length in characters, separators included.
    pub fn size(&self) -> usize {
        encoded_len(self.labels.as_slice())
    }

    /// Number of labels.
    pub fn level_count(&self) -> usize {
        self.labels.len()
    }

    /// The label at `index`, counting from the most specific.
    pub fn label_at(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// All labels, most specific first.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Iterates labels, most specific first.
    pub fn iter(&self) -> slice::Iter<'_, Label> {
        self.labels.iter()
    }

    /// The top-level-domain label.
    pub fn tld(&self) -> &Label {
        &self.labels[self.labels.len() - 1]
    }

    /// True for a single-label name such as `com`.
    pub fn is_top_level_domain(&self) -> bool {
        self.labels.len() == 1
    }

    /// True if the last label equals `tld`, ignoring ASCII case.
    pub fn has_tld(&self, tld: &str) -> bool {
        self.has_any_tld([tld])
    }

    /// True if the last label equals any of `tlds`, ignoring ASCII case.
    pub fn has_any_tld<I, S>(&self, tlds: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tld = self.tld();
        tlds.into_iter()
            .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(tld))
    }

    /// True if `self` sits strictly below `other` in the hierarchy.
    ///
    /// `www.example.com` is a subdomain of `example.com` and of `com`, but
    /// not of itself.
    pub fn is_subdomain_of(&self, other: &Hostname) -> bool {
        if self.labels.len() <= other.labels.len() {
            return false;
        }

        let mut ours = self.labels.iter().rev();
        let mut theirs = other.labels.iter().rev();
        loop {
            match (theirs.next(), ours.next()) {
                // `other` ran out first with every label matched.
                (None, _) => return true,
                (Some(a), Some(b)) if a == b => continue,
                _ => return false,
            }
        }
    }

    /// The immediate parent domain. Fails on a top-level domain.
    pub fn parent(&self) -> Result<Self, HostnameError> {
        self.nth_parent(1)
    }

    /// Like [`Hostname::parent`], `None` on a top-level domain.
    pub fn try_parent(&self) -> Option<Self> {
        self.parent().ok()
    }

    /// Drops the `depth` most specific labels.
    ///
    /// Fails with [`HostnameError::NoParent`] on a top-level domain, or when
    /// `depth` would remove every label. A depth of zero returns a copy.
    pub fn nth_parent(&self, depth: usize) -> Result<Self, HostnameError> {
        if self.is_top_level_domain() || depth >= self.labels.len() {
            return Err(HostnameError::NoParent {
                hostname: self.to_string(),
            });
        }
        // A suffix of a valid name satisfies every size bound.
        Ok(Self::from_validated(self.labels[depth..].to_vec()))
    }

    /// Prepends `label`, re-checking the 127-label and 253-character limits.
    pub fn child(&self, label: &str) -> Result<Self, HostnameError> {
        let head = Label::new(label).map_err(|fault| {
            reject(
                &format!("{label}.{self}"),
                MalformedReason::InvalidLabel { index: 0, fault },
            )
        })?;

        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.push(head);
        labels.extend(self.labels.iter().cloned());

        check_size(labels.as_slice())
            .map_err(|reason| reject(&format!("{label}.{self}"), reason))?;
        Ok(Self::from_validated(labels))
    }

    /// Like [`Hostname::child`], discarding the failure reason.
    pub fn try_child(&self, label: &str) -> Option<Self> {
        self.child(label).ok()
    }

    /// Fully-qualified text form, with the trailing `.`.
    pub fn to_fqdn(&self) -> String {
        format!("{self}.")
    }

    /// Canonical text handed to resolvers.
    pub fn to_name(&self) -> Name {
        Name::new(self.to_string())
    }

    /// Resolves this hostname with `resolver`.
    ///
    /// Nothing in this type resolves implicitly; this is the only path from a
    /// hostname to the network.
    pub fn resolve_with<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
        options: ResolveOptions,
    ) -> Resolving {
        resolver.resolve(self.to_name(), options)
    }
}

fn reject(input: &str, reason: MalformedReason) -> HostnameError {
    tracing::trace!(input = %input, reason = %reason, "rejected hostname");
    HostnameError::malformed(input, reason)
}

impl Ord for Hostname {
    fn cmp(&self, other: &Self) -> Ordering {
        // Walk from the TLD inward.
        let ours = self.labels.iter().rev();
        let theirs = other.labels.iter().rev();

        for (l, r) in ours.zip(theirs) {
            match l.as_bytes().cmp(r.as_bytes()) {
                Ordering::Equal => continue,
                not_eq => return not_eq,
            }
        }

        self.labels.len().cmp(&other.labels.len())
    }
}

impl PartialOrd for Hostname {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Index<usize> for Hostname {
    type Output = Label;

    fn index(&self, index: usize) -> &Label {
        &self.labels[index]
    }
}

impl<'a> IntoIterator for &'a Hostname {
    type Item = &'a Label;
    type IntoIter = slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = self.labels.iter();
        if let Some(first) = labels.next() {
            f.write_str(first)?;
        }
        for label in labels {
            f.write_str(".")?;
            f.write_str(label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hostname").field(&self.to_string()).finish()
    }
}

impl FromStr for Hostname {
    type Err = HostnameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hostname::parse(s)
    }
}

impl TryFrom<&str> for Hostname {
    type Error = HostnameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Hostname::parse(value)
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Hostname::parse(&value)
    }
}

impl From<Hostname> for String {
    fn from(value: Hostname) -> Self {
        value.to_string()
    }
}

impl From<&Hostname> for Name {
    fn from(value: &Hostname) -> Self {
        value.to_name()
    }
}
