//! Public Suffix List (PSL) queries on hostnames.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate. Names whose suffix
//! is not on the list (e.g. `localhost`, `corp.internal`) have no public
//! suffix and no registrable domain.

use super::hostname::Hostname;
use psl::{List, Psl};

impl Hostname {
    /// True if the whole name is a listed public suffix (`com`, `co.uk`).
    pub fn is_public_suffix(&self) -> bool {
        let text = self.to_string();
        match List.suffix(text.as_bytes()) {
            Some(suffix) => suffix.is_known() && suffix.as_bytes() == text.as_bytes(),
            None => false,
        }
    }

    /// The listed public suffix this name falls under.
    ///
    /// `www.bbc.co.uk` → `co.uk`.
    pub fn public_suffix(&self) -> Option<Hostname> {
        let text = self.to_string();
        let suffix = List.suffix(text.as_bytes()).filter(|s| s.is_known())?;
        let suffix = std::str::from_utf8(suffix.as_bytes()).ok()?;
        Hostname::try_parse(suffix)
    }

    /// The registrable domain (eTLD+1).
    ///
    /// `www.bbc.co.uk` → `bbc.co.uk`; `None` for public suffixes themselves.
    pub fn registrable_domain(&self) -> Option<Hostname> {
        let text = self.to_string();
        let domain = List.domain(text.as_bytes())?;
        if !domain.suffix().is_known() {
            return None;
        }
        let domain = std::str::from_utf8(domain.as_bytes()).ok()?;
        Hostname::try_parse(domain)
    }
}
