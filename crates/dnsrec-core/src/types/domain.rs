//! Domain-name decomposition and FQDN normalisation.
//!
//! Every builder works from the same two facts about a domain: its
//! second-level label (`haridas` in `sub1.haridas.in`) and its top-level
//! label (`in`). Anything left of those is the subdomain part.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RecordError, Result};

/// Second-level and top-level labels of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParts {
    /// Second-to-last label
    pub sld: String,
    /// Last label
    pub tld: String,
}

impl DomainParts {
    /// Registrable zone, `sld.tld`
    #[must_use]
    pub fn zone(&self) -> String {
        format!("{}.{}", self.sld, self.tld)
    }
}

/// Split a domain into its SLD and TLD.
///
/// A single trailing dot is accepted (`haridas.in.`) and ignored.
pub fn resolve(domain: &str) -> Result<DomainParts> {
    let labels = split_labels(domain)?;
    let tld = labels[labels.len() - 1];
    let sld = labels[labels.len() - 2];
    Ok(DomainParts {
        sld: sld.to_string(),
        tld: tld.to_string(),
    })
}

/// Root-anchor a name: append a trailing dot unless one is present.
///
/// `haridas.in` -> `haridas.in.`; `haridas.in.` is returned unchanged.
#[must_use]
pub fn to_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

fn split_labels(domain: &str) -> Result<Vec<&str>> {
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    if trimmed.is_empty() {
        return Err(RecordError::invalid_domain(domain, "domain is empty"));
    }

    let labels: Vec<&str> = trimmed.split('.').collect();
    if labels.len() < 2 {
        return Err(RecordError::invalid_domain(
            domain,
            "needs at least two labels (e.g. example.com)",
        ));
    }
    if labels.iter().any(|l| l.is_empty()) {
        return Err(RecordError::invalid_domain(domain, "contains an empty label"));
    }
    if labels.iter().any(|l| l.chars().any(char::is_whitespace)) {
        return Err(RecordError::invalid_domain(domain, "contains whitespace"));
    }

    Ok(labels)
}

/// A validated domain name with at least two labels.
///
/// Immutable once parsed; builders borrow it for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain {
    name: String,
    parts: DomainParts,
}

impl Domain {
    /// Parse a domain.
    ///
    /// Accepts a comma-separated list of main domains and keeps only the
    /// first entry, since one engine processes exactly one domain.
    pub fn parse(input: &str) -> Result<Self> {
        let first = input.split(',').next().unwrap_or_default().trim();
        let parts = resolve(first)?;
        Ok(Self {
            name: first.strip_suffix('.').unwrap_or(first).to_string(),
            parts,
        })
    }

    /// The domain without a trailing dot
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The domain in root-anchored form
    #[must_use]
    pub fn fqdn(&self) -> String {
        to_fqdn(&self.name)
    }

    /// Second-level label
    #[must_use]
    pub fn sld(&self) -> &str {
        &self.parts.sld
    }

    /// Top-level label
    #[must_use]
    pub fn tld(&self) -> &str {
        &self.parts.tld
    }

    /// SLD and TLD together
    #[must_use]
    pub const fn parts(&self) -> &DomainParts {
        &self.parts
    }

    /// Labels left of the SLD, outermost first.
    ///
    /// Empty for an apex domain.
    #[must_use]
    pub fn subdomain_labels(&self) -> Vec<&str> {
        let labels: Vec<&str> = self.name.split('.').collect();
        labels[..labels.len() - 2].to_vec()
    }

    /// True when the domain is exactly `sld.tld`
    #[must_use]
    pub fn is_apex(&self) -> bool {
        self.subdomain_labels().is_empty()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Domain {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Domain {
    type Error = RecordError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.name
    }
}
