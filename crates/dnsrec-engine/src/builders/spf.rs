//! SPF record builder.
//!
//! The record body is assembled in a fixed order regardless of how the
//! mechanisms were listed: `v=spf1`, `a`, `mx`, the `ip4:` block, then the
//! qualified `all`.
//!
//! `IP4` and `INCLUDE` both ask for the caller's IP list; each entry is
//! emitted as `ip4:<entry>`. A list is required only when one of the two is
//! actually requested.

use dnsrec_core::{to_fqdn, Domain, RecordError, RecordType, Result, ZoneRecordLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::SpfConfig;

/// SPF version tag.
const SPF_VERSION: &str = "v=spf1";

/// Mechanism tokens accepted in the request list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mechanism {
    /// Hosts in the domain's A records
    A,
    /// Hosts in the domain's MX records
    Mx,
    /// Explicit IPv4 addresses or ranges
    Ip4,
    /// Entries from the IP list (emitted as `ip4:`)
    Include,
    /// Catch-all; the qualified `all` tail is always present
    All,
}

impl FromStr for Mechanism {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "MX" => Ok(Self::Mx),
            "IP4" => Ok(Self::Ip4),
            "INCLUDE" => Ok(Self::Include),
            "ALL" => Ok(Self::All),
            other => Err(RecordError::InvalidSpfConfig(format!(
                "unknown mechanism '{other}' (expected A, MX, IP4, INCLUDE or ALL)"
            ))),
        }
    }
}

/// Standard SPF qualifiers.
///
/// The builder accepts any qualifier string; this type is for callers that
/// want to pick one of the four defined values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpfQualifier {
    /// `-`: reject mail that fails the check
    #[default]
    Fail,
    /// `~`: accept but mark, useful while debugging a record
    SoftFail,
    /// `?`: no policy statement
    Neutral,
    /// `+`: always pass
    Pass,
}

impl SpfQualifier {
    /// Symbol written before `all`
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Fail => "-",
            Self::SoftFail => "~",
            Self::Neutral => "?",
            Self::Pass => "+",
        }
    }

    /// One-line description of what receivers do
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Fail => "fail: mail from unlisted senders should be rejected",
            Self::SoftFail => "softfail: accept but flag mail from unlisted senders",
            Self::Neutral => "neutral: no statement about unlisted senders",
            Self::Pass => "pass: every sender passes (not recommended)",
        }
    }
}

impl FromStr for SpfQualifier {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-" | "fail" => Ok(Self::Fail),
            "~" | "softfail" => Ok(Self::SoftFail),
            "?" | "neutral" => Ok(Self::Neutral),
            "+" | "pass" => Ok(Self::Pass),
            other => Err(RecordError::InvalidSpfConfig(format!(
                "unknown qualifier '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SpfQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parse a comma-separated mechanism list into a set.
///
/// Empty entries are skipped. An unknown token is an error.
pub fn parse_mechanisms(input: &str) -> Result<BTreeSet<Mechanism>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Assemble the TXT value of the SPF record.
pub fn record_value(config: &SpfConfig) -> Result<String> {
    let mechanisms = parse_mechanisms(&config.mechanisms)?;
    if mechanisms.is_empty() {
        return Err(RecordError::InvalidSpfConfig(
            "at least one mechanism is required".into(),
        ));
    }

    let mut parts = vec![SPF_VERSION.to_string()];

    if mechanisms.contains(&Mechanism::A) {
        parts.push("a".into());
    }
    if mechanisms.contains(&Mechanism::Mx) {
        parts.push("mx".into());
    }
    if mechanisms.contains(&Mechanism::Ip4) || mechanisms.contains(&Mechanism::Include) {
        parts.extend(ip4_terms(config.ip_list.as_deref())?);
    }

    parts.push(format!("{}all", config.qualifier.trim()));
    Ok(parts.join(" "))
}

/// Build the SPF TXT record line for `domain`.
pub fn build(domain: &Domain, config: &SpfConfig) -> Result<ZoneRecordLine> {
    let value = record_value(config)?;
    debug!(domain = %domain, value = %value, "built SPF record");
    ZoneRecordLine::try_new(to_fqdn(domain.as_str()), RecordType::Txt, value)
}

fn ip4_terms(ip_list: Option<&str>) -> Result<Vec<String>> {
    let terms: Vec<String> = ip_list
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(|ip| format!("ip4:{ip}"))
        .collect();

    if terms.is_empty() {
        return Err(RecordError::InvalidSpfConfig(
            "IP4/INCLUDE mechanism requested without an IP list".into(),
        ));
    }
    Ok(terms)
}
