//! Address record builder.

use dnsrec_core::{Domain, RecordError, RecordType, Result, ZoneRecordLine};
use tracing::debug;

use crate::config::ARecordConfig;

/// Owner name used for the zone apex.
pub const APEX_HOST: &str = "@";

/// Build an A record line for `domain`.
///
/// Without an explicit host name, the labels left of SLD/TLD are joined
/// with no separator (`sub1.haridas.in` -> `sub1`, `a.b.haridas.in` -> `ab`).
pub fn build(domain: &Domain, config: &ARecordConfig) -> Result<ZoneRecordLine> {
    let value = config
        .value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            RecordError::MissingRecordValue(format!(
                "an address or CIDR range is required for the A record of {domain}"
            ))
        })?;

    let host = match config.host_name.as_deref().map(str::trim) {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => derive_host_name(domain),
    };

    debug!(domain = %domain, host = %host, value, "built A record");
    ZoneRecordLine::try_new(host, RecordType::A, value)
}

/// Host part of `domain`: its subdomain labels concatenated, or `@` at the apex.
#[must_use]
pub fn derive_host_name(domain: &Domain) -> String {
    let host = domain.subdomain_labels().concat();
    if host.is_empty() {
        APEX_HOST.to_string()
    } else {
        host
    }
}
