//! DKIM policy and key record builder.

use dnsrec_core::{
    to_fqdn, DkimPolicy, Domain, KeyPair, RecordError, RecordType, Result, ZoneRecordLine,
};
use dnsrec_keys::{KeyProvider, KeyProviderConfig, KeyTool, OpensslTool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{DkimConfig, DEFAULT_SELECTOR};

const DOMAINKEY_LABEL: &str = "_domainkey";

/// The two TXT records a DKIM deployment publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimRecords {
    /// `_domainkey.<sld>.<tld>.` policy record
    pub policy_record: ZoneRecordLine,
    /// `<selector>._domainkey.<sld>.<tld>.` public key record
    pub key_record: ZoneRecordLine,
}

impl DkimRecords {
    /// Both lines, policy first
    #[must_use]
    pub fn lines(&self) -> [&ZoneRecordLine; 2] {
        [&self.policy_record, &self.key_record]
    }
}

/// Builds DKIM records for one domain and selector.
///
/// Owns its [`KeyProvider`], so the key pair is generated at most once per
/// builder and stays retrievable through [`DkimRecordBuilder::key_pair`].
#[derive(Debug)]
pub struct DkimRecordBuilder {
    domain: Domain,
    selector: String,
    policy: DkimPolicy,
    key_bits: u32,
    provider: KeyProvider,
}

impl DkimRecordBuilder {
    /// Create a builder that generates keys with the `openssl` command line
    pub fn new(domain: Domain, config: &DkimConfig, keys: KeyProviderConfig) -> Result<Self> {
        let tool = Arc::new(OpensslTool::from_config(&keys));
        Self::with_tool(domain, config, tool, keys)
    }

    /// Create a builder backed by a specific key tool
    pub fn with_tool(
        domain: Domain,
        config: &DkimConfig,
        tool: Arc<dyn KeyTool>,
        keys: KeyProviderConfig,
    ) -> Result<Self> {
        let selector = match config.selector.as_deref() {
            Some(selector) => validate_selector(selector)?,
            None => DEFAULT_SELECTOR.to_string(),
        };
        let key_bits = config.key_bits.unwrap_or(keys.bits);
        let provider = KeyProvider::new(tool, keys)
            .with_keys(config.private_key.clone(), config.public_key.clone());

        Ok(Self {
            domain,
            selector,
            policy: DkimPolicy::from_strict(config.policy_strict),
            key_bits,
            provider,
        })
    }

    /// Produce the policy and key records.
    ///
    /// The first call may run the key tool; later calls reuse the same pair.
    pub fn build(&mut self) -> Result<DkimRecords> {
        let pair = self.provider.get_key_pair(self.key_bits)?;
        let normalized = normalize_public_key(&pair.public_key_pem, pair.is_supplied());
        let encoded = encode_key(&normalized);

        let policy_hostname = self.policy_hostname();
        let key_hostname = self.key_hostname();
        info!(
            domain = %self.domain,
            selector = %self.selector,
            policy = %self.policy,
            "built DKIM records"
        );

        Ok(DkimRecords {
            policy_record: ZoneRecordLine::new(
                policy_hostname,
                RecordType::Txt,
                self.policy.as_str(),
            ),
            key_record: ZoneRecordLine::new(
                key_hostname,
                RecordType::Txt,
                format!("k=rsa;p={encoded}"),
            ),
        })
    }

    /// `_domainkey.<sld>.<tld>.`
    #[must_use]
    pub fn policy_hostname(&self) -> String {
        to_fqdn(&format!(
            "{DOMAINKEY_LABEL}.{}.{}",
            self.domain.sld(),
            self.domain.tld()
        ))
    }

    /// `<selector>._domainkey.<sld>.<tld>.`
    #[must_use]
    pub fn key_hostname(&self) -> String {
        format!("{}.{}", self.selector, self.policy_hostname())
    }

    /// The key pair, once supplied or generated
    #[must_use]
    pub const fn key_pair(&self) -> Option<&KeyPair> {
        self.provider.cached()
    }

    /// Selector in use
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Policy in use
    #[must_use]
    pub const fn policy(&self) -> DkimPolicy {
        self.policy
    }

    /// Domain the records are built for
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }
}

/// Single-line key text for the `p=` tag.
///
/// Caller-supplied keys are taken as already normalised. PEM text has its
/// armour lines and blank lines removed and the body joined.
#[must_use]
pub fn normalize_public_key(key: &str, from_caller: bool) -> String {
    if from_caller {
        return key.trim().to_string();
    }
    key.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect()
}

/// Percent-encode key text so `/`, `+` and `=` survive in the record value.
#[must_use]
pub fn encode_key(key: &str) -> String {
    url::form_urlencoded::byte_serialize(key.as_bytes()).collect()
}

fn validate_selector(selector: &str) -> Result<String> {
    if selector.is_empty() {
        return Err(RecordError::InvalidSelector("selector is empty".into()));
    }
    if selector.chars().any(char::is_whitespace) {
        return Err(RecordError::InvalidSelector(format!(
            "'{selector}' contains whitespace"
        )));
    }
    if selector.starts_with('.') || selector.ends_with('.') || selector.contains("..") {
        return Err(RecordError::InvalidSelector(format!(
            "'{selector}' has an empty label"
        )));
    }
    debug!(selector, "selector accepted");
    Ok(selector.to_string())
}
