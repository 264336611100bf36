//! Per-kind record configuration and engine settings.

use dnsrec_core::{RecordError, RecordType, Result};
use dnsrec_keys::KeyProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Selector used by [`DkimRecordBuilder`](crate::DkimRecordBuilder) when none is given.
pub const DEFAULT_SELECTOR: &str = "mailserver";

/// Selector the engine fills in for requests that leave it unset.
pub const DEFAULT_REQUEST_SELECTOR: &str = "test";

/// Default record TTL in seconds.
pub const DEFAULT_TTL: u32 = 1800;

/// Default MX preference.
pub const DEFAULT_MX_PREFERENCE: u16 = 10;

/// Default SPF mechanism list.
pub const DEFAULT_SPF_MECHANISMS: &str = "ip4";

/// Default SPF qualifier (fail).
pub const DEFAULT_SPF_QUALIFIER: &str = "-";

/// DKIM request options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimConfig {
    /// Selector label; `None` means "use the caller's default"
    #[serde(default)]
    pub selector: Option<String>,

    /// Reject (`o=-`) instead of soft-fail (`o=~`)
    #[serde(default)]
    pub policy_strict: bool,

    /// Caller-supplied private key
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,

    /// Caller-supplied public key, already single-line
    #[serde(default)]
    pub public_key: Option<String>,

    /// Key length override for generated keys
    #[serde(default)]
    pub key_bits: Option<u32>,
}

impl DkimConfig {
    /// Create a request with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selector
    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Use the strict policy
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.policy_strict = strict;
        self
    }

    /// Bring your own key pair
    #[must_use]
    pub fn keys(mut self, private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self.public_key = Some(public_key.into());
        self
    }

    /// Override the generated key length
    #[must_use]
    pub const fn key_bits(mut self, bits: u32) -> Self {
        self.key_bits = Some(bits);
        self
    }
}

/// SPF request options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfConfig {
    /// Comma-separated IPs or CIDR ranges for the `ip4:` block
    #[serde(default)]
    pub ip_list: Option<String>,

    /// Comma-separated mechanisms, e.g. `a,mx,ip4`
    #[serde(default = "default_spf_mechanisms")]
    pub mechanisms: String,

    /// Qualifier placed before `all`; not validated
    #[serde(default = "default_spf_qualifier")]
    pub qualifier: String,
}

impl Default for SpfConfig {
    fn default() -> Self {
        Self {
            ip_list: None,
            mechanisms: default_spf_mechanisms(),
            qualifier: default_spf_qualifier(),
        }
    }
}

impl SpfConfig {
    /// Create a request for the given mechanisms and qualifier
    pub fn new(mechanisms: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self {
            ip_list: None,
            mechanisms: mechanisms.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Set the IP list
    #[must_use]
    pub fn ip_list(mut self, ips: impl Into<String>) -> Self {
        self.ip_list = Some(ips.into());
        self
    }
}

/// A record request options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ARecordConfig {
    /// Address or CIDR; required
    #[serde(default)]
    pub value: Option<String>,

    /// Owner name; derived from the domain when absent
    #[serde(default)]
    pub host_name: Option<String>,

    /// MX preference to remember on the engine
    #[serde(default)]
    pub mx_preference: Option<u16>,
}

impl ARecordConfig {
    /// Create a request for an address
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Set an explicit host name
    #[must_use]
    pub fn host_name(mut self, host: impl Into<String>) -> Self {
        self.host_name = Some(host.into());
        self
    }
}

/// Engine-wide settings shared by every record request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Host name used by A records when a request gives none
    #[serde(default)]
    pub host_name: Option<String>,

    /// Initial record type, before any record is generated
    #[serde(default)]
    pub record_type: Option<RecordType>,

    /// MX preference (kept for MX support; reported, not rendered)
    #[serde(default = "default_mx_preference")]
    pub mx_preference: u16,

    /// TTL written in the zone snippet header
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Selector for DKIM requests that leave it unset
    #[serde(default = "default_request_selector")]
    pub default_selector: String,

    /// Key provider settings
    #[serde(default)]
    pub keys: KeyProviderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host_name: None,
            record_type: None,
            mx_preference: default_mx_preference(),
            ttl: default_ttl(),
            default_selector: default_request_selector(),
            keys: KeyProviderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load settings from a TOML file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| RecordError::Config(format!("{}: {e}", path.display())))?;
            toml::from_str(&content).map_err(|e| RecordError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Set the TTL
    #[must_use]
    pub const fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the default host name
    #[must_use]
    pub fn host_name(mut self, host: impl Into<String>) -> Self {
        self.host_name = Some(host.into());
        self
    }

    /// Set the MX preference
    #[must_use]
    pub const fn mx_preference(mut self, preference: u16) -> Self {
        self.mx_preference = preference;
        self
    }

    /// Set the key provider settings
    #[must_use]
    pub fn keys(mut self, keys: KeyProviderConfig) -> Self {
        self.keys = keys;
        self
    }
}

// Default value functions for serde.
const fn default_ttl() -> u32 {
    DEFAULT_TTL
}

const fn default_mx_preference() -> u16 {
    DEFAULT_MX_PREFERENCE
}

fn default_request_selector() -> String {
    String::from(DEFAULT_REQUEST_SELECTOR)
}

fn default_spf_mechanisms() -> String {
    String::from(DEFAULT_SPF_MECHANISMS)
}

fn default_spf_qualifier() -> String {
    String::from(DEFAULT_SPF_QUALIFIER)
}
