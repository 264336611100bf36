//! Key provider configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default RSA modulus length for DKIM keys.
pub const DEFAULT_KEY_BITS: u32 = 1024;

/// Default limit for a single key tool invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for [`KeyProvider`](crate::KeyProvider) and the default tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyProviderConfig {
    /// RSA key length in bits
    #[serde(default = "default_bits")]
    pub bits: u32,

    /// Limit for each external invocation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Key tool executable
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Directory under which per-provider scratch directories are created.
    /// `None` uses the system temp dir.
    #[serde(default)]
    pub scratch_root: Option<PathBuf>,
}

impl Default for KeyProviderConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            program: default_program(),
            scratch_root: None,
        }
    }
}

impl KeyProviderConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key length
    #[must_use]
    pub const fn bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    /// Set the per-invocation timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Set the key tool executable
    #[must_use]
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the scratch root directory
    #[must_use]
    pub fn scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Per-invocation timeout as a duration
    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const fn default_bits() -> u32 {
    DEFAULT_KEY_BITS
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_program() -> PathBuf {
    PathBuf::from("openssl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeyProviderConfig::default();
        assert_eq!(config.bits, 1024);
        assert_eq!(config.timeout_duration(), Duration::from_secs(15));
        assert_eq!(config.program, PathBuf::from("openssl"));
        assert!(config.scratch_root.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: KeyProviderConfig = toml::from_str("bits = 2048").unwrap();
        assert_eq!(config.bits, 2048);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_builder_methods() {
        let config = KeyProviderConfig::new()
            .bits(2048)
            .timeout(Duration::from_secs(5))
            .program("/usr/local/bin/openssl")
            .scratch_root("/var/tmp");
        assert_eq!(config.bits, 2048);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.scratch_root, Some(PathBuf::from("/var/tmp")));
    }
}
