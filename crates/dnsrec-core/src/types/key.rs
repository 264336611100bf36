use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a key pair came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    /// Both halves handed in by the caller
    Supplied,
    /// Produced by the external key tool
    Generated,
}

/// RSA key pair used for DKIM.
///
/// Supplied public keys are expected to be pre-normalised (single line, no
/// PEM armour); generated ones are PEM text straight from the key tool.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// Private key text (PEM when generated)
    pub private_key_pem: String,
    /// Public key text (PEM when generated)
    pub public_key_pem: String,
    /// Provenance
    pub source: KeySource,
    /// When the pair was generated or accepted
    pub created_at: DateTime<Utc>,
}

impl KeyPair {
    /// Wrap caller-supplied key material
    pub fn supplied(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key_pem: private_key.into(),
            public_key_pem: public_key.into(),
            source: KeySource::Supplied,
            created_at: Utc::now(),
        }
    }

    /// Wrap freshly generated PEM text
    pub fn generated(private_key_pem: impl Into<String>, public_key_pem: impl Into<String>) -> Self {
        Self {
            private_key_pem: private_key_pem.into(),
            public_key_pem: public_key_pem.into(),
            source: KeySource::Generated,
            created_at: Utc::now(),
        }
    }

    /// True when the caller supplied the key material
    #[must_use]
    pub fn is_supplied(&self) -> bool {
        self.source == KeySource::Supplied
    }
}

// Private key material stays out of logs.
impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key_pem", &"<redacted>")
            .field("public_key_pem", &self.public_key_pem)
            .field("source", &self.source)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_private_key() {
        let pair = KeyPair::supplied("SECRET", "PUBLIC");
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("PUBLIC"));
    }

    #[test]
    fn source_is_tracked() {
        assert!(KeyPair::supplied("a", "b").is_supplied());
        assert!(!KeyPair::generated("a", "b").is_supplied());
    }
}
