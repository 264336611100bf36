use thiserror::Error;

/// Result type alias for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors that can occur while building zone records
#[derive(Error, Debug)]
pub enum RecordError {
    /// Domain has fewer than two labels or an empty label
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain {
        /// The domain as supplied by the caller
        domain: String,
        /// Why it was rejected
        reason: String,
    },

    /// External key tool failed (not found, non-zero exit, bad output)
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// External key tool did not finish in time
    #[error("key generation timed out after {seconds} seconds during {step}")]
    KeyGenerationTimeout {
        /// Which invocation hung (`genrsa`, `rsa -pubout`)
        step: String,
        /// Configured limit
        seconds: u64,
    },

    /// SPF mechanism set is empty, unknown, or lacks a required IP list
    #[error("invalid SPF configuration: {0}")]
    InvalidSpfConfig(String),

    /// A record requested without an address
    #[error("missing record value: {0}")]
    MissingRecordValue(String),

    /// Record name or value would span more than one zone-file line
    #[error("invalid record value: {0}")]
    InvalidRecordValue(String),

    /// Record kind other than dkim, spf or a
    #[error("unsupported record type: {0}")]
    UnsupportedRecordType(String),

    /// DKIM selector is empty or not a valid label sequence
    #[error("invalid DKIM selector: {0}")]
    InvalidSelector(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl RecordError {
    /// Shorthand for [`RecordError::InvalidDomain`]
    pub fn invalid_domain(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from the external key tool
    #[must_use]
    pub const fn is_key_error(&self) -> bool {
        matches!(
            self,
            Self::KeyGeneration(_) | Self::KeyGenerationTimeout { .. }
        )
    }

    /// Returns true if the error is caused by caller input rather than the environment
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomain { .. }
                | Self::InvalidSpfConfig(_)
                | Self::MissingRecordValue(_)
                | Self::InvalidRecordValue(_)
                | Self::UnsupportedRecordType(_)
                | Self::InvalidSelector(_)
        )
    }

    /// Stable identifier of the error kind, suitable for relaying to API clients
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDomain { .. } => "invalid_domain",
            Self::KeyGeneration(_) => "key_generation",
            Self::KeyGenerationTimeout { .. } => "key_generation_timeout",
            Self::InvalidSpfConfig(_) => "invalid_spf_config",
            Self::MissingRecordValue(_) => "missing_record_value",
            Self::InvalidRecordValue(_) => "invalid_record_value",
            Self::UnsupportedRecordType(_) => "unsupported_record_type",
            Self::InvalidSelector(_) => "invalid_selector",
            Self::Config(_) => "config",
        }
    }
}
