use thiserror::Error;

/// Result type alias for key operations
pub type KeyResult<T> = std::result::Result<T, KeyError>;

/// Errors from the external key tool and its scratch storage
#[derive(Error, Debug)]
pub enum KeyError {
    /// Tool binary could not be found on the system
    #[error("key tool not found: {tool}")]
    ToolNotFound {
        /// Program that was looked up
        tool: String,
    },

    /// Tool could not be started or waited on
    #[error("failed to run {tool}: {source}")]
    Launch {
        /// Program that was launched
        tool: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Tool exited unsuccessfully
    #[error("{step} exited with status {code:?}: {stderr}")]
    NonZeroExit {
        /// Invocation that failed
        step: &'static str,
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// Tool succeeded but produced nothing usable
    #[error("{step} produced malformed output: {reason}")]
    MalformedOutput {
        /// Invocation whose output was rejected
        step: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Tool did not finish within the configured limit
    #[error("{step} timed out after {seconds} seconds")]
    Timeout {
        /// Invocation that hung
        step: &'static str,
        /// Configured limit
        seconds: u64,
    },

    /// Scratch directory or key file I/O failed
    #[error("scratch storage error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl From<KeyError> for dnsrec_core::RecordError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Timeout { step, seconds } => Self::KeyGenerationTimeout {
                step: step.to_string(),
                seconds,
            },
            other => Self::KeyGeneration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsrec_core::RecordError;

    #[test]
    fn timeout_maps_to_its_own_kind() {
        let err: RecordError = KeyError::Timeout {
            step: "genrsa",
            seconds: 15,
        }
        .into();
        assert!(matches!(
            err,
            RecordError::KeyGenerationTimeout { ref step, seconds: 15 } if step == "genrsa"
        ));
    }

    #[test]
    fn other_failures_keep_their_message() {
        let err: RecordError = KeyError::NonZeroExit {
            step: "genrsa",
            code: Some(1),
            stderr: "bad bits".into(),
        }
        .into();
        match err {
            RecordError::KeyGeneration(msg) => {
                assert!(msg.contains("genrsa"));
                assert!(msg.contains("bad bits"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let err: RecordError = KeyError::ToolNotFound {
            tool: "openssl".into(),
        }
        .into();
        assert_eq!(err.to_string(), "key generation failed: key tool not found: openssl");
    }
}
