//! Key pair provider with per-instance scratch storage and caching.

use dnsrec_core::KeyPair;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::KeyProviderConfig;
use crate::error::{KeyError, KeyResult};
use crate::tool::{KeyTool, OpensslTool};

/// File name of the private key inside the scratch directory.
pub const PRIVATE_KEY_FILE: &str = "_key";

/// File name of the public key inside the scratch directory.
pub const PUBLIC_KEY_FILE: &str = "_key.pub";

const PUBLIC_KEY_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";

/// Supplies the DKIM key pair for one record builder.
///
/// A pair is produced at most once per instance: either handed in by the
/// caller, or generated on first request and cached. Generated key files
/// live in a scratch directory owned by this instance and removed on drop.
pub struct KeyProvider {
    tool: Arc<dyn KeyTool>,
    config: KeyProviderConfig,
    cached: Option<KeyPair>,
    scratch: Option<TempDir>,
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("config", &self.config)
            .field("cached", &self.cached)
            .field("scratch", &self.scratch_dir())
            .finish_non_exhaustive()
    }
}

impl Default for KeyProvider {
    fn default() -> Self {
        Self::openssl(KeyProviderConfig::default())
    }
}

impl KeyProvider {
    /// Create a provider backed by the given tool
    #[must_use]
    pub fn new(tool: Arc<dyn KeyTool>, config: KeyProviderConfig) -> Self {
        Self {
            tool,
            config,
            cached: None,
            scratch: None,
        }
    }

    /// Create a provider backed by the `openssl` command line
    #[must_use]
    pub fn openssl(config: KeyProviderConfig) -> Self {
        let tool = Arc::new(OpensslTool::from_config(&config));
        Self::new(tool, config)
    }

    /// Use caller-supplied key material.
    ///
    /// Only a complete pair short-circuits generation. With one half missing
    /// the supplied half is ignored and a fresh pair is generated on demand.
    #[must_use]
    pub fn with_keys(mut self, private_key: Option<String>, public_key: Option<String>) -> Self {
        let private_key = private_key.filter(|k| !k.trim().is_empty());
        let public_key = public_key.filter(|k| !k.trim().is_empty());

        match (private_key, public_key) {
            (Some(private_key), Some(public_key)) => {
                debug!("using caller-supplied DKIM key pair");
                self.cached = Some(KeyPair::supplied(private_key, public_key));
            }
            (None, None) => {}
            (private_key, _) => {
                warn!(
                    has_private = private_key.is_some(),
                    "incomplete key pair supplied, a new pair will be generated"
                );
            }
        }
        self
    }

    /// Key pair at the configured length
    pub fn key_pair(&mut self) -> KeyResult<&KeyPair> {
        let bits = self.config.bits;
        self.get_key_pair(bits)
    }

    /// Key pair of `bits` length.
    ///
    /// Once a pair exists it is returned as-is, whatever `bits` is passed.
    pub fn get_key_pair(&mut self, bits: u32) -> KeyResult<&KeyPair> {
        match self.cached {
            Some(ref pair) => Ok(pair),
            None => {
                let pair = self.generate(bits)?;
                Ok(self.cached.insert(pair))
            }
        }
    }

    /// The cached pair, if one has been supplied or generated
    #[must_use]
    pub const fn cached(&self) -> Option<&KeyPair> {
        self.cached.as_ref()
    }

    /// Scratch directory, once created
    #[must_use]
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch.as_ref().map(TempDir::path)
    }

    /// Path of the private key file, once created
    #[must_use]
    pub fn private_key_path(&self) -> Option<PathBuf> {
        self.scratch_dir().map(|d| d.join(PRIVATE_KEY_FILE))
    }

    /// Path of the public key file, once created
    #[must_use]
    pub fn public_key_path(&self) -> Option<PathBuf> {
        self.scratch_dir().map(|d| d.join(PUBLIC_KEY_FILE))
    }

    fn generate(&mut self, bits: u32) -> KeyResult<KeyPair> {
        info!(bits, "generating DKIM key pair");

        let private_pem = self.tool.generate_private_key(bits)?;

        let dir = self.ensure_scratch()?;
        let private_path = dir.join(PRIVATE_KEY_FILE);
        let public_path = dir.join(PUBLIC_KEY_FILE);

        fs::write(&private_path, &private_pem)?;
        self.tool.derive_public_key(&private_path, &public_path)?;

        let public_pem = match fs::read_to_string(&public_path) {
            Ok(pem) => pem,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KeyError::MalformedOutput {
                    step: "rsa -pubout",
                    reason: "public key file was not written".into(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        if !public_pem.contains(PUBLIC_KEY_BEGIN) {
            return Err(KeyError::MalformedOutput {
                step: "rsa -pubout",
                reason: "no PEM public key in output".into(),
            });
        }

        debug!(scratch = %dir.display(), "DKIM key pair written to scratch storage");
        Ok(KeyPair::generated(private_pem, public_pem))
    }

    fn ensure_scratch(&mut self) -> KeyResult<PathBuf> {
        if let Some(dir) = &self.scratch {
            return Ok(dir.path().to_path_buf());
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("dnsrec-key-");
        let dir = match &self.config.scratch_root {
            Some(root) => {
                fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();
        self.scratch = Some(dir);
        Ok(path)
    }
}
