//! DKIM key pair lifecycle.
//!
//! Key material is produced by an external tool (OpenSSL by default) that is
//! treated as a black box: "generate an RSA private key of N bits" and
//! "derive the public key from a private key file". [`KeyProvider`] wraps
//! that tool, keeps its working files in a private scratch directory, and
//! caches the resulting [`KeyPair`](dnsrec_core::KeyPair).

#![doc(html_root_url = "https://docs.rs/dnsrec-keys/0.3.0")]

mod config;
mod error;
mod provider;
pub mod tool;

pub use config::KeyProviderConfig;
pub use error::{KeyError, KeyResult};
pub use provider::{KeyProvider, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE};
pub use tool::{KeyTool, OpensslTool};
