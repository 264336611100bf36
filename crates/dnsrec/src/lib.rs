//! Synthesize DNS zone records for A, SPF and DKIM.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dnsrec::{ARecordConfig, DkimConfig, RecordEngine, SpfConfig};
//!
//! fn main() -> dnsrec::Result<()> {
//!     let mut engine = RecordEngine::new("mail.haridas.in")?;
//!
//!     // Address record, host derived from the subdomain
//!     engine.a(ARecordConfig::new("192.0.2.10"))?;
//!
//!     // Allow the domain's A and MX hosts, soft-fail everything else
//!     engine.spf(SpfConfig::new("a,mx", "~"))?;
//!
//!     // Generates an RSA key pair with openssl on first use
//!     let dkim = engine.dkim(DkimConfig::new().selector("mail").strict(true))?;
//!     println!("{}", dkim.key_record);
//!
//!     print!("{}", engine.zone_snippet());
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - [`dnsrec_core`] - domain parsing, record line types, errors
//! - [`keys`] - DKIM key tool abstraction and key provider
//! - [`dnsrec_engine`] - record builders and [`RecordEngine`]

#![doc(html_root_url = "https://docs.rs/dnsrec/0.3.0")]

// Re-export core types
pub use dnsrec_core::*;

// Re-export the engine and builders
pub use dnsrec_engine::{
    builders, ARecordConfig, DkimConfig, DkimRecordBuilder, DkimRecords, EngineConfig,
    GeneratedRecord, Mechanism, RecordEngine, RecordParams, SpfConfig, SpfQualifier,
};

// Key lifecycle
pub use dnsrec_keys as keys;
pub use dnsrec_keys::{KeyProvider, KeyProviderConfig, KeyTool};

// Re-export serialization for convenience
pub use serde;
pub use serde_json;
