//! Core types and errors for DNS zone record synthesis.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - **Types**: [`Domain`], [`ZoneRecordLine`], [`RecordType`], [`RecordKind`],
//!   [`KeyPair`] and [`DkimPolicy`]
//! - **Errors**: one taxonomy for every record operation, [`RecordError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use dnsrec_core::{Domain, RecordType, ZoneRecordLine, Result};
//!
//! fn apex_a(domain: &str) -> Result<ZoneRecordLine> {
//!     let domain = Domain::parse(domain)?;
//!     Ok(ZoneRecordLine::new(domain.fqdn(), RecordType::A, "10.0.0.1"))
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/dnsrec-core/0.3.0")]

mod error;
pub mod types;

pub use error::{RecordError, Result};
pub use types::*;
