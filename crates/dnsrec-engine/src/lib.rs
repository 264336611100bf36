//! Record builders and the stateful record engine.
//!
//! This crate provides the main [`RecordEngine`] for producing zone-file
//! lines, plus the per-kind builders it dispatches to:
//!
//! - [`builders::dkim`] - DKIM policy and key records, backed by a key provider
//! - [`builders::spf`] - SPF mechanism assembly
//! - [`builders::a`] - address records

#![doc(html_root_url = "https://docs.rs/dnsrec-engine/0.3.0")]

pub mod builders;
mod config;
mod engine;

pub use builders::dkim::{DkimRecordBuilder, DkimRecords};
pub use builders::spf::{Mechanism, SpfQualifier};
pub use config::*;
pub use dnsrec_core::{RecordError, Result};
pub use engine::{GeneratedRecord, RecordEngine, RecordParams};
