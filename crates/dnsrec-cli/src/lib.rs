//! # dnsrec-cli
//!
//! Command-line interface for synthesizing DNS zone records.
//!
//! ## Features
//!
//! - **Record kinds**: A, SPF and DKIM (policy + key) records
//! - **Key management**: DKIM keys generated with `openssl` or read from files
//! - **Zone snippets**: several kinds at once under a `$TTL` header
//! - **Explain mode**: `--explain` describes what a record does
//! - **Multiple output formats**: Pretty tables, zone lines, JSON, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;
