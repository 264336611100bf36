//! Command implementations.

pub mod a;
pub mod config;
pub mod dkim;
pub mod spf;
pub mod zone;

use dnsrec::RecordEngine;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,

    /// Where the configuration lives
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show explanations
    pub explain: bool,
}

impl Context {
    /// Create a record engine for `domain` with the configured settings.
    pub fn engine(&self, domain: &str) -> anyhow::Result<RecordEngine> {
        Ok(RecordEngine::with_config(domain, self.config.engine.clone())?)
    }
}
