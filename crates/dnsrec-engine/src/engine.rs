//! Stateful record engine.

use dnsrec_core::{Domain, KeyPair, RecordKind, RecordType, Result, ZoneRecordLine};
use dnsrec_keys::{KeyTool, OpensslTool};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::builders::{
    a,
    dkim::{DkimRecordBuilder, DkimRecords},
    spf,
};
use crate::config::{ARecordConfig, DkimConfig, EngineConfig, SpfConfig};

/// Options for one [`RecordEngine::generate`] call.
///
/// Only the section matching the requested kind is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordParams {
    /// Domain for this call only; the engine's domain when `None`
    #[serde(default)]
    pub domain_name: Option<String>,
    /// DKIM options
    #[serde(default)]
    pub dkim: DkimConfig,
    /// SPF options
    #[serde(default)]
    pub spf: SpfConfig,
    /// A record options
    #[serde(default)]
    pub a: ARecordConfig,
}

/// Records produced by one [`RecordEngine::generate`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratedRecord {
    /// Policy and key records
    Dkim(DkimRecords),
    /// SPF TXT record
    Spf(ZoneRecordLine),
    /// Address record
    A(ZoneRecordLine),
}

impl GeneratedRecord {
    /// Which kind of record this is
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Dkim(_) => RecordKind::Dkim,
            Self::Spf(_) => RecordKind::Spf,
            Self::A(_) => RecordKind::A,
        }
    }

    /// Zone lines in publication order
    #[must_use]
    pub fn lines(&self) -> Vec<&ZoneRecordLine> {
        match self {
            Self::Dkim(records) => records.lines().to_vec(),
            Self::Spf(line) | Self::A(line) => vec![line],
        }
    }
}

/// Builds records for one domain and remembers the latest of each kind.
///
/// ```no_run
/// use dnsrec_engine::{RecordEngine, SpfConfig};
///
/// let mut engine = RecordEngine::new("haridas.in")?;
/// engine.spf(SpfConfig::new("a,mx", "~"))?;
/// println!("{}", engine.zone_snippet());
/// # Ok::<(), dnsrec_core::RecordError>(())
/// ```
pub struct RecordEngine {
    domain: Domain,
    config: EngineConfig,
    host_name: Option<String>,
    record_type: Option<RecordType>,
    mx_preference: u16,
    tool: Arc<dyn KeyTool>,
    dkim: Option<DkimRecordBuilder>,
    dkim_records: Option<DkimRecords>,
    spf_record: Option<ZoneRecordLine>,
    a_record: Option<ZoneRecordLine>,
}

impl std::fmt::Debug for RecordEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordEngine")
            .field("domain", &self.domain)
            .field("host_name", &self.host_name)
            .field("record_type", &self.record_type)
            .field("mx_preference", &self.mx_preference)
            .field("ttl", &self.config.ttl)
            .field("dkim_records", &self.dkim_records)
            .field("spf_record", &self.spf_record)
            .field("a_record", &self.a_record)
            .finish_non_exhaustive()
    }
}

impl RecordEngine {
    /// Create an engine with default settings
    pub fn new(domain: &str) -> Result<Self> {
        Self::with_config(domain, EngineConfig::default())
    }

    /// Create an engine with explicit settings
    pub fn with_config(domain: &str, config: EngineConfig) -> Result<Self> {
        let domain = Domain::parse(domain)?;
        let tool = Arc::new(OpensslTool::from_config(&config.keys));
        debug!(domain = %domain, ttl = config.ttl, "record engine created");

        Ok(Self {
            domain,
            host_name: config.host_name.clone(),
            record_type: config.record_type,
            mx_preference: config.mx_preference,
            config,
            tool,
            dkim: None,
            dkim_records: None,
            spf_record: None,
            a_record: None,
        })
    }

    /// Use a different key tool for DKIM key generation
    #[must_use]
    pub fn with_key_tool(mut self, tool: Arc<dyn KeyTool>) -> Self {
        self.tool = tool;
        self
    }

    /// Build a record by kind name (`dkim`, `spf` or `a`, any case).
    ///
    /// The result is returned and also kept on the engine. A failed call
    /// leaves previously stored records and the record type untouched.
    #[instrument(skip(self, params), fields(domain = %self.domain))]
    pub fn generate(&mut self, record_name: &str, params: &RecordParams) -> Result<GeneratedRecord> {
        let kind: RecordKind = record_name.parse()?;
        let domain = match params.domain_name.as_deref() {
            Some(name) => Domain::parse(name)?,
            None => self.domain.clone(),
        };

        let record = match kind {
            RecordKind::Dkim => GeneratedRecord::Dkim(self.build_dkim(domain, &params.dkim)?),
            RecordKind::Spf => GeneratedRecord::Spf(self.build_spf(&domain, &params.spf)?),
            RecordKind::A => GeneratedRecord::A(self.build_a(&domain, &params.a)?),
        };

        self.record_type = Some(kind.record_type());
        info!(kind = %kind, lines = record.lines().len(), "record generated");
        Ok(record)
    }

    /// Build DKIM records for the engine's domain
    pub fn dkim(&mut self, config: DkimConfig) -> Result<DkimRecords> {
        let records = self.build_dkim(self.domain.clone(), &config)?;
        self.record_type = Some(RecordType::Txt);
        Ok(records)
    }

    /// Build the SPF record for the engine's domain
    pub fn spf(&mut self, config: SpfConfig) -> Result<ZoneRecordLine> {
        let line = self.build_spf(&self.domain.clone(), &config)?;
        self.record_type = Some(RecordType::Txt);
        Ok(line)
    }

    /// Build the A record for the engine's domain
    pub fn a(&mut self, config: ARecordConfig) -> Result<ZoneRecordLine> {
        let line = self.build_a(&self.domain.clone(), &config)?;
        self.record_type = Some(RecordType::A);
        Ok(line)
    }

    fn build_dkim(&mut self, domain: Domain, request: &DkimConfig) -> Result<DkimRecords> {
        let mut request = request.clone();
        if request.selector.is_none() {
            request.selector = Some(self.config.default_selector.clone());
        }

        let mut builder = DkimRecordBuilder::with_tool(
            domain,
            &request,
            Arc::clone(&self.tool),
            self.config.keys.clone(),
        )?;
        let records = builder.build()?;

        self.dkim = Some(builder);
        self.dkim_records = Some(records.clone());
        Ok(records)
    }

    fn build_spf(&mut self, domain: &Domain, request: &SpfConfig) -> Result<ZoneRecordLine> {
        let line = spf::build(domain, request)?;
        self.spf_record = Some(line.clone());
        Ok(line)
    }

    fn build_a(&mut self, domain: &Domain, request: &ARecordConfig) -> Result<ZoneRecordLine> {
        let mut request = request.clone();
        if request.host_name.is_none() {
            request.host_name.clone_from(&self.config.host_name);
        }

        // Host comes from the request, then config, then the domain. The
        // previous line's host is never reused.
        let line = a::build(domain, &request)?;

        if let Some(preference) = request.mx_preference {
            self.mx_preference = preference;
        }
        self.host_name = Some(line.name.clone());
        self.a_record = Some(line.clone());
        Ok(line)
    }

    /// Latest DKIM records
    #[must_use]
    pub const fn dkim_records(&self) -> Option<&DkimRecords> {
        self.dkim_records.as_ref()
    }

    /// Latest SPF record
    #[must_use]
    pub const fn spf_record(&self) -> Option<&ZoneRecordLine> {
        self.spf_record.as_ref()
    }

    /// Latest A record
    #[must_use]
    pub const fn a_record(&self) -> Option<&ZoneRecordLine> {
        self.a_record.as_ref()
    }

    /// Key pair behind the latest DKIM records
    #[must_use]
    pub fn dkim_key_pair(&self) -> Option<&KeyPair> {
        self.dkim.as_ref().and_then(DkimRecordBuilder::key_pair)
    }

    /// Selector behind the latest DKIM records
    #[must_use]
    pub fn dkim_selector(&self) -> Option<&str> {
        self.dkim.as_ref().map(DkimRecordBuilder::selector)
    }

    /// Type of the last successfully generated record
    #[must_use]
    pub const fn record_type(&self) -> Option<RecordType> {
        self.record_type
    }

    /// Host name of the latest A record, or the configured one before any
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    /// Current MX preference
    #[must_use]
    pub const fn mx_preference(&self) -> u16 {
        self.mx_preference
    }

    /// Record TTL
    #[must_use]
    pub const fn ttl(&self) -> u32 {
        self.config.ttl
    }

    /// Engine domain
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// All stored lines: DKIM, then SPF, then A
    #[must_use]
    pub fn records(&self) -> Vec<&ZoneRecordLine> {
        let mut lines = Vec::new();
        if let Some(dkim) = &self.dkim_records {
            lines.extend(dkim.lines());
        }
        lines.extend(self.spf_record.as_ref());
        lines.extend(self.a_record.as_ref());
        lines
    }

    /// Stored lines as a zone file fragment with a `$TTL` header
    #[must_use]
    pub fn zone_snippet(&self) -> String {
        let mut out = format!("$TTL {}\n", self.config.ttl);
        for line in self.records() {
            let _ = writeln!(out, "{line}");
        }
        out
    }
}
