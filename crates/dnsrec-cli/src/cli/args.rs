//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Synthesize DNS zone records for A, SPF and DKIM.
///
/// Records are printed, never published: paste them into your zone file or
/// your DNS provider's console. Use --explain on any command to learn what
/// the record does.
#[derive(Parser, Debug)]
#[command(name = "dnsrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, env = "DNSREC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what the generated records do
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// DKIM policy and public key records
    Dkim(DkimArgs),

    /// SPF record listing authorised senders
    Spf(SpfArgs),

    /// Address record for a host
    A(AArgs),

    /// Several record kinds at once, as a zone file fragment
    Zone(ZoneArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// DKIM command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct DkimArgs {
    /// Domain the mail is sent from
    pub domain: String,

    /// Selector label (defaults to the configured default_selector)
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Ask receivers to reject failing mail (o=-) instead of soft-failing it
    #[arg(long)]
    pub strict: bool,

    /// Existing private key file
    #[arg(long, requires = "public_key")]
    pub private_key: Option<PathBuf>,

    /// Existing public key file (PEM or single-line base64)
    #[arg(long, requires = "private_key")]
    pub public_key: Option<PathBuf>,

    /// RSA key length for generated keys
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Write the generated private key to this file
    #[arg(long)]
    pub private_key_out: Option<PathBuf>,
}

// ============================================================================
// SPF command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct SpfArgs {
    /// Domain the record is published for
    pub domain: String,

    /// Mechanisms to include: a, mx, ip4, include, all (comma-separated)
    #[arg(short, long, default_value = "ip4")]
    pub mechanisms: String,

    /// IPv4 addresses or CIDR ranges for ip4/include (comma-separated)
    #[arg(short, long)]
    pub ips: Option<String>,

    /// Qualifier for the closing all term: - ~ ? +
    #[arg(short, long, default_value = "-", allow_hyphen_values = true)]
    pub qualifier: String,
}

// ============================================================================
// A command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct AArgs {
    /// Fully qualified host, e.g. sub1.example.com
    pub domain: String,

    /// IPv4 address or CIDR range
    pub value: Option<String>,

    /// Host label to publish instead of the derived one
    #[arg(long)]
    pub host: Option<String>,

    /// MX preference to record alongside the host
    #[arg(long)]
    pub mx_preference: Option<u16>,
}

// ============================================================================
// Zone command
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ZoneArgs {
    /// Domain to build records for
    pub domain: String,

    /// Include an A record with this address
    #[arg(long)]
    pub address: Option<String>,

    /// Include an SPF record with these mechanisms
    #[arg(long)]
    pub spf: Option<String>,

    /// IP list for the SPF ip4/include mechanisms
    #[arg(long)]
    pub ips: Option<String>,

    /// SPF qualifier
    #[arg(long, default_value = "-", allow_hyphen_values = true)]
    pub qualifier: String,

    /// Include DKIM records (generates a key pair)
    #[arg(long)]
    pub dkim: bool,

    /// DKIM selector
    #[arg(long)]
    pub selector: Option<String>,

    /// Strict DKIM policy
    #[arg(long)]
    pub strict: bool,

    /// Write the generated DKIM private key to this file
    #[arg(long, requires = "dkim")]
    pub private_key_out: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
