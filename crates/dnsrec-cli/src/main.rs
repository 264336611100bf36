//! dnsrec - DNS zone record synthesizer
//!
//! Prints A, SPF and DKIM records for a domain in zone-file form.

use anyhow::Result;

fn main() -> Result<()> {
    dnsrec_cli::run()
}
