//! `dnsrec dkim` - DKIM policy and key records.

use anyhow::{Context as _, Result};
use colored::Colorize;
use dnsrec::builders::dkim::normalize_public_key;
use dnsrec::{DkimConfig, DkimPolicy, DkimRecords, KeyPair};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::Context;
use crate::cli::args::DkimArgs;
use crate::education::Explain;
use crate::output::print_records;

#[derive(Serialize)]
struct DkimOutput<'a> {
    domain: &'a str,
    selector: &'a str,
    policy: DkimPolicy,
    key_source: Option<dnsrec::KeySource>,
    #[serde(flatten)]
    records: &'a DkimRecords,
}

pub fn execute(ctx: &Context, args: DkimArgs) -> Result<()> {
    let mut request = DkimConfig::new().strict(args.strict);
    request.selector = args.selector;
    request.key_bits = args.bits;

    if let (Some(private_path), Some(public_path)) = (&args.private_key, &args.public_key) {
        let (private_key, public_key) = read_key_files(private_path, public_path)?;
        request = request.keys(private_key, public_key);
    }

    let mut engine = ctx.engine(&args.domain)?;
    let records = engine.dkim(request)?;

    let pair = engine.dkim_key_pair();
    let generated = pair.is_some_and(|p| !p.is_supplied());
    let selector = engine.dkim_selector().unwrap_or_default();
    let policy = DkimPolicy::from_strict(args.strict);

    if ctx.explain {
        Explain::dkim(
            &records.policy_record.name,
            &records.key_record.name,
            policy,
            generated,
        )
        .print();
    }

    let output = DkimOutput {
        domain: engine.domain().as_str(),
        selector,
        policy,
        key_source: pair.map(|p| p.source),
        records: &records,
    };
    print_records(ctx.output_format, &records.lines(), &output)?;

    keep_private_key(pair, args.private_key_out.as_deref())?;

    Ok(())
}

/// Save a freshly generated private key to `out`, or say that it was dropped.
/// Supplied keys are left alone.
pub(super) fn keep_private_key(pair: Option<&KeyPair>, out: Option<&Path>) -> Result<()> {
    let Some(pair) = pair.filter(|p| !p.is_supplied()) else {
        return Ok(());
    };

    match out {
        Some(path) => {
            write_private_key(path, &pair.private_key_pem)?;
            eprintln!(
                "{} private key written to {}",
                "Saved:".green().bold(),
                path.display()
            );
        }
        None => eprintln!(
            "{} the generated private key was not saved; use --private-key-out to keep it",
            "Note:".yellow().bold()
        ),
    }
    Ok(())
}

/// Read a key pair from disk, flattening a PEM public key to the `p=` form.
fn read_key_files(private_path: &Path, public_path: &Path) -> Result<(String, String)> {
    let private_key = fs::read_to_string(private_path)
        .with_context(|| format!("reading private key {}", private_path.display()))?;
    let public_key = fs::read_to_string(public_path)
        .with_context(|| format!("reading public key {}", public_path.display()))?;

    let public_key = normalize_public_key(&public_key, false);
    if public_key.is_empty() {
        anyhow::bail!("public key file {} is empty", public_path.display());
    }
    Ok((private_key, public_key))
}

fn write_private_key(path: &Path, pem: &str) -> Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
        file.write_all(pem.as_bytes())?;
    }
    #[cfg(not(unix))]
    fs::write(path, pem).with_context(|| format!("creating {}", path.display()))?;

    Ok(())
}
