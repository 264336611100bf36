//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use dnsrec::ZoneRecordLine;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table with colors
    #[default]
    Pretty,
    /// Plain zone-file lines, ready to paste
    Zone,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "zone" | "raw" => Ok(Self::Zone),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, zone, json, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Zone => write!(f, "zone"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    class: &'static str,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&ZoneRecordLine> for RecordRow {
    fn from(line: &ZoneRecordLine) -> Self {
        Self {
            name: line.name.green().to_string(),
            class: line.class(),
            record_type: line.record_type.as_str().yellow().to_string(),
            value: line.value.clone(),
        }
    }
}

/// Render record lines as a table.
pub fn record_table(lines: &[&ZoneRecordLine]) -> String {
    let rows: Vec<RecordRow> = lines.iter().copied().map(RecordRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render record lines in zone-file form, one per line.
pub fn zone_lines(lines: &[&ZoneRecordLine]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Print records in the requested format.
///
/// `data` is what the structured formats serialize; the text formats only
/// look at `lines`.
pub fn print_records<T: Serialize>(
    format: OutputFormat,
    lines: &[&ZoneRecordLine],
    data: &T,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
        OutputFormat::Zone => print!("{}", zone_lines(lines)),
        OutputFormat::Pretty => println!("{}", record_table(lines)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsrec::RecordType;

    #[test]
    fn parse_aliases() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn zone_lines_are_newline_terminated() {
        let line = ZoneRecordLine::new("sub1", RecordType::A, "10.0.0.1");
        assert_eq!(zone_lines(&[&line]), "sub1     IN      A     10.0.0.1\n");
    }

    #[test]
    fn table_contains_values() {
        colored::control::set_override(false);
        let line = ZoneRecordLine::new("x.com.", RecordType::Txt, "v=spf1 a -all");
        let table = record_table(&[&line]);
        assert!(table.contains("v=spf1 a -all"));
        assert!(table.contains("TXT"));
    }
}
