use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{RecordError, Result};

/// Zone class written in every line. Only the Internet class is produced.
pub const RECORD_CLASS: &str = "IN";

/// DNS record type as written in the zone line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// Text record (SPF and DKIM)
    Txt,
}

impl RecordType {
    /// Mnemonic used in zone files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of record a caller asks the engine for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// DKIM policy and key records
    Dkim,
    /// SPF record
    Spf,
    /// Address record
    A,
}

impl RecordKind {
    /// All kinds in retrieval order
    pub const ALL: [Self; 3] = [Self::Dkim, Self::Spf, Self::A];

    /// Zone type the kind is published as
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::Dkim | Self::Spf => RecordType::Txt,
            Self::A => RecordType::A,
        }
    }

    /// Lowercase request name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dkim => "dkim",
            Self::Spf => "spf",
            Self::A => "a",
        }
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dkim" => Ok(Self::Dkim),
            "spf" => Ok(Self::Spf),
            "a" => Ok(Self::A),
            _ => Err(RecordError::UnsupportedRecordType(s.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a DNS master file: name, class, type, value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecordLine {
    /// Owner name (FQDN or relative host)
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record data
    pub value: String,
}

impl ZoneRecordLine {
    /// Create a line from trusted text.
    ///
    /// Embedded line breaks are removed, with a warning: a zone line must be
    /// a single line. Use [`ZoneRecordLine::try_new`] for caller input.
    pub fn new(name: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            name: strip_newlines(name.into(), "name"),
            record_type,
            value: strip_newlines(value.into(), "value"),
        }
    }

    /// Create a line, rejecting a name or value that contains a line break.
    pub fn try_new(
        name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        for (field, text) in [("name", &name), ("value", &value)] {
            if has_line_break(text) {
                return Err(RecordError::InvalidRecordValue(format!(
                    "{record_type} record {field} {text:?} contains a line break"
                )));
            }
        }
        Ok(Self {
            name,
            record_type,
            value,
        })
    }

    /// Class of the record, always `IN`
    #[must_use]
    pub const fn class(&self) -> &'static str {
        RECORD_CLASS
    }

    /// Render in zone-file form
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneRecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}     {}      {}     {}",
            self.name, RECORD_CLASS, self.record_type, self.value
        )
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

fn strip_newlines(s: String, field: &'static str) -> String {
    if has_line_break(&s) {
        warn!(field, "line break removed from zone record");
        s.replace(['\n', '\r'], "")
    } else {
        s
    }
}

/// DKIM policy record value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DkimPolicy {
    /// Testing mode, reject on failure
    Strict,
    /// Testing mode, soft-fail
    #[default]
    Relaxed,
}

impl DkimPolicy {
    /// Map the boolean strictness flag
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Relaxed
        }
    }

    /// TXT value of the policy record
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "t=y;o=-;",
            Self::Relaxed => "t=y;o=~;",
        }
    }
}

impl fmt::Display for DkimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_line_layout() {
        let line = ZoneRecordLine::new("sub1", RecordType::A, "10.0.0.1");
        assert_eq!(line.render(), "sub1     IN      A     10.0.0.1");
        assert_eq!(line.class(), "IN");
    }

    #[test]
    fn zone_line_is_single_line() {
        let line = ZoneRecordLine::new("x.com.", RecordType::Txt, "abc\ndef\r\n");
        assert_eq!(line.value, "abcdef");
        assert_eq!(line.render().lines().count(), 1);
    }

    #[test]
    fn checked_line_rejects_line_breaks() {
        let err = ZoneRecordLine::try_new("sub1", RecordType::A, "10.0.0.1\n@ IN A 6.6.6.6")
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidRecordValue(_)), "{err:?}");
        assert!(err.is_input_error());

        let err = ZoneRecordLine::try_new("sub\r1", RecordType::A, "10.0.0.1").unwrap_err();
        assert!(err.to_string().contains("name"));

        let line = ZoneRecordLine::try_new("sub1", RecordType::A, "10.0.0.1").unwrap();
        assert_eq!(line, ZoneRecordLine::new("sub1", RecordType::A, "10.0.0.1"));
    }

    #[test]
    fn record_kind_parsing() {
        assert_eq!("DKIM".parse::<RecordKind>().unwrap(), RecordKind::Dkim);
        assert_eq!("spf".parse::<RecordKind>().unwrap(), RecordKind::Spf);
        assert_eq!("A".parse::<RecordKind>().unwrap(), RecordKind::A);
        let err = "cname".parse::<RecordKind>().unwrap_err();
        assert!(matches!(err, RecordError::UnsupportedRecordType(ref s) if s == "cname"));
    }

    #[test]
    fn kinds_map_to_zone_types() {
        assert_eq!(RecordKind::Dkim.record_type(), RecordType::Txt);
        assert_eq!(RecordKind::Spf.record_type(), RecordType::Txt);
        assert_eq!(RecordKind::A.record_type(), RecordType::A);
    }

    #[test]
    fn dkim_policy_values() {
        assert_eq!(DkimPolicy::from_strict(true).as_str(), "t=y;o=-;");
        assert_eq!(DkimPolicy::from_strict(false).as_str(), "t=y;o=~;");
        assert_eq!(DkimPolicy::default(), DkimPolicy::Relaxed);
    }

    #[test]
    fn zone_line_serializes_type_field() {
        let line = ZoneRecordLine::new("x.com.", RecordType::Txt, "v=spf1 -all");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "TXT");
        assert_eq!(json["name"], "x.com.");
    }
}
