//! Per-kind record builders.
//!
//! Each builder turns a [`Domain`](dnsrec_core::Domain) plus its request
//! options into [`ZoneRecordLine`](dnsrec_core::ZoneRecordLine)s. A builder
//! either returns complete records or an error, never a partial record.

pub mod a;
pub mod dkim;
pub mod spf;
