//! `dnsrec a` - address record.

use anyhow::Result;
use dnsrec::ARecordConfig;
use serde::Serialize;

use super::Context;
use crate::cli::args::AArgs;
use crate::education::Explain;
use crate::output::print_records;

#[derive(Serialize)]
struct AOutput<'a> {
    #[serde(flatten)]
    record: &'a dnsrec::ZoneRecordLine,
    mx_preference: u16,
}

pub fn execute(ctx: &Context, args: AArgs) -> Result<()> {
    let request = ARecordConfig {
        value: args.value,
        host_name: args.host,
        mx_preference: args.mx_preference,
    };

    let mut engine = ctx.engine(&args.domain)?;
    let line = engine.a(request)?;

    if ctx.explain {
        Explain::a(&line.name, &line.value).print();
    }

    let output = AOutput {
        record: &line,
        mx_preference: engine.mx_preference(),
    };
    print_records(ctx.output_format, &[&line], &output)
}
