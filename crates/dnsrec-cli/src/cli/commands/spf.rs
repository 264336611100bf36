//! `dnsrec spf` - SPF sender policy record.

use anyhow::Result;
use dnsrec::builders::spf::parse_mechanisms;
use dnsrec::SpfConfig;

use super::Context;
use crate::cli::args::SpfArgs;
use crate::education::Explain;
use crate::output::print_records;

pub fn execute(ctx: &Context, args: &SpfArgs) -> Result<()> {
    let mut request = SpfConfig::new(&args.mechanisms, &args.qualifier);
    request.ip_list.clone_from(&args.ips);

    let mut engine = ctx.engine(&args.domain)?;
    let line = engine.spf(request)?;

    if ctx.explain {
        let mechanisms: Vec<_> = parse_mechanisms(&args.mechanisms)?.into_iter().collect();
        Explain::spf(&line.name, &mechanisms, &args.qualifier).print();
    }

    print_records(ctx.output_format, &[&line], &line)
}
