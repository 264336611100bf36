//! `dnsrec zone` - several record kinds as one zone file fragment.

use anyhow::Result;
use dnsrec::{ARecordConfig, DkimConfig, SpfConfig};
use serde::Serialize;

use super::{dkim::keep_private_key, Context};
use crate::cli::args::ZoneArgs;
use crate::education::Explain;
use crate::output::{print_records, OutputFormat};

#[derive(Serialize)]
struct ZoneOutput<'a> {
    domain: &'a str,
    ttl: u32,
    records: Vec<&'a dnsrec::ZoneRecordLine>,
}

pub fn execute(ctx: &Context, args: ZoneArgs) -> Result<()> {
    if args.address.is_none() && args.spf.is_none() && !args.dkim {
        anyhow::bail!(
            "Nothing to generate.\n\n\
             Ask for at least one record kind:\n  \
             --address <IP>       A record\n  \
             --spf <MECHANISMS>   SPF record\n  \
             --dkim               DKIM records"
        );
    }

    let mut engine = ctx.engine(&args.domain)?;

    if args.dkim {
        let mut request = DkimConfig::new().strict(args.strict);
        request.selector = args.selector;
        engine.dkim(request)?;
    }

    if let Some(mechanisms) = &args.spf {
        let mut request = SpfConfig::new(mechanisms, &args.qualifier);
        request.ip_list = args.ips;
        engine.spf(request)?;
    }

    if let Some(address) = args.address {
        engine.a(ARecordConfig::new(address))?;
    }

    if ctx.explain {
        Explain::zone(engine.ttl()).print();
    }

    match ctx.output_format {
        OutputFormat::Zone => print!("{}", engine.zone_snippet()),
        format => {
            let output = ZoneOutput {
                domain: engine.domain().as_str(),
                ttl: engine.ttl(),
                records: engine.records(),
            };
            print_records(format, &output.records, &output)?;
        }
    }

    if args.dkim {
        keep_private_key(engine.dkim_key_pair(), args.private_key_out.as_deref())?;
    }

    Ok(())
}
