//! `dnsrec config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Path => show_path(ctx),
        ConfigCommands::Init { force } => init_config(ctx, force),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Zone => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        OutputFormat::Pretty => {
            let engine = &config.engine;
            let keys = &engine.keys;

            println!("{}", "Current Configuration:".bold());
            println!("  {} {}", "file:".bold(), ctx.config_path.display().to_string().dimmed());
            println!();

            println!("  {} {}", "output_format:".bold(),
                config.output_format.unwrap_or_default());
            println!("  {} {}", "ttl:".bold(), engine.ttl);
            println!("  {} {}", "mx_preference:".bold(), engine.mx_preference);
            println!("  {} {}", "default_selector:".bold(), engine.default_selector.cyan());
            println!("  {} {}", "host_name:".bold(),
                engine.host_name.as_deref().map_or_else(|| "(derived)".dimmed().to_string(), ToString::to_string));
            println!();

            println!("{}", "Key generation:".bold());
            println!("  {} {}", "program:".bold(), keys.program.display());
            println!("  {} {}", "bits:".bold(), keys.bits);
            println!("  {} {}s", "timeout:".bold(), keys.timeout_secs);
            println!("  {} {}", "scratch_root:".bold(),
                keys.scratch_root.as_ref().map_or_else(
                    || "(system temp)".dimmed().to_string(),
                    |p| p.display().to_string(),
                ));
        }
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}

fn init_config(ctx: &Context, force: bool) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\n\
             Use --force to overwrite it.",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("{} wrote {}", "Success:".green().bold(), path.display());
    Ok(())
}
