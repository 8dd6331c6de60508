//! simspec CLI - model specification loader and configuration resolver
//!
//! Usage: simspec <COMMAND>
//!
//! Commands:
//!   check       Load, instantiate and resolve a model specification
//!   resolve     Print the resolved configuration
//!   components  List component references
//!   branches    Expand a branches file
//!   diff        Show what overrides change

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;

use simspec::presentation::{Cli, Commands};

use crate::commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    let ctx = CommandContext::load(cli.config.as_deref(), cli.catalog.clone(), cli.json, cli.verbose)?;

    let (name, result) = match &cli.command {
        Commands::Check { spec, overrides } => ("check", commands::cmd_check(&ctx, spec, overrides)),
        Commands::Resolve {
            spec,
            overrides,
            sources,
        } => ("resolve", commands::cmd_resolve(&ctx, spec, overrides, *sources)),
        Commands::Components { spec } => ("components", commands::cmd_components(&ctx, spec)),
        Commands::Branches { file, spec } => {
            ("branches", commands::cmd_branches(&ctx, file, spec.as_deref()))
        }
        Commands::Diff { spec, overrides } => ("diff", commands::cmd_diff(&ctx, spec, overrides)),
    };

    if let Err(e) = &result {
        if cli.json {
            simspec::presentation::json::emit_error(name, &format!("{:#}", e))?;
        }
    }
    result
}

/// Log to stderr. `RUST_LOG` wins; otherwise the level follows `-v`.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
