use std::path::Path;

use anyhow::{Context, Result};

use simspec::presentation::json::{emit_complete, emit_start};
use simspec::presentation::output::{render_sources, render_yaml, resolved_json};
use simspec::presentation::OverrideArgs;

use super::CommandContext;

pub fn cmd_resolve(ctx: &CommandContext, spec: &Path, overrides: &OverrideArgs, sources: bool) -> Result<()> {
    if ctx.json {
        emit_start("resolve")?;
    }

    let run = ctx
        .pipeline(overrides)?
        .prepare_file(spec)
        .with_context(|| format!("{} failed to load", spec.display()))?;

    if ctx.json {
        emit_complete("resolve", resolved_json(&run.configuration)?)?;
        return Ok(());
    }

    if sources {
        print!("{}", render_sources(&run.configuration));
    } else {
        print!("{}", render_yaml(&run.configuration.tree)?);
    }
    Ok(())
}
