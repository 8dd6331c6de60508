use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use simspec::presentation::json::{emit_complete, emit_start};
use simspec::presentation::output::{render_check_summary, render_components, warnings_json};
use simspec::presentation::OverrideArgs;

use super::CommandContext;

pub fn cmd_check(ctx: &CommandContext, spec: &Path, overrides: &OverrideArgs) -> Result<()> {
    if ctx.json {
        emit_start("check")?;
    }

    let pipeline = ctx.pipeline(overrides)?;
    let run = pipeline
        .prepare_file(spec)
        .with_context(|| format!("{} failed to load", spec.display()))?;

    if ctx.json {
        emit_complete(
            "check",
            json!({
                "spec": spec.display().to_string(),
                "components": run.specification.components().len(),
                "instantiated": run.component_names(),
                "values": run.configuration.sources.len(),
                "overrides": run.configuration.overrides.len(),
                "warnings": warnings_json(&run.configuration.warnings),
            }),
        )?;
        return Ok(());
    }

    if ctx.quiet() {
        return Ok(());
    }

    print!("{}", render_check_summary(&spec.display().to_string(), &run));
    if ctx.detail() > 0 {
        println!();
        print!(
            "{}",
            render_components(run.specification.components(), &run.component_names())
        );
    }
    Ok(())
}
