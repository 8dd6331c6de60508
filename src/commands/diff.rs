use std::path::Path;

use anyhow::{bail, Context, Result};

use simspec::application::diff_resolved;
use simspec::presentation::json::{emit_complete, emit_start};
use simspec::presentation::output::diff_json;
use simspec::presentation::OverrideArgs;

use super::CommandContext;

pub fn cmd_diff(ctx: &CommandContext, spec: &Path, overrides: &OverrideArgs) -> Result<()> {
    if overrides.is_empty() {
        bail!("diff needs at least one --override FILE or --set KEY=VALUE");
    }
    if ctx.json {
        emit_start("diff")?;
    }

    let before = ctx
        .pipeline(&OverrideArgs::default())?
        .prepare_file(spec)
        .with_context(|| format!("{} failed to load", spec.display()))?;
    let after = ctx
        .pipeline(overrides)?
        .prepare_file(spec)
        .with_context(|| format!("{} failed to load with overrides", spec.display()))?;

    let label = spec
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| spec.display().to_string());
    let diff = diff_resolved(&before.configuration.tree, &after.configuration.tree, &label)?;

    if ctx.json {
        emit_complete("diff", diff_json(&diff))?;
        return Ok(());
    }

    if !diff.has_changes() {
        println!("No changes");
        return Ok(());
    }
    print!("{}", diff.unified);
    if !ctx.quiet() {
        println!();
        println!("{} value(s) changed ({})", diff.changed_paths.len(), diff.summary());
    }
    Ok(())
}
