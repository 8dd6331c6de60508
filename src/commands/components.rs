use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use simspec::presentation::json::{emit_complete, emit_start};
use simspec::presentation::output::{components_json, render_components};
use simspec::presentation::OverrideArgs;

use super::CommandContext;

/// Without a catalog only the parsed references are listed.
pub fn cmd_components(ctx: &CommandContext, spec: &Path) -> Result<()> {
    if ctx.json {
        emit_start("components")?;
    }

    let pipeline = ctx.pipeline(&OverrideArgs::default())?;
    let specification = pipeline
        .load(spec)
        .with_context(|| format!("{} failed to load", spec.display()))?;

    let names: Vec<String> = match pipeline.registry() {
        Some(registry) => registry
            .instantiate_all(specification.components())?
            .iter()
            .map(|c| c.name())
            .collect(),
        None => Vec::new(),
    };

    if ctx.json {
        emit_complete(
            "components",
            json!({ "components": components_json(specification.components(), &names) }),
        )?;
        return Ok(());
    }

    print!("{}", render_components(specification.components(), &names));
    Ok(())
}
