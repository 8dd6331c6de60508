use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use simspec::domain::services::{expand_branches, expand_templates};
use simspec::parser::load_branches_file;
use simspec::presentation::json::{emit_complete, emit_start};
use simspec::presentation::output::{render_runs, resolved_json};
use simspec::presentation::OverrideArgs;

use super::CommandContext;

pub fn cmd_branches(ctx: &CommandContext, file: &Path, spec: Option<&Path>) -> Result<()> {
    if ctx.json {
        emit_start("branches")?;
    }

    let set = load_branches_file(file).with_context(|| format!("{} failed to load", file.display()))?;
    let branches = expand_templates(&set)?;
    let runs = expand_branches(&set)?;

    let resolved = match spec {
        Some(spec) => {
            let pipeline = ctx.pipeline(&OverrideArgs::default())?;
            let specification = pipeline
                .load(spec)
                .with_context(|| format!("{} failed to load", spec.display()))?;
            Some(pipeline.resolve_branches(&specification, &spec.display().to_string(), &set)?)
        }
        None => None,
    };

    if ctx.json {
        let resolved_values = resolved
            .as_ref()
            .map(|all| all.iter().map(resolved_json).collect::<serde_json::Result<Vec<_>>>())
            .transpose()?;
        let runs_value = serde_json::to_value(&runs)?;
        emit_complete(
            "branches",
            json!({
                "branches": branches.len(),
                "input_draw_count": set.input_draw_count(),
                "random_seed_count": set.random_seed_count(),
                "runs": runs_value,
                "resolved": resolved_values,
            }),
        )?;
        return Ok(());
    }

    println!(
        "{} branch(es) x {} draw(s) x {} seed(s) = {} run(s)",
        branches.len(),
        set.input_draw_count(),
        set.random_seed_count(),
        runs.len()
    );
    print!("{}", render_runs(&runs));

    if let (Some(resolved), Some(spec)) = (resolved, spec) {
        let warnings: usize = resolved.iter().map(|r| r.warnings.len()).sum();
        println!(
            "resolved {} run(s) against {}, {} warning(s)",
            resolved.len(),
            spec.display(),
            warnings
        );
    }
    Ok(())
}
