//! Output Rendering
//!
//! Text and JSON renderings of pipeline results. Renderers return strings;
//! commands decide where they go.

use serde_json::{json, Value};

use crate::application::{ConfigDiff, PreparedRun};
use crate::domain::entities::{ComponentReference, ConfigurationTree};
use crate::domain::services::ResolvedConfiguration;
use crate::domain::value_objects::ConfigWarning;
use crate::error::SimSpecResult;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Resolved configuration as block YAML.
pub fn render_yaml(tree: &ConfigurationTree) -> SimSpecResult<String> {
    Ok(serde_yaml_ng::to_string(tree)?)
}

/// One line per leaf: `path: value  # layer (origin)`, aligned on the comment.
pub fn render_sources(resolved: &ResolvedConfiguration) -> String {
    let rows: Vec<(String, String)> = resolved
        .tree
        .leaves()
        .into_iter()
        .map(|(path, value)| {
            let source = resolved
                .source_of(&path)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            (format!("{}: {}", path, value.to_inline_string()), source)
        })
        .collect();

    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (left, source) in rows {
        out.push_str(&format!("{:<width$}  # {}\n", left, source, width = width));
    }
    out
}

/// Numbered component list; resolved names are shown when components were instantiated.
pub fn render_components(references: &[ComponentReference], names: &[String]) -> String {
    let mut out = String::new();
    for (i, reference) in references.iter().enumerate() {
        match names.get(i) {
            Some(name) => out.push_str(&format!("{:>3}. {} -> {}\n", i + 1, reference, name)),
            None => out.push_str(&format!("{:>3}. {}\n", i + 1, reference)),
        }
    }
    out
}

/// One line per run with its override leaves.
pub fn render_runs(runs: &[ConfigurationTree]) -> String {
    let mut out = String::new();
    for (i, run) in runs.iter().enumerate() {
        let leaves: Vec<String> = run
            .leaves()
            .into_iter()
            .map(|(path, value)| format!("{}={}", path, value.to_inline_string()))
            .collect();
        out.push_str(&format!("run {}: {}\n", i, leaves.join(", ")));
    }
    out
}

pub fn render_warning(warning: &ConfigWarning) -> String {
    format!("warning: {}", warning)
}

/// One-paragraph summary for `check`.
pub fn render_check_summary(origin: &str, run: &PreparedRun) -> String {
    let mut out = format!("OK {}\n", origin);
    out.push_str(&format!(
        "  {} component reference(s), {} instantiated\n",
        run.specification.components().len(),
        run.components.len()
    ));
    out.push_str(&format!(
        "  {} configuration value(s), {} override(s)\n",
        run.configuration.sources.len(),
        run.configuration.overrides.len()
    ));
    if !run.configuration.warnings.is_empty() {
        out.push_str(&format!("  {} warning(s)\n", run.configuration.warnings.len()));
    }
    out
}

pub fn resolved_json(resolved: &ResolvedConfiguration) -> serde_json::Result<Value> {
    let sources: serde_json::Map<String, Value> = resolved
        .sources
        .iter()
        .map(|(path, source)| {
            (
                path.clone(),
                json!({ "layer": source.layer, "origin": source.origin }),
            )
        })
        .collect();

    Ok(json!({
        "configuration": serde_json::to_value(&resolved.tree)?,
        "sources": sources,
        "overrides": resolved.overrides.iter().map(|o| json!({
            "path": o.path,
            "from": o.from.to_string(),
            "by": o.by.to_string(),
        })).collect::<Vec<_>>(),
        "warnings": warnings_json(&resolved.warnings),
    }))
}

pub fn warnings_json(warnings: &[ConfigWarning]) -> Vec<Value> {
    warnings
        .iter()
        .map(|w| {
            json!({
                "path": w.path,
                "origin": w.origin,
                "suggestion": w.suggestion,
            })
        })
        .collect()
}

pub fn components_json(references: &[ComponentReference], names: &[String]) -> Vec<Value> {
    references
        .iter()
        .enumerate()
        .map(|(i, reference)| {
            json!({
                "namespace": reference.namespace(),
                "reference": reference.to_string(),
                "args": reference.args().iter().map(|a| a.to_string()).collect::<Vec<_>>(),
                "name": names.get(i),
            })
        })
        .collect()
}

pub fn diff_json(diff: &ConfigDiff) -> Value {
    json!({
        "has_changes": diff.has_changes(),
        "additions": diff.additions,
        "deletions": diff.deletions,
        "changed_paths": diff.changed_paths,
        "unified": diff.unified,
    })
}
