//! Branch expansion
//!
//! Turns a `BranchSet` into one override tree per run. List-valued leaves in
//! a branch template expand by cartesian product, then every branch is
//! crossed with input draws `0..input_draw_count` and random seeds
//! `0..random_seed_count`.

use tracing::debug;

use crate::domain::entities::{
    BranchSet, ConfigValue, ConfigurationTree, INPUT_DRAW_PATH, RANDOM_SEED_PATH,
};
use crate::error::ConfigurationError;

/// Upper bound on runs a single branch set may expand to.
pub const MAX_RUNS: usize = 100_000;

fn checked_run_count(factors: &[usize]) -> Result<usize, ConfigurationError> {
    factors
        .iter()
        .try_fold(1_usize, |total, factor| total.checked_mul(*factor))
        .filter(|total| *total <= MAX_RUNS)
        .ok_or_else(|| ConfigurationError::InvalidBranches {
            message: format!("branch set expands to more than {} runs", MAX_RUNS),
        })
}

/// Expand each template into concrete branches (no draws or seeds yet).
pub fn expand_templates(set: &BranchSet) -> Result<Vec<ConfigurationTree>, ConfigurationError> {
    let mut branches: Vec<ConfigurationTree> = Vec::new();

    if set.templates().is_empty() {
        branches.push(ConfigurationTree::new());
    }

    for template in set.templates() {
        for branch in expand_template(template)? {
            if branches.contains(&branch) {
                return Err(ConfigurationError::InvalidBranches {
                    message: format!("duplicate branch {}", describe(&branch)),
                });
            }
            branches.push(branch);
        }
    }

    Ok(branches)
}

/// Expand the full batch: branches × draws × seeds.
pub fn expand_branches(set: &BranchSet) -> Result<Vec<ConfigurationTree>, ConfigurationError> {
    let branches = expand_templates(set)?;
    let total = checked_run_count(&[
        branches.len(),
        set.input_draw_count() as usize,
        set.random_seed_count() as usize,
    ])?;
    let mut runs = Vec::with_capacity(total);

    for branch in &branches {
        for reserved in [INPUT_DRAW_PATH, RANDOM_SEED_PATH] {
            if branch.get(reserved).is_some() {
                return Err(ConfigurationError::InvalidBranches {
                    message: format!(
                        "branch sets '{}' directly; use input_draw_count / random_seed_count",
                        reserved
                    ),
                });
            }
        }

        for draw in 0..set.input_draw_count() {
            for seed in 0..set.random_seed_count() {
                let mut run = branch.clone();
                run.set_path(INPUT_DRAW_PATH, i64::from(draw))?;
                run.set_path(RANDOM_SEED_PATH, i64::from(seed))?;
                runs.push(run);
            }
        }
    }

    debug!(
        branches = branches.len(),
        runs = runs.len(),
        "expanded branch set"
    );
    Ok(runs)
}

fn expand_template(template: &ConfigurationTree) -> Result<Vec<ConfigurationTree>, ConfigurationError> {
    let mut expanded = vec![ConfigurationTree::new()];

    for (path, value) in template.leaves() {
        let options: Vec<ConfigValue> = match value {
            ConfigValue::List(items) if items.is_empty() => {
                return Err(ConfigurationError::InvalidBranches {
                    message: format!("'{}' has an empty list of values", path),
                });
            }
            ConfigValue::List(items) => items.clone(),
            other => vec![other.clone()],
        };

        let mut next = Vec::with_capacity(checked_run_count(&[expanded.len(), options.len()])?);
        for partial in &expanded {
            for option in &options {
                let mut tree = partial.clone();
                tree.set_path(&path, option.clone())?;
                next.push(tree);
            }
        }
        expanded = next;
    }

    Ok(expanded)
}

fn describe(branch: &ConfigurationTree) -> String {
    let parts: Vec<String> = branch
        .leaves()
        .into_iter()
        .map(|(path, value)| format!("{}={}", path, value.to_inline_string()))
        .collect();
    format!("{{{}}}", parts.join(", "))
}
