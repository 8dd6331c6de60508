//! Command implementations for the `simspec` binary.

mod branches;
mod check;
mod components;
mod diff;
mod resolve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use simspec::application::SpecPipeline;
use simspec::config::{Settings, Verbosity};
use simspec::parser::{load_configuration_file, parse_override};
use simspec::presentation::OverrideArgs;

pub use branches::cmd_branches;
pub use check::cmd_check;
pub use components::cmd_components;
pub use diff::cmd_diff;
pub use resolve::cmd_resolve;

/// Settings and global flags shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub settings: Settings,
    pub json: bool,
    pub verbose: u8,
}

impl CommandContext {
    /// Load settings; `--catalog` wins over settings and environment.
    pub fn load(config: Option<&Path>, catalog: Option<PathBuf>, json: bool, verbose: u8) -> Result<Self> {
        let project_root = std::env::current_dir().ok();
        let mut settings = Settings::load_or_default(config, project_root.as_deref())
            .context("failed to load settings")?;
        if catalog.is_some() {
            settings.catalog.path = catalog;
        }
        Ok(Self {
            settings,
            json,
            verbose,
        })
    }

    /// Text detail level: the larger of `-v` and the `[output] verbosity` setting.
    pub fn detail(&self) -> u8 {
        self.verbose.max(self.settings.output.verbosity.as_count())
    }

    pub fn quiet(&self) -> bool {
        self.verbose == 0 && self.settings.output.verbosity == Verbosity::Quiet
    }

    /// Pipeline from settings plus the command's override files and `--set` values.
    ///
    /// Files apply first, in order, then `--set` values in order.
    pub fn pipeline(&self, overrides: &OverrideArgs) -> Result<SpecPipeline> {
        let mut pipeline = SpecPipeline::from_settings(&self.settings).context("failed to prepare pipeline")?;

        for file in &overrides.files {
            let tree = load_configuration_file(file)
                .with_context(|| format!("failed to load override file {}", file.display()))?;
            pipeline = pipeline.with_override(file.display().to_string(), tree);
        }
        for text in &overrides.sets {
            let tree = parse_override(text)?;
            pipeline = pipeline.with_override(format!("--set {}", text), tree);
        }

        Ok(pipeline)
    }
}
