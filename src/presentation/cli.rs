//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --catalog, --config) are inherited by all subcommands
//! - Every command is read-only: the CLI inspects model specifications, it never runs them

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// simspec - model specification loader and configuration resolver
#[derive(Parser, Debug)]
#[command(name = "simspec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Component catalog (overrides settings and SIMSPEC_CATALOG)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Settings file (default: .simspec/config.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Configuration overrides shared by commands that resolve configuration
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Override file merged on top of the model specification (repeatable, applied in order)
    #[arg(short = 'o', long = "override", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Single override as KEY=VALUE, e.g. population.population_size=10_000 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,
}

impl OverrideArgs {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.sets.is_empty()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a model specification, instantiate its components and resolve configuration
    Check {
        /// Model specification file
        spec: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Print the resolved configuration
    Resolve {
        /// Model specification file
        spec: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Show the layer and origin that set each value
        #[arg(long)]
        sources: bool,
    },

    /// List component references in declaration order
    Components {
        /// Model specification file
        spec: PathBuf,
    },

    /// Expand a branches file into per-run overrides
    Branches {
        /// Branches file (input_draw_count, random_seed_count, branches)
        file: PathBuf,

        /// Also resolve every run against this model specification
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
    },

    /// Show what overrides change in the resolved configuration
    Diff {
        /// Model specification file
        spec: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}
