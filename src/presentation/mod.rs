//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - clap definitions for the `simspec` binary
//! - `output` - Text and JSON renderings of pipeline results
//! - `json` - NDJSON event helpers for `--json`

pub mod cli;
pub mod json;
pub mod output;

pub use cli::{Cli, Commands, OverrideArgs};
pub use output::OutputFormat;
