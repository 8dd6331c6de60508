//! Settings loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::services::suggest_key;
use crate::error::{SimSpecError, SimSpecResult};

use super::types::{Settings, Verbosity};

pub const PROJECT_SETTINGS_PATH: &str = ".simspec/config.toml";
pub const USER_SETTINGS_PATH: &str = "simspec/config.toml";

const KNOWN_KEYS: &[&str] = &["namespaces", "known", "catalog", "base", "path", "output", "verbosity"];

/// Non-fatal settings warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for SettingsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown settings key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SimSpecResult<(Settings, Vec<SettingsWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SimSpecError::InvalidSettings {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            SettingsWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key, KNOWN_KEYS.iter().copied()),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Load from an explicit path, project settings, user settings, or defaults.
///
/// An explicit path must exist and parse. Discovered files that fail to
/// parse are reported and skipped.
pub fn load_or_default(explicit: Option<&Path>, project_root: Option<&Path>) -> SimSpecResult<Settings> {
    if let Some(path) = explicit {
        let settings = load_reporting(path)?;
        return Ok(with_env_overrides(settings));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(root) = project_root {
        candidates.push(root.join(PROJECT_SETTINGS_PATH));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(USER_SETTINGS_PATH));
    }

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match load_reporting(&candidate) {
            Ok(settings) => return Ok(with_env_overrides(settings)),
            Err(e) => warn!("ignoring settings file: {}", e),
        }
    }

    debug!("no settings file found, using defaults");
    Ok(with_env_overrides(Settings::default()))
}

fn load_reporting(path: &Path) -> SimSpecResult<Settings> {
    let (settings, warnings) = load_with_warnings(path)?;
    for warning in &warnings {
        warn!("{}", warning);
    }
    debug!(file = %path.display(), "loaded settings");
    Ok(settings)
}

/// Apply environment variable overrides (SIMSPEC_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    with_overrides_from(settings, |name| std::env::var(name).ok())
}

/// Apply overrides from any variable source.
pub fn with_overrides_from<F>(mut settings: Settings, lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    // SIMSPEC_CATALOG
    if let Some(path) = lookup("SIMSPEC_CATALOG").filter(|p| !p.trim().is_empty()) {
        settings.catalog.path = Some(PathBuf::from(path));
    }

    // SIMSPEC_NAMESPACES (comma-separated)
    if let Some(namespaces) = lookup("SIMSPEC_NAMESPACES") {
        let parsed: Vec<String> = namespaces
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            settings.namespaces.known = parsed;
        }
    }

    // SIMSPEC_VERBOSITY
    if let Some(verbosity) = lookup("SIMSPEC_VERBOSITY") {
        settings.output.verbosity = Verbosity::from_name(&verbosity);
    }

    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}
