//! Error types for simspec
//!
//! Uses `thiserror` for library errors. Each concern gets its own enum and
//! `SimSpecError` wraps them for callers that only care about "did it load".

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::services::InstantiationError;

/// Result type alias for simspec operations
pub type SimSpecResult<T> = Result<T, SimSpecError>;

/// Structural shape of a configuration value.
///
/// Overrides may swap one scalar kind for another, but never change shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Scalar,
    List,
    Mapping,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::Scalar => "a scalar",
            ValueShape::List => "a list",
            ValueShape::Mapping => "a mapping",
        };
        f.write_str(name)
    }
}

/// Malformed document structure or component-reference grammar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Document root (or a section) has the wrong shape
    #[error("{origin}: model specification must be a mapping at the top level, found {found}")]
    NotAMapping { origin: String, found: ValueShape },

    /// Top-level key other than `components` / `configuration`
    #[error("unknown section '{key}' (expected 'components' or 'configuration')")]
    UnknownSection { key: String },

    /// A section exists but has the wrong shape
    #[error("invalid section '{key}': {message}")]
    InvalidSection { key: String, message: String },

    /// Component namespace not in the known prefix set
    #[error("unknown component namespace '{key}' (known: {known})")]
    UnknownNamespace { key: String, known: String },

    /// Mapping key that is not a plain scalar
    #[error("invalid key at '{path}': {message}")]
    InvalidKey { path: String, message: String },

    /// Entry under `components` that is not a reference string
    #[error("invalid component entry at '{key}': {message}")]
    InvalidComponentEntry { key: String, message: String },

    /// Reference text that does not match `Name(literal, ...)`
    #[error("invalid component reference '{reference}' at column {column}: {message}")]
    InvalidReference {
        reference: String,
        column: usize,
        message: String,
    },

    /// `key.path=value` override text that cannot be split
    #[error("invalid override '{text}': {message}")]
    InvalidOverride { text: String, message: String },

    /// YAML syntax error, formatted with location
    #[error("invalid YAML in {origin}: {message}")]
    Yaml { origin: String, message: String },

    /// Component catalog entry with the wrong structure
    #[error("invalid catalog entry '{key}': {message}")]
    InvalidCatalogEntry { key: String, message: String },
}

/// Configuration that cannot be merged or expanded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Override changes the shape of a declared value
    #[error("cannot override '{path}': declared as {expected}, override is {found}")]
    TypeMismatch {
        path: String,
        expected: ValueShape,
        found: ValueShape,
    },

    /// Two components declare the same default leaf
    #[error("configuration key '{path}' is declared by both '{first}' and '{second}'")]
    DuplicateDefault {
        path: String,
        first: String,
        second: String,
    },

    /// Tree added to a layer the resolver does not have
    #[error("unknown configuration layer '{layer}'")]
    UnknownLayer { layer: String },

    /// Branches document is structurally valid YAML but semantically wrong
    #[error("invalid branches: {message}")]
    InvalidBranches { message: String },
}

/// Main error type for simspec operations
#[derive(Error, Debug)]
pub enum SimSpecError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    /// Invalid tool settings file
    #[error("invalid settings in {file}: {message}")]
    InvalidSettings { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
