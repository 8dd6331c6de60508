//! Configuration warning value object.

use std::fmt;

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Raised when an override names a key that no lower configuration layer
/// declares, which is usually a typo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key
    pub path: String,
    /// Where the key came from (file name or layer label)
    pub origin: String,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown configuration key '{}' in {}",
            self.path, self.origin
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}
