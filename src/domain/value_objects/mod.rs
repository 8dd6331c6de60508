//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod literal;
mod scalar;

pub use config_warning::ConfigWarning;
pub use literal::Literal;
pub use scalar::Scalar;
