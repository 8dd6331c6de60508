//! Component constructor arguments

use std::fmt;

use super::scalar::write_float;

/// A literal argument in a component reference such as `DiseaseObserver("anemia")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    /// Interpret an unquoted argument.
    ///
    /// Only text that starts like a number is tried as a number, and only
    /// finite values become floats, so `nan`, `+inf` or `1e400` stay strings.
    pub fn from_bare(text: &str) -> Self {
        match text {
            "True" | "true" => return Literal::Bool(true),
            "False" | "false" => return Literal::Bool(false),
            _ => {}
        }

        let numeric_start = text
            .chars()
            .next()
            .map(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
            .unwrap_or(false);

        if numeric_start {
            let cleaned = text.replace('_', "");
            if let Ok(value) = cleaned.parse::<i64>() {
                return Literal::Int(value);
            }
            if let Ok(value) = cleaned.parse::<f64>() {
                if value.is_finite() {
                    return Literal::Float(value);
                }
            }
        }

        Literal::Str(text.to_string())
    }

    /// Text used when a literal becomes part of a component name.
    pub fn as_name_part(&self) -> String {
        match self {
            Literal::Str(value) => value.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => write_float(f, *value),
            Literal::Bool(value) => write!(f, "{}", value),
        }
    }
}
