//! Component reference parser
//!
//! Tokenizes `Name("arg1", 2, True)` text into an identifier path and a list
//! of literals. This is a string grammar only: nothing is evaluated.
//!
//! ```text
//! reference := ident ("." ident)* "(" [literal ("," literal)*] ")"
//! literal   := '"' chars '"' | "'" chars "'" | bare
//! ```

use crate::domain::entities::{join_path, ComponentReference};
use crate::domain::value_objects::Literal;
use crate::error::ParseError;

/// Parse one reference declared under `namespace`.
///
/// Identifier segments before the final one extend the namespace, so
/// `population.BasePopulation()` under `vivarium_public_health` resolves to
/// namespace `vivarium_public_health.population`.
pub fn parse_component_reference(text: &str, namespace: &str) -> Result<ComponentReference, ParseError> {
    let mut cursor = Cursor::new(text);

    cursor.skip_whitespace();
    let mut path = cursor.identifier_path()?;
    cursor.skip_whitespace();

    match cursor.bump() {
        Some('(') => {}
        Some(c) => return Err(cursor.error_before(format!("expected '(' but found '{}'", c))),
        None => return Err(cursor.error("expected '(' after component name")),
    }

    let args = cursor.arguments()?;

    cursor.skip_whitespace();
    if let Some(c) = cursor.peek() {
        return Err(cursor.error(format!("unexpected '{}' after closing ')'", c)));
    }

    // identifier_path never returns an empty path
    let name = path.pop().unwrap_or_default();
    let mut full_namespace = namespace.to_string();
    for segment in path {
        full_namespace = join_path(&full_namespace, &segment);
    }

    Ok(ComponentReference::new(full_namespace, name, args))
}

struct Cursor<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map(char::is_whitespace).unwrap_or(false) {
            self.pos += 1;
        }
    }

    /// Error pointing at the current position (1-indexed column).
    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    /// Error pointing at the character just consumed.
    fn error_before(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos.saturating_sub(1), message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ParseError {
        ParseError::InvalidReference {
            reference: self.text.trim().to_string(),
            column: pos + 1,
            message: message.into(),
        }
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            Some(c) => return Err(self.error(format!("expected a component name, found '{}'", c))),
            None => return Err(self.error("expected a component name")),
        }
        while self
            .peek()
            .map(|c| c == '_' || c.is_ascii_alphanumeric())
            .unwrap_or(false)
        {
            self.pos += 1;
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn identifier_path(&mut self) -> Result<Vec<String>, ParseError> {
        let mut segments = vec![self.identifier()?];
        while self.peek() == Some('.') {
            self.pos += 1;
            segments.push(self.identifier()?);
        }
        Ok(segments)
    }

    /// Parse arguments after the opening `(` up to and including `)`.
    fn arguments(&mut self) -> Result<Vec<Literal>, ParseError> {
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.pos += 1;
            return Ok(args);
        }

        loop {
            self.skip_whitespace();
            let literal = match self.peek() {
                Some('"') | Some('\'') => self.quoted()?,
                Some(',') | Some(')') => return Err(self.error("empty argument")),
                Some('(') => return Err(self.error("nested parentheses are not supported")),
                Some(_) => self.bare()?,
                None => return Err(self.error("missing closing ')'")),
            };
            args.push(literal);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(')') => return Ok(args),
                Some(c) => {
                    return Err(self.error_before(format!("expected ',' or ')' but found '{}'", c)))
                }
                None => return Err(self.error("missing closing ')'")),
            }
        }
    }

    fn quoted(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        let quote = self.bump().unwrap_or('"');
        let mut value = String::new();

        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) if c == quote || c == '\\' => value.push(c),
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                    }
                    None => break,
                },
                Some(c) if c == quote => return Ok(Literal::Str(value)),
                Some(c) => value.push(c),
                None => break,
            }
        }

        Err(self.error_at(start, "unterminated string literal"))
    }

    fn bare(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | ')') {
                break;
            }
            if c == '(' {
                return Err(self.error("nested parentheses are not supported"));
            }
            if c == '"' || c == '\'' {
                return Err(self.error("unexpected quote inside unquoted argument"));
            }
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Ok(Literal::from_bare(&text))
    }
}
