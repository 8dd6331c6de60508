//! Component reference entity
//!
//! A parsed `Name("arg", 2)` declaration together with the namespace it was
//! declared under in the model specification.

use std::fmt;

use crate::domain::value_objects::Literal;

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentReference {
    namespace: String,
    name: String,
    args: Vec<Literal>,
}

impl ComponentReference {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, args: Vec<Literal>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            args,
        }
    }

    /// Dotted namespace path, e.g. `vivarium_public_health.population`.
    /// Empty for references declared without a namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Literal] {
        &self.args
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// The declared namespace followed by each of its ancestors,
    /// most specific first.
    pub fn namespace_ancestors(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut current = self.namespace.as_str();
        while !current.is_empty() {
            out.push(current);
            current = match current.rfind('.') {
                Some(idx) => &current[..idx],
                None => "",
            };
        }
        out
    }
}

impl fmt::Display for ComponentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(Literal::to_string).collect();
        write!(f, "{}({})", self.qualified_name(), args.join(", "))
    }
}
