//! Two-part `namespace:path` identifiers
//!
//! - namespace: `[a-z0-9_.-]+`
//! - path: `[a-z0-9_.-/]+`

use std::fmt;
use std::str::FromStr;

use super::errors::{SchemaError, SchemaResult};

/// Namespaced identifier for schemas, methods and notifications
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Creates an identifier, validating both parts.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> SchemaResult<Self> {
        let namespace = namespace.into();
        let path = path.into();

        if namespace.is_empty() {
            return Err(SchemaError::invalid_identifier(
                format!("{}:{}", namespace, path),
                "namespace is empty",
            ));
        }
        if path.is_empty() {
            return Err(SchemaError::invalid_identifier(
                format!("{}:{}", namespace, path),
                "path is empty",
            ));
        }
        if let Some(c) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(SchemaError::invalid_identifier(
                format!("{}:{}", namespace, path),
                format!("character '{}' is not allowed in a namespace", c),
            ));
        }
        if let Some(c) = path.chars().find(|c| !is_path_char(*c)) {
            return Err(SchemaError::invalid_identifier(
                format!("{}:{}", namespace, path),
                format!("character '{}' is not allowed in a path", c),
            ));
        }

        Ok(Self { namespace, path })
    }

    /// Parses `namespace:path`.
    pub fn parse(value: &str) -> SchemaResult<Self> {
        let (namespace, path) = value
            .split_once(':')
            .ok_or_else(|| SchemaError::invalid_identifier(value, "expected 'namespace:path'"))?;
        Self::new(namespace, path)
    }

    /// Returns the namespace part
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path part
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
