//! Runtime decode errors
//!
//! Decode errors are recoverable and reported per request. Nested failures
//! carry the path from the outermost field to the failing value, e.g.
//! `message.player.name` or `tags[2]`.

use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Field(String),
    Index(usize),
}

/// Decode failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Path from the outermost value, outermost segment first
    path: Vec<PathSegment>,
    /// Expected type or condition
    expected: String,
    /// Actual value or type found
    actual: String,
}

impl DecodeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            path: vec![PathSegment::Field(field.into())],
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: &Value) -> Self {
        Self::new(expected, json_type_name(actual))
    }

    pub fn unknown_variant(enum_name: &str, actual: &Value) -> Self {
        Self::new(format!("a value of enum '{}'", enum_name), actual.to_string())
    }

    pub fn unresolved(codec_name: &str) -> Self {
        Self::new(
            format!("resolved recursive codec '{}'", codec_name),
            "placeholder used during construction",
        )
    }

    /// Prefixes the path with an enclosing field name
    pub fn within(mut self, field: impl Into<String>) -> Self {
        self.path.insert(0, PathSegment::Field(field.into()));
        self
    }

    /// Prefixes the path with an enclosing list index
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// Rendered path, `$root` when the failure is at the top level
    pub fn path(&self) -> String {
        if self.path.is_empty() {
            return "$root".to_string();
        }

        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(index) => {
                    out.push_str(&format!("[{}]", index));
                }
            }
        }
        out
    }

    /// Innermost field name on the path, if any
    pub fn field(&self) -> Option<&str> {
        self.path.iter().rev().find_map(|segment| match segment {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.path(), self.expected, self.actual)
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Wire type name for error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
