//! Construction-time fault types
//!
//! Error codes:
//! - MGMT_DUPLICATE_FIELD
//! - MGMT_DUPLICATE_SCHEMA
//! - MGMT_IDENTIFIER_MISSING
//! - MGMT_INVALID_IDENTIFIER
//! - MGMT_INVALID_ENUM
//! - MGMT_INCOMPLETE_SCHEMA
//! - MGMT_DUPLICATE_METHOD
//! - MGMT_INITIALIZER_FAILED
//!
//! Every construction fault is fatal for the declaration that raised it and is
//! never retried.

use std::fmt;

/// Construction fault codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorCode {
    /// Two fields with the same name in one record builder
    DuplicateField,
    /// A schema identifier was registered twice
    DuplicateSchema,
    /// An RPC declaration was finalized without an identifier
    IdentifierMissing,
    /// Identifier is empty or contains forbidden characters
    InvalidIdentifier,
    /// Enum has no values or its transformed names collide
    InvalidEnum,
    /// A partial schema pair reached a place that needs both halves
    IncompleteSchema,
    /// An RPC method or notification identifier was declared twice
    DuplicateMethod,
    /// An initializer unit failed
    InitializerFailed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::DuplicateField => "MGMT_DUPLICATE_FIELD",
            SchemaErrorCode::DuplicateSchema => "MGMT_DUPLICATE_SCHEMA",
            SchemaErrorCode::IdentifierMissing => "MGMT_IDENTIFIER_MISSING",
            SchemaErrorCode::InvalidIdentifier => "MGMT_INVALID_IDENTIFIER",
            SchemaErrorCode::InvalidEnum => "MGMT_INVALID_ENUM",
            SchemaErrorCode::IncompleteSchema => "MGMT_INCOMPLETE_SCHEMA",
            SchemaErrorCode::DuplicateMethod => "MGMT_DUPLICATE_METHOD",
            SchemaErrorCode::InitializerFailed => "MGMT_INITIALIZER_FAILED",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Construction fault with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Identifier of the schema or method being declared, if known
    identifier: Option<String>,
}

impl SchemaError {
    /// Create a duplicate field error
    pub fn duplicate_field(identifier: impl fmt::Display, field: &str) -> Self {
        Self {
            code: SchemaErrorCode::DuplicateField,
            message: format!("Field '{}' is declared more than once", field),
            identifier: Some(identifier.to_string()),
        }
    }

    /// Create a duplicate schema error
    pub fn duplicate_schema(identifier: impl fmt::Display) -> Self {
        let id = identifier.to_string();
        Self {
            code: SchemaErrorCode::DuplicateSchema,
            message: format!("Schema '{}' is already registered", id),
            identifier: Some(id),
        }
    }

    /// Create an identifier missing error
    pub fn identifier_missing(kind: &str, name: &str) -> Self {
        Self {
            code: SchemaErrorCode::IdentifierMissing,
            message: format!("Identifier is not set for {} '{}'", kind, name),
            identifier: None,
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        let id = identifier.into();
        Self {
            code: SchemaErrorCode::InvalidIdentifier,
            message: format!("Invalid identifier '{}': {}", id, reason.into()),
            identifier: Some(id),
        }
    }

    /// Create an invalid enum error
    pub fn invalid_enum(enum_name: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = enum_name.into();
        Self {
            code: SchemaErrorCode::InvalidEnum,
            message: format!("Enum '{}' cannot be described: {}", name, reason.into()),
            identifier: Some(name),
        }
    }

    /// Create an incomplete schema error
    pub fn incomplete_schema(name: impl Into<String>, missing: &str) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::IncompleteSchema,
            message: format!("Schema '{}' has no {}", name, missing),
            identifier: Some(name),
        }
    }

    /// Create a duplicate method error
    pub fn duplicate_method(identifier: impl fmt::Display) -> Self {
        let id = identifier.to_string();
        Self {
            code: SchemaErrorCode::DuplicateMethod,
            message: format!("Method '{}' is already declared", id),
            identifier: Some(id),
        }
    }

    /// Wrap the failure of an initializer unit
    pub fn initializer_failed(unit: &str, cause: &SchemaError) -> Self {
        Self {
            code: SchemaErrorCode::InitializerFailed,
            message: format!("Initializer '{}' failed: {}", unit, cause),
            identifier: cause.identifier.clone(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the identifier if applicable
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for construction-time operations
pub type SchemaResult<T> = Result<T, SchemaError>;
