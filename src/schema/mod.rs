//! Schema descriptors and the schema registry
//!
//! Schema nodes describe the wire shape of a type for documentation and
//! discovery. They never execute logic.
//!
//! # Design Principles
//!
//! - Registry is append-only
//! - Identifiers are registered at most once
//! - Object properties keep declaration order

mod errors;
mod identifier;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use identifier::Identifier;
pub use registry::{SchemaEntry, SchemaRegistry};
pub use types::{SchemaNode, DEFAULT_SCHEMA_REF_PREFIX};
