//! Observability for the schema/codec core
//!
//! Structured JSON logging for construction-time and delivery events.
//!
//! ```ignore
//! use mgmt_schema::observability::Logger;
//!
//! Logger::info("SCHEMA_REGISTERED", &[("identifier", "demo:point")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
