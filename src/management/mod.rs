//! Schema pairs and the record builder
//!
//! This module builds the codec and the schema of a record from one ordered
//! list of fields, so the two can never disagree about names or order.
//!
//! # Design Principles
//!
//! - One field list drives encode, decode and the schema
//! - Duplicate field names fail at declaration time
//! - Recursive records are closed with a write-once cell
//!
//! # Example
//!
//! ```ignore
//! let message = ManagementSchema::builder("chat", "message")?
//!     .property("id", &ManagementSchema::integer(), |m: &Message| &m.id)?
//!     .property("tags", &ManagementSchema::string().as_list(), |m: &Message| &m.tags)?
//!     .build(|(id, tags)| Message { id, tags })?;
//! ```

mod builder;
mod field;
mod fields;
mod pair;
mod record;
mod recursive;

pub use builder::RecordSchemaBuilder;
pub use field::{Field, FieldCodec, FieldInfo};
pub use fields::{Append, FieldList};
pub use pair::ManagementSchema;
