//! Enum schemas
//!
//! Enum values travel as strings produced by an [`EnumTransformer`]. The
//! schema lists every allowed string; decoding also accepts the value's
//! position in the value list.

mod case;
mod codec;
mod transformer;

pub use case::tokenize;
pub use codec::SchemaEnum;
pub use transformer::EnumTransformer;
