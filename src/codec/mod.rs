//! Value codecs
//!
//! A codec converts between a host value and its JSON wire form.
//!
//! # Design Principles
//!
//! - Encode is total
//! - Decode is fallible and reports the failing path
//! - Codecs are stateless and shareable across threads after init

mod errors;
mod lazy;
mod primitive;
mod wrappers;

use std::sync::Arc;

use serde_json::Value;

pub use errors::{DecodeError, DecodeResult};
pub use lazy::LazyCodec;
pub use primitive::{BoolCodec, IntegerCodec, StringCodec};
pub use wrappers::{BoxCodec, ListCodec, OptionCodec};

/// Bidirectional transform between `T` and a JSON value
pub trait Codec<T>: Send + Sync {
    /// Encodes a value. Never fails.
    fn encode(&self, value: &T) -> Value;

    /// Decodes a wire value
    fn decode(&self, value: &Value) -> DecodeResult<T>;
}

/// Shared, type-erased codec handle
pub type SharedCodec<T> = Arc<dyn Codec<T>>;
