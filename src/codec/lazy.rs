//! Write-once codec indirection for self-referential types
//!
//! A [`LazyCodec`] is handed out before the codec it stands for exists. The
//! real codec is stored into the shared cell exactly once, after construction
//! of the enclosing record finishes; every handle then reads through the cell.
//! Actual encode/decode recursion is bounded by the (finite) data.
//!
//! The resolved codec usually holds one of the handles, so the knot is a
//! reference cycle that lives for the rest of the process.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::errors::{DecodeError, DecodeResult};
use super::{Codec, SharedCodec};
use crate::observability::Logger;

/// Codec handle backed by a single-assignment cell
pub struct LazyCodec<T> {
    name: String,
    cell: Arc<OnceLock<SharedCodec<T>>>,
}

impl<T> Clone for LazyCodec<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: 'static> LazyCodec<T> {
    /// Creates an unresolved handle
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Returns a shared codec reading through the same cell
    pub fn handle(&self) -> SharedCodec<T> {
        Arc::new(self.clone())
    }

    /// Fills the cell. Returns false if it was already filled.
    pub fn resolve(&self, codec: SharedCodec<T>) -> bool {
        self.cell.set(codec).is_ok()
    }

    /// Returns whether the cell has been filled
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Codec<T> for LazyCodec<T> {
    fn encode(&self, value: &T) -> Value {
        match self.cell.get() {
            Some(codec) => codec.encode(value),
            None => {
                Logger::error("RECURSIVE_CODEC_UNRESOLVED", &[("codec", &self.name)]);
                Value::Null
            }
        }
    }

    fn decode(&self, value: &Value) -> DecodeResult<T> {
        match self.cell.get() {
            Some(codec) => codec.decode(value),
            None => Err(DecodeError::unresolved(&self.name)),
        }
    }
}
