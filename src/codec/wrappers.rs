//! Codecs derived from another codec: list, optional and box

use serde_json::Value;

use super::errors::{DecodeError, DecodeResult};
use super::{Codec, SharedCodec};

/// `Vec<T>` <-> JSON array
pub struct ListCodec<T> {
    element: SharedCodec<T>,
}

impl<T> ListCodec<T> {
    pub fn new(element: SharedCodec<T>) -> Self {
        Self { element }
    }
}

impl<T> Codec<Vec<T>> for ListCodec<T> {
    fn encode(&self, value: &Vec<T>) -> Value {
        Value::Array(value.iter().map(|item| self.element.encode(item)).collect())
    }

    fn decode(&self, value: &Value) -> DecodeResult<Vec<T>> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::type_mismatch("array", value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.element.decode(item).map_err(|e| e.at_index(i)))
            .collect()
    }
}

/// `Option<T>` <-> JSON value or null
pub struct OptionCodec<T> {
    inner: SharedCodec<T>,
}

impl<T> OptionCodec<T> {
    pub fn new(inner: SharedCodec<T>) -> Self {
        Self { inner }
    }
}

impl<T> Codec<Option<T>> for OptionCodec<T> {
    fn encode(&self, value: &Option<T>) -> Value {
        match value {
            Some(inner) => self.inner.encode(inner),
            None => Value::Null,
        }
    }

    fn decode(&self, value: &Value) -> DecodeResult<Option<T>> {
        if value.is_null() {
            return Ok(None);
        }
        self.inner.decode(value).map(Some)
    }
}

/// `Box<T>` with the same wire form as `T`
pub struct BoxCodec<T> {
    inner: SharedCodec<T>,
}

impl<T> BoxCodec<T> {
    pub fn new(inner: SharedCodec<T>) -> Self {
        Self { inner }
    }
}

impl<T> Codec<Box<T>> for BoxCodec<T> {
    fn encode(&self, value: &Box<T>) -> Value {
        self.inner.encode(value)
    }

    fn decode(&self, value: &Value) -> DecodeResult<Box<T>> {
        self.inner.decode(value).map(Box::new)
    }
}
