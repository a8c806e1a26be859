//! Primitive codecs

use serde_json::Value;

use super::errors::{DecodeError, DecodeResult};
use super::Codec;

/// `bool` <-> JSON boolean
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn encode(&self, value: &bool) -> Value {
        Value::Bool(*value)
    }

    fn decode(&self, value: &Value) -> DecodeResult<bool> {
        value
            .as_bool()
            .ok_or_else(|| DecodeError::type_mismatch("boolean", value))
    }
}

/// `i64` <-> JSON integer. Floats are rejected, never truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCodec;

impl Codec<i64> for IntegerCodec {
    fn encode(&self, value: &i64) -> Value {
        Value::from(*value)
    }

    fn decode(&self, value: &Value) -> DecodeResult<i64> {
        value
            .as_i64()
            .ok_or_else(|| DecodeError::type_mismatch("integer", value))
    }
}

/// `String` <-> JSON string
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn encode(&self, value: &String) -> Value {
        Value::String(value.clone())
    }

    fn decode(&self, value: &Value) -> DecodeResult<String> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| DecodeError::type_mismatch("string", value))
    }
}
