//! Record codec combined from a field list

use std::marker::PhantomData;

use serde_json::{Map, Value};

use super::fields::FieldList;
use crate::codec::{Codec, DecodeError, DecodeResult};

/// Encodes a record as a JSON object with one key per field.
///
/// Decoding reads the fields in declaration order, then hands the tuple of
/// values to the constructor. Keys not declared by any field are ignored.
pub(crate) struct RecordCodec<T, F, C> {
    name: String,
    fields: F,
    constructor: C,
    _record: PhantomData<fn() -> T>,
}

impl<T, F, C> RecordCodec<T, F, C> {
    pub(crate) fn new(name: String, fields: F, constructor: C) -> Self {
        Self {
            name,
            fields,
            constructor,
            _record: PhantomData,
        }
    }
}

impl<T, F, C> Codec<T> for RecordCodec<T, F, C>
where
    F: FieldList<T>,
    C: Fn(F::Values) -> T + Send + Sync,
{
    fn encode(&self, value: &T) -> Value {
        let mut object = Map::new();
        self.fields.write(value, &mut object);
        Value::Object(object)
    }

    fn decode(&self, value: &Value) -> DecodeResult<T> {
        let object = value
            .as_object()
            .ok_or_else(|| DecodeError::type_mismatch(format!("object '{}'", self.name), value))?;

        let values = self.fields.read(object)?;
        Ok((self.constructor)(values))
    }
}
