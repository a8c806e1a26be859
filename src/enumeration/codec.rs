//! Enum codec and schema pairs

use std::collections::HashSet;

use serde_json::Value;

use super::transformer::EnumTransformer;
use crate::codec::{Codec, DecodeError, DecodeResult};
use crate::management::ManagementSchema;
use crate::schema::{SchemaError, SchemaNode, SchemaResult};

/// A fieldless enum that can be exposed on the wire
pub trait SchemaEnum: Clone + Send + Sync + 'static {
    /// Name of the enum type, used in schemas and errors
    fn type_name() -> &'static str;

    /// Every value, in declaration order
    fn variants() -> &'static [Self];

    /// Canonical name of this value
    fn variant_name(&self) -> &'static str;
}

/// Encodes values as transformed strings. Decodes either the string or
/// the 0-based position of the value in the value list.
struct EnumCodec<E> {
    enum_name: String,
    values: Vec<E>,
    names: Vec<String>,
    transformer: EnumTransformer<E>,
}

impl<E: SchemaEnum> EnumCodec<E> {
    fn lookup(&self, value: &Value) -> Option<E> {
        let position = match value {
            Value::String(name) => self.names.iter().position(|n| n == name),
            Value::Number(n) => n
                .as_u64()
                .and_then(|ordinal| usize::try_from(ordinal).ok())
                .filter(|ordinal| *ordinal < self.values.len()),
            _ => None,
        };
        position.map(|i| self.values[i].clone())
    }
}

impl<E: SchemaEnum> Codec<E> for EnumCodec<E> {
    fn encode(&self, value: &E) -> Value {
        Value::String(self.transformer.transform(value))
    }

    fn decode(&self, value: &Value) -> DecodeResult<E> {
        match value {
            Value::String(_) | Value::Number(_) => self
                .lookup(value)
                .ok_or_else(|| DecodeError::unknown_variant(&self.enum_name, value)),
            other => Err(DecodeError::type_mismatch(
                format!("string or ordinal of enum '{}'", self.enum_name),
                other,
            )),
        }
    }
}

impl<E: SchemaEnum> ManagementSchema<E> {
    /// Pair for every value of `E`
    ///
    /// # Errors
    ///
    /// `MGMT_INVALID_ENUM` if `E` has no values or two values transform to
    /// the same string.
    pub fn of_enum(transformer: EnumTransformer<E>) -> SchemaResult<Self> {
        Self::of_enum_values(E::type_name(), E::variants().to_vec(), transformer)
    }

    /// Pair for an explicit list of values, named `name`
    pub fn of_enum_values(
        name: &str,
        values: Vec<E>,
        transformer: EnumTransformer<E>,
    ) -> SchemaResult<Self> {
        if values.is_empty() {
            return Err(SchemaError::invalid_enum(name, "enum has no values"));
        }

        let names: Vec<String> = values.iter().map(|v| transformer.transform(v)).collect();
        let mut seen = HashSet::new();
        for wire in &names {
            if !seen.insert(wire.as_str()) {
                return Err(SchemaError::invalid_enum(
                    name,
                    format!("more than one value transforms to '{}'", wire),
                ));
            }
        }

        let schema = SchemaNode::OneOf(names.clone());
        let codec = EnumCodec {
            enum_name: name.to_string(),
            values,
            names,
            transformer,
        };
        Ok(Self::of(codec, schema, name))
    }
}
