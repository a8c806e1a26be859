//! Schema pairs
//!
//! A `ManagementSchema<T>` couples a codec for `T` with the schema node
//! describing its wire form. Either half may be missing while a recursive
//! type is under construction; anything exposed through RPC must be
//! complete.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::builder::RecordSchemaBuilder;
use crate::codec::{
    BoolCodec, BoxCodec, Codec, DecodeError, DecodeResult, IntegerCodec, ListCodec, OptionCodec,
    SharedCodec, StringCodec,
};
use crate::schema::{Identifier, SchemaError, SchemaNode, SchemaRegistry, SchemaResult};

/// Codec and schema for values of type `T`
pub struct ManagementSchema<T> {
    codec: Option<SharedCodec<T>>,
    schema: Option<SchemaNode>,
    name: String,
}

impl<T> Clone for ManagementSchema<T> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T> fmt::Debug for ManagementSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementSchema")
            .field("name", &self.name)
            .field("has_codec", &self.codec.is_some())
            .field("schema", &self.schema)
            .finish()
    }
}

impl<T: 'static> ManagementSchema<T> {
    /// Creates a pair from its parts. Either half may be absent.
    pub fn new(
        codec: Option<SharedCodec<T>>,
        schema: Option<SchemaNode>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            schema,
            name: name.into(),
        }
    }

    /// Creates a complete pair
    pub fn of(codec: impl Codec<T> + 'static, schema: SchemaNode, name: impl Into<String>) -> Self {
        Self::new(Some(Arc::new(codec)), Some(schema), name)
    }

    /// Starts a record builder for `namespace:name`
    pub fn builder(namespace: &str, name: &str) -> SchemaResult<RecordSchemaBuilder<T>> {
        Ok(RecordSchemaBuilder::new(Identifier::new(namespace, name)?))
    }

    /// Starts a record builder for an existing identifier
    pub fn builder_for(identifier: Identifier) -> RecordSchemaBuilder<T> {
        RecordSchemaBuilder::new(identifier)
    }

    pub fn codec(&self) -> Option<&SharedCodec<T>> {
        self.codec.as_ref()
    }

    pub fn schema(&self) -> Option<&SchemaNode> {
        self.schema.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether both halves are present
    pub fn is_complete(&self) -> bool {
        self.codec.is_some() && self.schema.is_some()
    }

    /// Returns both halves.
    ///
    /// # Errors
    ///
    /// `MGMT_INCOMPLETE_SCHEMA` naming the missing half.
    pub fn require_complete(&self) -> SchemaResult<(SharedCodec<T>, SchemaNode)> {
        let codec = self
            .codec
            .clone()
            .ok_or_else(|| SchemaError::incomplete_schema(&self.name, "codec"))?;
        let schema = self
            .schema
            .clone()
            .ok_or_else(|| SchemaError::incomplete_schema(&self.name, "schema"))?;
        Ok((codec, schema))
    }

    /// Encodes a value; `None` if this pair has no codec
    pub fn encode(&self, value: &T) -> Option<Value> {
        self.codec.as_ref().map(|codec| codec.encode(value))
    }

    pub fn decode(&self, value: &Value) -> DecodeResult<T> {
        match &self.codec {
            Some(codec) => codec.decode(value),
            None => Err(DecodeError::unresolved(&self.name)),
        }
    }

    /// Schema node with references followed through the global registry
    pub fn resolved_schema(&self) -> Option<SchemaNode> {
        let schema = self.schema.as_ref()?;
        SchemaRegistry::global()
            .resolve(schema)
            .or_else(|| Some(schema.clone()))
    }

    /// Pair for a sequence of `T`
    pub fn as_list(&self) -> ManagementSchema<Vec<T>> {
        ManagementSchema {
            codec: self
                .codec
                .clone()
                .map(|codec| Arc::new(ListCodec::new(codec)) as SharedCodec<Vec<T>>),
            schema: self.schema.clone().map(SchemaNode::as_array),
            name: self.name.clone(),
        }
    }

    /// Pair for a value that may be null on the wire
    pub fn optional(&self) -> ManagementSchema<Option<T>> {
        ManagementSchema {
            codec: self
                .codec
                .clone()
                .map(|codec| Arc::new(OptionCodec::new(codec)) as SharedCodec<Option<T>>),
            schema: self.schema.clone().map(SchemaNode::optional),
            name: self.name.clone(),
        }
    }

    /// Pair for a boxed `T` with the same wire form
    pub fn boxed(&self) -> ManagementSchema<Box<T>> {
        ManagementSchema {
            codec: self
                .codec
                .clone()
                .map(|codec| Arc::new(BoxCodec::new(codec)) as SharedCodec<Box<T>>),
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
}

impl ManagementSchema<bool> {
    pub fn boolean() -> Self {
        Self::of(BoolCodec, SchemaNode::Boolean, "boolean")
    }
}

impl ManagementSchema<i64> {
    pub fn integer() -> Self {
        Self::of(IntegerCodec, SchemaNode::Integer, "integer")
    }
}

impl ManagementSchema<String> {
    pub fn string() -> Self {
        Self::of(StringCodec, SchemaNode::String, "string")
    }
}
