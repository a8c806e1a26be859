//! Record schema builder
//!
//! Fields are appended one at a time; the builder's type records the full
//! ordered field list. Finalizing combines the fields into a record codec
//! and an object schema. The append order is the canonical order for
//! encode, decode and schema properties.

use std::marker::PhantomData;
use std::sync::Arc;

use super::field::Field;
use super::fields::{Append, FieldList};
use super::pair::ManagementSchema;
use super::record::RecordCodec;
use crate::codec::SharedCodec;
use crate::schema::{Identifier, SchemaError, SchemaNode, SchemaRegistry, SchemaResult};

/// Builder for a record of type `T` with field tuple `F`
pub struct RecordSchemaBuilder<T, F = ()> {
    identifier: Identifier,
    fields: F,
    names: Vec<String>,
    register: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T: 'static> RecordSchemaBuilder<T> {
    /// Starts a builder with no fields
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            fields: (),
            names: Vec::new(),
            register: true,
            _record: PhantomData,
        }
    }

    /// Builder whose finalized schema is not written to the registry
    pub(crate) fn unregistered(identifier: Identifier) -> Self {
        Self {
            register: false,
            ..Self::new(identifier)
        }
    }
}

impl<T: 'static, F> RecordSchemaBuilder<T, F> {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    /// Appends a field.
    ///
    /// # Errors
    ///
    /// `MGMT_DUPLICATE_FIELD` if a field with the same name exists.
    pub fn field<A: 'static>(
        self,
        field: Field<T, A>,
    ) -> SchemaResult<RecordSchemaBuilder<T, F::Output>>
    where
        F: Append<Field<T, A>>,
    {
        if self.names.iter().any(|n| n == field.name()) {
            return Err(SchemaError::duplicate_field(&self.identifier, field.name()));
        }

        let mut names = self.names;
        names.push(field.name().to_string());

        Ok(RecordSchemaBuilder {
            identifier: self.identifier,
            fields: self.fields.append(field),
            names,
            register: self.register,
            _record: PhantomData,
        })
    }

    /// Appends a required field read through `getter`
    pub fn property<A: 'static, G>(
        self,
        name: impl Into<String>,
        pair: &ManagementSchema<A>,
        getter: G,
    ) -> SchemaResult<RecordSchemaBuilder<T, F::Output>>
    where
        F: Append<Field<T, A>>,
        G: Fn(&T) -> &A + Send + Sync + 'static,
    {
        self.field(Field::required(name, pair, getter))
    }

    /// Appends a field that may be absent or null
    pub fn optional_property<A: 'static, G>(
        self,
        name: impl Into<String>,
        pair: &ManagementSchema<A>,
        getter: G,
    ) -> SchemaResult<RecordSchemaBuilder<T, F::Output>>
    where
        F: Append<Field<T, Option<A>>>,
        G: Fn(&T) -> &Option<A> + Send + Sync + 'static,
    {
        self.field(Field::optional(name, pair, getter))
    }

    /// Finalizes the record.
    ///
    /// The codec half exists when every field has a codec fragment. The
    /// schema half exists when every field has a schema fragment; the full
    /// object node is then registered and the pair carries a reference to it.
    ///
    /// # Errors
    ///
    /// `MGMT_DUPLICATE_SCHEMA` if the identifier is already registered.
    pub fn build<C>(self, constructor: C) -> SchemaResult<ManagementSchema<T>>
    where
        F: FieldList<T>,
        C: Fn(F::Values) -> T + Send + Sync + 'static,
    {
        let infos = self.fields.infos();
        let has_codecs = infos.iter().all(|info| info.has_codec);
        let properties: Option<Vec<(String, SchemaNode)>> = infos
            .iter()
            .map(|info| info.schema.map(|node| (info.name.to_string(), node.clone())))
            .collect();

        let name = self.identifier.to_string();
        let schema = match properties {
            Some(properties) if self.register => Some(
                SchemaRegistry::global()
                    .register(self.identifier.clone(), SchemaNode::Object(properties))?,
            ),
            Some(_) => Some(SchemaNode::Reference(self.identifier.clone())),
            None => None,
        };

        let codec = if has_codecs {
            let record = RecordCodec::new(name.clone(), self.fields, constructor);
            Some(Arc::new(record) as SharedCodec<T>)
        } else {
            None
        };

        Ok(ManagementSchema::new(codec, schema, name))
    }
}
