//! Self-referential records
//!
//! The definition closure runs twice. The first pass sees a self pair that
//! only has a schema (a reference to the record's own identifier) and
//! produces the registered object schema. The second pass sees a self pair
//! that only has a codec, a lazy handle, and produces the record codec. The
//! handle is then pointed at that codec, closing the knot.
//!
//! A required, non-optional self field describes a type with no finite
//! values; decoding it always fails.

use std::sync::Arc;

use super::builder::RecordSchemaBuilder;
use super::pair::ManagementSchema;
use crate::codec::LazyCodec;
use crate::schema::{Identifier, SchemaError, SchemaNode, SchemaResult};

impl<T: 'static> ManagementSchema<T> {
    /// Builds a record that refers to itself.
    ///
    /// `define` receives a fresh builder and the record's own pair, and
    /// must return the finalized record.
    ///
    /// # Errors
    ///
    /// Any fault raised by `define`, or `MGMT_INCOMPLETE_SCHEMA` if a pass
    /// did not produce its half.
    pub fn recursive<F>(namespace: &str, name: &str, define: F) -> SchemaResult<Self>
    where
        F: FnMut(RecordSchemaBuilder<T>, ManagementSchema<T>) -> SchemaResult<ManagementSchema<T>>,
    {
        Self::recursive_for(Identifier::new(namespace, name)?, define)
    }

    /// Same as [`ManagementSchema::recursive`] for an existing identifier
    pub fn recursive_for<F>(identifier: Identifier, mut define: F) -> SchemaResult<Self>
    where
        F: FnMut(RecordSchemaBuilder<T>, ManagementSchema<T>) -> SchemaResult<ManagementSchema<T>>,
    {
        let name = identifier.to_string();

        let schema_self = ManagementSchema::new(
            None,
            Some(SchemaNode::Reference(identifier.clone())),
            name.clone(),
        );
        let schema = define(RecordSchemaBuilder::new(identifier.clone()), schema_self)?
            .schema()
            .cloned()
            .ok_or_else(|| SchemaError::incomplete_schema(&name, "schema"))?;

        let knot = LazyCodec::new(name.clone());
        let codec_self = ManagementSchema::new(Some(knot.handle()), None, name.clone());
        let codec = define(RecordSchemaBuilder::unregistered(identifier), codec_self)?
            .codec()
            .cloned()
            .ok_or_else(|| SchemaError::incomplete_schema(&name, "codec"))?;

        knot.resolve(Arc::clone(&codec));

        Ok(ManagementSchema::new(Some(codec), Some(schema), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaErrorCode, SchemaRegistry};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Node {
        value: i64,
        next: Option<Box<Node>>,
    }

    #[test]
    fn test_linked_list_round_trip() {
        let node = ManagementSchema::<Node>::recursive("recursive_unit", "node", |builder, this| {
            builder
                .property("value", &ManagementSchema::integer(), |n: &Node| &n.value)?
                .optional_property("next", &this.boxed(), |n: &Node| &n.next)?
                .build(|(value, next)| Node { value, next })
        })
        .unwrap();

        let list = Node {
            value: 1,
            next: Some(Box::new(Node { value: 2, next: None })),
        };
        let encoded = node.encode(&list).unwrap();
        assert_eq!(encoded, json!({"value": 1, "next": {"value": 2}}));
        assert_eq!(node.decode(&encoded).unwrap(), list);

        let id = Identifier::new("recursive_unit", "node").unwrap();
        let registered = SchemaRegistry::global().get(&id).unwrap();
        assert_eq!(
            registered.property("next"),
            Some(&SchemaNode::Reference(id.clone()).optional())
        );
    }

    #[test]
    fn test_pass_without_schema_is_incomplete() {
        let result = ManagementSchema::<Node>::recursive("recursive_unit", "broken", |_, this| {
            Ok(ManagementSchema::new(this.codec().cloned(), None, this.name()))
        });
        assert_eq!(result.unwrap_err().code(), SchemaErrorCode::IncompleteSchema);
    }
}
