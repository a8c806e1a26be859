//! Structural schema descriptors
//!
//! Supported node kinds:
//! - boolean, integer, string
//! - object: ordered named children
//! - array: single element node
//! - one-of: fixed set of strings (enums)
//! - reference: pointer to a registered schema
//! - optional: marks an object property as not required

use serde_json::{Map, Value};

use super::identifier::Identifier;

/// Default prefix for `$ref` pointers in rendered descriptors
pub const DEFAULT_SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Wire shape descriptor of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// JSON boolean
    Boolean,
    /// JSON integer
    Integer,
    /// JSON string
    String,
    /// Object with ordered properties
    Object(Vec<(String, SchemaNode)>),
    /// Homogeneous array (boxed to allow recursive types)
    Array(Box<SchemaNode>),
    /// String restricted to a fixed set of values
    OneOf(Vec<String>),
    /// Reference to a registered schema
    Reference(Identifier),
    /// Value that may be absent
    Optional(Box<SchemaNode>),
}

impl SchemaNode {
    /// Returns the kind name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Boolean => "boolean",
            SchemaNode::Integer => "integer",
            SchemaNode::String => "string",
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::OneOf(_) => "oneOf",
            SchemaNode::Reference(_) => "reference",
            SchemaNode::Optional(_) => "optional",
        }
    }

    /// Wraps this node in an array node
    pub fn as_array(self) -> Self {
        SchemaNode::Array(Box::new(self))
    }

    /// Marks this node as optional. Already optional nodes are returned as is.
    pub fn optional(self) -> Self {
        match self {
            SchemaNode::Optional(_) => self,
            other => SchemaNode::Optional(Box::new(other)),
        }
    }

    /// Returns whether this node is an optional wrapper
    pub fn is_optional(&self) -> bool {
        matches!(self, SchemaNode::Optional(_))
    }

    /// Returns the node without its optional wrapper
    pub fn unwrap_optional(&self) -> &SchemaNode {
        match self {
            SchemaNode::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    /// Ordered property names of an object node; empty for other kinds
    pub fn property_names(&self) -> Vec<&str> {
        match self {
            SchemaNode::Object(properties) => properties.iter().map(|(name, _)| name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Looks up a property of an object node
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Object(properties) => properties
                .iter()
                .find(|(property, _)| property == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Renders the descriptor with the default `$ref` prefix
    pub fn to_json(&self) -> Value {
        self.to_json_with_prefix(DEFAULT_SCHEMA_REF_PREFIX)
    }

    /// Renders the descriptor, prefixing references with `prefix`
    pub fn to_json_with_prefix(&self, prefix: &str) -> Value {
        let mut out = Map::new();
        match self {
            SchemaNode::Boolean => {
                out.insert("type".into(), "boolean".into());
            }
            SchemaNode::Integer => {
                out.insert("type".into(), "integer".into());
            }
            SchemaNode::String => {
                out.insert("type".into(), "string".into());
            }
            SchemaNode::Object(properties) => {
                let mut rendered = Map::new();
                let mut required = Vec::new();
                for (name, node) in properties {
                    if !node.is_optional() {
                        required.push(Value::String(name.clone()));
                    }
                    rendered.insert(name.clone(), node.to_json_with_prefix(prefix));
                }
                out.insert("type".into(), "object".into());
                out.insert("properties".into(), Value::Object(rendered));
                if !required.is_empty() {
                    out.insert("required".into(), Value::Array(required));
                }
            }
            SchemaNode::Array(element) => {
                out.insert("type".into(), "array".into());
                out.insert("items".into(), element.to_json_with_prefix(prefix));
            }
            SchemaNode::OneOf(values) => {
                out.insert("type".into(), "string".into());
                out.insert(
                    "enum".into(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                );
            }
            SchemaNode::Reference(identifier) => {
                out.insert("$ref".into(), Value::String(format!("{}{}", prefix, identifier)));
            }
            SchemaNode::Optional(inner) => return inner.to_json_with_prefix(prefix),
        }
        Value::Object(out)
    }
}
