//! Field descriptors
//!
//! A field couples one named property of a record with the codec fragment
//! that reads and writes it and the schema fragment that describes it.
//! Either half may be missing while a recursive type is being built.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::pair::ManagementSchema;
use crate::codec::{DecodeError, DecodeResult, SharedCodec};
use crate::schema::SchemaNode;

/// Reads one named value out of a JSON object and writes it back
pub trait FieldCodec<T, A>: Send + Sync {
    /// Reads the field from a decoded object
    fn read(&self, object: &Map<String, Value>) -> DecodeResult<A>;

    /// Writes the field of `value` into an object being encoded
    fn write(&self, value: &T, object: &mut Map<String, Value>);
}

type Getter<T, A> = Arc<dyn Fn(&T) -> &A + Send + Sync>;

struct RequiredField<T, A> {
    name: String,
    codec: SharedCodec<A>,
    getter: Getter<T, A>,
}

impl<T, A> FieldCodec<T, A> for RequiredField<T, A> {
    fn read(&self, object: &Map<String, Value>) -> DecodeResult<A> {
        let value = object
            .get(&self.name)
            .ok_or_else(|| DecodeError::missing_field(self.name.clone()))?;
        self.codec.decode(value).map_err(|e| e.within(self.name.clone()))
    }

    fn write(&self, value: &T, object: &mut Map<String, Value>) {
        let field = (self.getter)(value);
        object.insert(self.name.clone(), self.codec.encode(field));
    }
}

/// Absent keys and JSON null both decode to `None`; `None` is not written.
struct OptionalField<T, A> {
    name: String,
    codec: SharedCodec<A>,
    getter: Getter<T, Option<A>>,
}

impl<T, A> FieldCodec<T, Option<A>> for OptionalField<T, A> {
    fn read(&self, object: &Map<String, Value>) -> DecodeResult<Option<A>> {
        match object.get(&self.name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self
                .codec
                .decode(value)
                .map(Some)
                .map_err(|e| e.within(self.name.clone())),
        }
    }

    fn write(&self, value: &T, object: &mut Map<String, Value>) {
        if let Some(field) = (self.getter)(value) {
            object.insert(self.name.clone(), self.codec.encode(field));
        }
    }
}

/// Summary of a field used when combining a field list
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo<'a> {
    pub name: &'a str,
    pub has_codec: bool,
    pub schema: Option<&'a SchemaNode>,
}

/// One field of a record of type `T`, holding a value of type `A`
pub struct Field<T, A> {
    name: String,
    codec: Option<Arc<dyn FieldCodec<T, A>>>,
    schema: Option<SchemaNode>,
}

impl<T: 'static, A: 'static> Field<T, A> {
    /// A field that must be present on the wire.
    ///
    /// An optional pair is accepted and its value may be null, but the key
    /// itself is still required, so the schema fragment drops the optional
    /// wrapper.
    pub fn required<G>(name: impl Into<String>, pair: &ManagementSchema<A>, getter: G) -> Self
    where
        G: Fn(&T) -> &A + Send + Sync + 'static,
    {
        let name = name.into();
        let codec = pair.codec().map(|codec| {
            Arc::new(RequiredField {
                name: name.clone(),
                codec: Arc::clone(codec),
                getter: Arc::new(getter),
            }) as Arc<dyn FieldCodec<T, A>>
        });

        Self {
            name,
            codec,
            schema: pair.schema().map(|node| node.unwrap_optional().clone()),
        }
    }

    /// A field assembled from a hand-written codec fragment
    pub fn from_parts(
        name: impl Into<String>,
        codec: Option<Arc<dyn FieldCodec<T, A>>>,
        schema: Option<SchemaNode>,
    ) -> Self {
        Self {
            name: name.into(),
            codec,
            schema,
        }
    }
}

impl<T: 'static, A: 'static> Field<T, Option<A>> {
    /// A field that may be absent or null on the wire
    pub fn optional<G>(name: impl Into<String>, pair: &ManagementSchema<A>, getter: G) -> Self
    where
        G: Fn(&T) -> &Option<A> + Send + Sync + 'static,
    {
        let name = name.into();
        let codec = pair.codec().map(|codec| {
            Arc::new(OptionalField {
                name: name.clone(),
                codec: Arc::clone(codec),
                getter: Arc::new(getter),
            }) as Arc<dyn FieldCodec<T, Option<A>>>
        });

        Self {
            name,
            codec,
            schema: pair.schema().cloned().map(SchemaNode::optional),
        }
    }
}

impl<T, A> Field<T, A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&SchemaNode> {
        self.schema.as_ref()
    }

    pub fn has_codec(&self) -> bool {
        self.codec.is_some()
    }

    pub fn info(&self) -> FieldInfo<'_> {
        FieldInfo {
            name: &self.name,
            has_codec: self.codec.is_some(),
            schema: self.schema.as_ref(),
        }
    }

    pub(crate) fn read(&self, object: &Map<String, Value>) -> DecodeResult<A> {
        match &self.codec {
            Some(codec) => codec.read(object),
            None => Err(DecodeError::unresolved(&self.name)),
        }
    }

    pub(crate) fn write(&self, value: &T, object: &mut Map<String, Value>) {
        if let Some(codec) = &self.codec {
            codec.write(value, object);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Player {
        name: String,
        nickname: Option<String>,
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_required_field_missing() {
        let field = Field::required("name", &ManagementSchema::string(), |p: &Player| &p.name);
        let err = field.read(&object(json!({}))).unwrap_err();
        assert_eq!(err.path(), "name");
        assert_eq!(err.actual(), "missing");
    }

    #[test]
    fn test_required_field_prefixes_nested_error() {
        let field = Field::required("name", &ManagementSchema::string(), |p: &Player| &p.name);
        let err = field.read(&object(json!({"name": 3}))).unwrap_err();
        assert_eq!(err.path(), "name");
        assert_eq!(err.expected(), "string");
    }

    #[test]
    fn test_optional_field_absent_and_null() {
        let field = Field::optional("nickname", &ManagementSchema::string(), |p: &Player| &p.nickname);
        assert_eq!(field.read(&object(json!({}))).unwrap(), None);
        assert_eq!(field.read(&object(json!({"nickname": null}))).unwrap(), None);
        assert_eq!(
            field.read(&object(json!({"nickname": "x"}))).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_optional_field_omits_none() {
        let field = Field::optional("nickname", &ManagementSchema::string(), |p: &Player| &p.nickname);
        let player = Player {
            name: "a".into(),
            nickname: None,
        };
        let mut out = Map::new();
        field.write(&player, &mut out);
        assert!(out.is_empty());
        assert_eq!(field.schema(), Some(&SchemaNode::String.optional()));
    }

    #[test]
    fn test_required_field_from_optional_pair() {
        let field = Field::required(
            "nickname",
            &ManagementSchema::string().optional(),
            |p: &Player| &p.nickname,
        );
        assert_eq!(field.schema(), Some(&SchemaNode::String));
        assert_eq!(field.read(&object(json!({"nickname": null}))).unwrap(), None);
        assert_eq!(field.read(&object(json!({}))).unwrap_err().actual(), "missing");
    }

    #[test]
    fn test_field_without_codec() {
        let pair: ManagementSchema<String> = ManagementSchema::new(None, Some(SchemaNode::String), "text");
        let field = Field::required("name", &pair, |p: &Player| &p.name);
        assert!(!field.has_codec());
        assert!(field.read(&object(json!({"name": "a"}))).is_err());
    }
}
