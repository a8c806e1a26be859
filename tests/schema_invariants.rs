//! Schema Invariant Tests
//!
//! Tests for the record builder invariants:
//! - Codec and schema list the same fields in the same order
//! - Round trips hold for records, lists, optionals
//! - Duplicate identifiers fail and register nothing
//! - Missing required fields are named, absent optional fields are `None`
//!
//! The schema registry is process-wide, so every test uses its own
//! identifier.

use mgmt_schema::codec::DecodeError;
use mgmt_schema::management::{Field, ManagementSchema};
use mgmt_schema::schema::{Identifier, SchemaErrorCode, SchemaNode, SchemaRegistry};
use serde_json::json;

// =============================================================================
// Helper Types
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Message {
    id: i64,
    tags: Option<Vec<String>>,
}

fn message_schema(name: &str) -> ManagementSchema<Message> {
    ManagementSchema::builder("invariants", name)
        .unwrap()
        .property("id", &ManagementSchema::integer(), |m: &Message| &m.id)
        .unwrap()
        .optional_property("tags", &ManagementSchema::string().as_list(), |m: &Message| &m.tags)
        .unwrap()
        .build(|(id, tags)| Message { id, tags })
        .unwrap()
}

fn id(name: &str) -> Identifier {
    Identifier::new("invariants", name).unwrap()
}

// =============================================================================
// Field Order Tests (arity 1 to 16)
// =============================================================================

macro_rules! arity_case {
    ($test:ident, $n:expr, $($idx:tt => $v:ident),+) => {
        #[test]
        fn $test() {
            let int = ManagementSchema::integer();
            let pair = ManagementSchema::<[i64; $n]>::builder("arity", stringify!($test))
                .unwrap()
                $(.property(format!("f{}", $idx), &int, |r: &[i64; $n]| &r[$idx]).unwrap())+
                .build(|($($v,)+)| [$($v),+])
                .unwrap();

            let names: Vec<String> = (0..$n).map(|i| format!("f{}", i)).collect();

            // Schema side
            let identifier = Identifier::new("arity", stringify!($test)).unwrap();
            let registered = SchemaRegistry::global().get(&identifier).unwrap();
            assert_eq!(registered.property_names(), names);

            // Codec side
            let record: [i64; $n] = [$($idx as i64 * 10),+];
            let encoded = pair.encode(&record).unwrap();
            let keys: Vec<String> = encoded.as_object().unwrap().keys().cloned().collect();
            assert_eq!(keys, names);

            assert_eq!(pair.decode(&encoded).unwrap(), record);
        }
    };
}

arity_case!(test_arity_1, 1, 0 => v0);
arity_case!(test_arity_2, 2, 0 => v0, 1 => v1);
arity_case!(test_arity_3, 3, 0 => v0, 1 => v1, 2 => v2);
arity_case!(test_arity_4, 4, 0 => v0, 1 => v1, 2 => v2, 3 => v3);
arity_case!(test_arity_5, 5, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4);
arity_case!(test_arity_6, 6, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5);
arity_case!(test_arity_7, 7, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6);
arity_case!(test_arity_8, 8, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7);
arity_case!(test_arity_9, 9, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8);
arity_case!(test_arity_10, 10, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9);
arity_case!(test_arity_11, 11, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9, 10 => v10);
arity_case!(test_arity_12, 12, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9, 10 => v10, 11 => v11);
arity_case!(test_arity_13, 13, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9, 10 => v10, 11 => v11, 12 => v12);
arity_case!(test_arity_14, 14, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9, 10 => v10, 11 => v11, 12 => v12, 13 => v13);
arity_case!(test_arity_15, 15, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9, 10 => v10, 11 => v11, 12 => v12, 13 => v13, 14 => v14);
arity_case!(test_arity_16, 16, 0 => v0, 1 => v1, 2 => v2, 3 => v3, 4 => v4, 5 => v5, 6 => v6, 7 => v7, 8 => v8, 9 => v9, 10 => v10, 11 => v11, 12 => v12, 13 => v13, 14 => v14, 15 => v15);

// =============================================================================
// Round Trip Tests
// =============================================================================

/// Records round trip with and without the optional field.
#[test]
fn test_record_round_trip() {
    let schema = message_schema("round_trip");

    for message in [
        Message { id: 1, tags: None },
        Message { id: -7, tags: Some(vec![]) },
        Message { id: 42, tags: Some(vec!["a".into(), "b".into()]) },
    ] {
        let encoded = schema.encode(&message).unwrap();
        assert_eq!(schema.decode(&encoded).unwrap(), message);
    }
}

/// Lists and optionals of records round trip.
#[test]
fn test_derived_pairs_round_trip() {
    let schema = message_schema("derived");
    let list = schema.as_list();
    let optional = schema.optional();

    let messages = vec![
        Message { id: 1, tags: None },
        Message { id: 2, tags: Some(vec!["x".into()]) },
    ];
    let encoded = list.encode(&messages).unwrap();
    assert_eq!(list.decode(&encoded).unwrap(), messages);

    assert_eq!(optional.decode(&json!(null)).unwrap(), None);
    let some = Some(Message { id: 3, tags: None });
    assert_eq!(optional.decode(&optional.encode(&some).unwrap()).unwrap(), some);
}

/// A `None` optional field is omitted from the encoded object.
#[test]
fn test_absent_optional_not_encoded() {
    let schema = message_schema("omit");
    let encoded = schema.encode(&Message { id: 5, tags: None }).unwrap();
    assert_eq!(encoded, json!({"id": 5}));
}

/// A required field built from an optional pair is listed as required and
/// must be present, though it may be null.
#[test]
fn test_required_nullable_field_agrees_with_schema() {
    #[derive(Debug, PartialEq)]
    struct Reading {
        n: Option<i64>,
    }

    let schema = ManagementSchema::builder("invariants", "nullable")
        .unwrap()
        .property("n", &ManagementSchema::integer().optional(), |r: &Reading| &r.n)
        .unwrap()
        .build(|(n,)| Reading { n })
        .unwrap();

    let registered = SchemaRegistry::global().get(&id("nullable")).unwrap();
    assert_eq!(registered.to_json()["required"], json!(["n"]));

    let err = schema.decode(&json!({})).unwrap_err();
    assert_eq!(err.path(), "n");
    assert_eq!(err.actual(), "missing");

    assert_eq!(schema.decode(&json!({"n": null})).unwrap(), Reading { n: None });
    assert_eq!(schema.encode(&Reading { n: None }).unwrap(), json!({"n": null}));
    assert_eq!(schema.decode(&json!({"n": 4})).unwrap(), Reading { n: Some(4) });
}

// =============================================================================
// Registration Tests
// =============================================================================

/// Registering the same identifier twice fails and leaves the first entry.
#[test]
fn test_duplicate_identifier_registers_nothing() {
    let first = message_schema("duplicate");
    let before = SchemaRegistry::global().get(&id("duplicate")).unwrap();

    let result = ManagementSchema::builder("invariants", "duplicate")
        .unwrap()
        .property("other", &ManagementSchema::boolean(), |_: &Message| &true)
        .unwrap()
        .build(|(_flag,)| Message { id: 0, tags: None });

    assert_eq!(result.unwrap_err().code(), SchemaErrorCode::DuplicateSchema);
    assert_eq!(SchemaRegistry::global().get(&id("duplicate")).unwrap(), before);
    assert!(first.is_complete());
}

/// Duplicate field names fail when the second field is added.
#[test]
fn test_duplicate_field_name() {
    let result = ManagementSchema::<Message>::builder("invariants", "dup_field")
        .unwrap()
        .property("id", &ManagementSchema::integer(), |m: &Message| &m.id)
        .unwrap()
        .field(Field::required("id", &ManagementSchema::integer(), |m: &Message| &m.id));

    let err = result.err().unwrap();
    assert_eq!(err.code(), SchemaErrorCode::DuplicateField);
    assert!(err.message().contains("id"));
    assert!(!SchemaRegistry::global().contains(&id("dup_field")));
}

/// The finalized pair references the registered object node.
#[test]
fn test_schema_is_reference_to_registered_object() {
    let schema = message_schema("reference");
    assert_eq!(schema.schema(), Some(&SchemaNode::Reference(id("reference"))));
    assert_eq!(schema.name(), "invariants:reference");

    let resolved = schema.resolved_schema().unwrap();
    assert_eq!(
        resolved.to_json(),
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "tags": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["id"]
        })
    );
}

/// A record embedded in another record is referenced, not expanded.
#[test]
fn test_nested_record_uses_reference() {
    #[derive(Debug, PartialEq)]
    struct Envelope {
        message: Message,
    }

    let message = message_schema("nested_inner");
    let envelope = ManagementSchema::builder("invariants", "nested_outer")
        .unwrap()
        .property("message", &message, |e: &Envelope| &e.message)
        .unwrap()
        .build(|(message,)| Envelope { message })
        .unwrap();

    let outer = SchemaRegistry::global().get(&id("nested_outer")).unwrap();
    assert_eq!(
        outer.property("message"),
        Some(&SchemaNode::Reference(id("nested_inner")))
    );

    let value = json!({"message": {"id": 1, "tags": ["t"]}});
    let decoded = envelope.decode(&value).unwrap();
    assert_eq!(decoded.message.tags, Some(vec!["t".to_string()]));
}

// =============================================================================
// Decode Error Tests
// =============================================================================

/// Missing required field names the field.
#[test]
fn test_missing_required_field_named() {
    let schema = message_schema("missing");
    let err = schema.decode(&json!({"tags": []})).unwrap_err();
    assert_eq!(err.field(), Some("id"));
}

/// Nested failures carry the full path.
#[test]
fn test_nested_error_path() {
    let schema = message_schema("path");
    let err: DecodeError = schema.decode(&json!({"id": 1, "tags": ["a", 2]})).unwrap_err();
    assert_eq!(err.path(), "tags[1]");
    assert_eq!(err.expected(), "string");
    assert_eq!(err.actual(), "integer");
}

/// Type mismatch on a primitive is reported.
#[test]
fn test_primitive_mismatch() {
    let schema = message_schema("mismatch");
    let err = schema.decode(&json!({"id": "3"})).unwrap_err();
    assert_eq!(err.path(), "id");
    assert_eq!(err.actual(), "string");
}

// =============================================================================
// End-to-End
// =============================================================================

/// `{id: integer, tags: optional(list(string))}` decodes as documented.
#[test]
fn test_end_to_end_id_and_tags() {
    let schema = message_schema("end_to_end");

    assert_eq!(
        schema.decode(&json!({"id": 3})).unwrap(),
        Message { id: 3, tags: None }
    );
    assert_eq!(
        schema.decode(&json!({"id": 3, "tags": ["a", "b"]})).unwrap(),
        Message { id: 3, tags: Some(vec!["a".into(), "b".into()]) }
    );

    let err = schema.decode(&json!({"tags": ["a"]})).unwrap_err();
    assert_eq!(err.field(), Some("id"));
    assert!(err.to_string().contains("'id'"));
}
