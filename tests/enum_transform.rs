//! Enum Transform Tests
//!
//! - Every built-in transformer round trips every value
//! - Chained transformers round trip
//! - Ordinals decode, unknown strings and ordinals fail naming the enum

use mgmt_schema::enumeration::{tokenize, EnumTransformer, SchemaEnum};
use mgmt_schema::management::ManagementSchema;
use mgmt_schema::schema::{SchemaErrorCode, SchemaNode};
use serde_json::json;

// =============================================================================
// Helper Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Weather {
    Sunny,
    PartlyCloudy,
    HeavyRain,
}

impl SchemaEnum for Weather {
    fn type_name() -> &'static str {
        "Weather"
    }

    fn variants() -> &'static [Self] {
        &[Weather::Sunny, Weather::PartlyCloudy, Weather::HeavyRain]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Weather::Sunny => "SUNNY",
            Weather::PartlyCloudy => "PARTLY_CLOUDY",
            Weather::HeavyRain => "HEAVY_RAIN",
        }
    }
}

fn builtins() -> Vec<(&'static str, EnumTransformer<Weather>)> {
    vec![
        ("basic", EnumTransformer::basic()),
        ("lowercase", EnumTransformer::lowercase()),
        ("uppercase", EnumTransformer::uppercase()),
        ("snake_case_upper", EnumTransformer::snake_case_upper()),
        ("snake_case_lower", EnumTransformer::snake_case_lower()),
        ("kebab_case_upper", EnumTransformer::kebab_case_upper()),
        ("kebab_case_lower", EnumTransformer::kebab_case_lower()),
        ("pascal_case", EnumTransformer::pascal_case()),
        ("camel_case", EnumTransformer::camel_case()),
        ("custom_name", EnumTransformer::custom_name(|w: &Weather| format!("{:?}", w))),
        ("custom", EnumTransformer::custom(|name| format!("wx.{}", name))),
    ]
}

fn assert_round_trip(label: &str, transformer: EnumTransformer<Weather>) {
    let pair = ManagementSchema::of_enum(transformer)
        .unwrap_or_else(|e| panic!("{}: {}", label, e));
    for value in Weather::variants() {
        let encoded = pair.encode(value).unwrap();
        assert_eq!(&pair.decode(&encoded).unwrap(), value, "{}", label);
    }
}

// =============================================================================
// Round Trip Tests
// =============================================================================

/// Every built-in transformer is a bijection over the value set.
#[test]
fn test_builtin_round_trips() {
    for (label, transformer) in builtins() {
        assert_round_trip(label, transformer);
    }
}

/// Chains of two transformers still round trip.
#[test]
fn test_chained_round_trips() {
    for (label, head) in builtins() {
        assert_round_trip(label, head.then(EnumTransformer::kebab_case_upper()));
    }
    for (label, tail) in builtins() {
        assert_round_trip(label, EnumTransformer::pascal_case().then(tail));
    }
}

/// Encoding is deterministic.
#[test]
fn test_encoding_is_deterministic() {
    let pair = ManagementSchema::of_enum(EnumTransformer::<Weather>::camel_case()).unwrap();
    for _ in 0..100 {
        assert_eq!(pair.encode(&Weather::PartlyCloudy).unwrap(), json!("partlyCloudy"));
    }
}

// =============================================================================
// Wire Form Tests
// =============================================================================

/// Expected wire strings for each transformer.
#[test]
fn test_wire_strings() {
    let expected = [
        ("basic", "PARTLY_CLOUDY"),
        ("lowercase", "partly_cloudy"),
        ("uppercase", "PARTLY_CLOUDY"),
        ("snake_case_upper", "PARTLY_CLOUDY"),
        ("snake_case_lower", "partly_cloudy"),
        ("kebab_case_upper", "PARTLY-CLOUDY"),
        ("kebab_case_lower", "partly-cloudy"),
        ("pascal_case", "PartlyCloudy"),
        ("camel_case", "partlyCloudy"),
        ("custom_name", "PartlyCloudy"),
        ("custom", "wx.PARTLY_CLOUDY"),
    ];

    for ((label, transformer), (expected_label, wire)) in builtins().into_iter().zip(expected) {
        assert_eq!(label, expected_label);
        assert_eq!(transformer.transform(&Weather::PartlyCloudy), wire, "{}", label);
    }
}

/// The schema lists the transformed names in declaration order.
#[test]
fn test_schema_lists_values() {
    let pair = ManagementSchema::of_enum(EnumTransformer::<Weather>::kebab_case_lower()).unwrap();
    assert_eq!(
        pair.schema(),
        Some(&SchemaNode::OneOf(vec![
            "sunny".into(),
            "partly-cloudy".into(),
            "heavy-rain".into()
        ]))
    );
    assert_eq!(
        pair.schema().unwrap().to_json(),
        json!({"type": "string", "enum": ["sunny", "partly-cloudy", "heavy-rain"]})
    );
    assert_eq!(pair.name(), "Weather");
}

/// Custom case joins the split words, lowercased.
#[test]
fn test_custom_case() {
    let joined = EnumTransformer::<Weather>::custom_case(|words| words.join("+"));
    assert_eq!(joined.transform(&Weather::HeavyRain), "heavy+rain");
    assert_eq!(tokenize("HeavyRain"), vec!["heavy", "rain"]);
    assert_eq!(tokenize("HEAVY_RAIN"), vec!["heavy", "rain"]);
}

// =============================================================================
// Decode Tests
// =============================================================================

/// Ordinals index the value list.
#[test]
fn test_ordinal_decode() {
    let pair = ManagementSchema::of_enum(EnumTransformer::<Weather>::basic()).unwrap();
    assert_eq!(pair.decode(&json!(0)).unwrap(), Weather::Sunny);
    assert_eq!(pair.decode(&json!(2)).unwrap(), Weather::HeavyRain);
}

/// Unknown strings and out-of-range ordinals name the enum and the value.
#[test]
fn test_unknown_values() {
    let pair = ManagementSchema::of_enum(EnumTransformer::<Weather>::snake_case_lower()).unwrap();

    let err = pair.decode(&json!("SNOW")).unwrap_err();
    assert!(err.expected().contains("Weather"));
    assert!(err.actual().contains("SNOW"));

    let err = pair.decode(&json!(3)).unwrap_err();
    assert!(err.expected().contains("Weather"));
    assert_eq!(err.actual(), "3");

    // wire strings of another transformer are not accepted
    assert!(pair.decode(&json!("PARTLY_CLOUDY")).is_err());
}

/// Transformers that collapse values are rejected at construction.
#[test]
fn test_non_bijective_transform_rejected() {
    let constant = EnumTransformer::<Weather>::custom(|_| "same".to_string());
    let err = ManagementSchema::of_enum(constant).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::InvalidEnum);
}
