/// Property-based roundtrip tests.
///
/// Documents are generated as `serde_json::Value` trees and converted into
/// `Value`s. Strings avoid NUL (cells truncate at it) and code points above
/// U+FFFF (the encoder writes only the low 16 bits of a `\u` escape).
use jvalue::{encode, from_str, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_char() -> impl Strategy<Value = char> {
    any::<char>().prop_filter("NUL-free BMP character", |c| {
        *c != '\0' && (*c as u32) <= 0xFFFF
    })
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,16}",
        prop::collection::vec(arb_char(), 0..12).prop_map(|chars| chars.into_iter().collect()),
        Just("\"\\/\u{8}\u{c}\n\r\t".to_string()),
        Just("null".to_string()),
        Just("-1".to_string()),
    ]
}

fn arb_double() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("finite", |d| d.is_finite()),
        (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64 / 100.0),
    ]
}

fn arb_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        arb_double().prop_map(serde_json::Value::from),
        arb_string().prop_map(serde_json::Value::String),
    ]
}

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    arb_leaf().prop_recursive(4, 48, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(serde_json::Value::Array),
            prop::collection::btree_map(arb_string(), inner, 0..6)
                .prop_map(|map| serde_json::Value::Object(map.into_iter().collect())),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn decode_of_encode_is_identity(json in arb_json()) {
        let value = Value::from(json);
        let text = encode(&value);
        let decoded = from_str(&text).unwrap();
        prop_assert_eq!(&decoded, &value, "encoded as {}", text);
    }

    #[test]
    fn printing_is_idempotent(json in arb_json()) {
        let once = encode(&Value::from(json));
        let twice = encode(&from_str(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn serde_json_conversion_roundtrips(json in arb_json()) {
        let value = Value::from(json.clone());
        prop_assert_eq!(serde_json::Value::from(&value), json);
    }

    #[test]
    fn deep_copy_is_equal_and_detached(json in arb_json()) {
        let value = Value::from(json);
        let copy = value.deep_copy();
        prop_assert_eq!(&copy, &value);
        prop_assert!(!Value::ptr_eq(&copy, &value));

        let before = encode(&value);
        copy.set_null();
        prop_assert_eq!(encode(&value), before);
    }

    #[test]
    fn encode_has_no_trailing_whitespace(json in arb_json()) {
        let text = encode(&Value::from(json));
        prop_assert_eq!(text.trim_end(), text.as_str());
    }
}
