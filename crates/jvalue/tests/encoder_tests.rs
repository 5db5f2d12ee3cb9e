use jvalue::{encode, from_str, write_to, ObjectMap, Value};

fn object_of(pairs: &[(&str, i64)]) -> Value {
    let v = Value::from(ObjectMap::new());
    for (key, value) in pairs {
        v.field(key).set(*value);
    }
    v
}

fn array_of(items: &[i64]) -> Value {
    let v = Value::from(Vec::new());
    for item in items {
        v.append(*item);
    }
    v
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn encode_null() {
    assert_eq!(encode(&Value::new()), "null");
}

#[test]
fn encode_bools() {
    assert_eq!(encode(&Value::from(true)), "true");
    assert_eq!(encode(&Value::from(false)), "false");
}

#[test]
fn encode_integers() {
    assert_eq!(encode(&Value::from(99)), "99");
    assert_eq!(encode(&Value::from(-7)), "-7");
    assert_eq!(encode(&Value::from(i64::MIN)), "-9223372036854775808");
}

#[test]
fn encode_doubles() {
    assert_eq!(encode(&Value::from(1.23)), "1.23");
    assert_eq!(encode(&Value::from(42.0)), "42.0");
    assert_eq!(encode(&Value::from(-0.25)), "-0.25");
}

#[test]
fn encode_non_finite_double_as_null() {
    assert_eq!(encode(&Value::from(f64::NAN)), "null");
    assert_eq!(encode(&Value::from(f64::NEG_INFINITY)), "null");
}

#[test]
fn encode_plain_string() {
    assert_eq!(encode(&Value::from("abc")), r#""abc""#);
    assert_eq!(encode(&Value::from("")), r#""""#);
}

// ============================================================================
// String escaping
// ============================================================================

#[test]
fn encode_short_escapes() {
    let v = Value::from("\"\\/\u{8}\u{c}\n\r\t");
    assert_eq!(encode(&v), r#""\"\\\/\b\f\n\r\t""#);
}

#[test]
fn encode_other_control_bytes() {
    let v = Value::from("\"ABC\"\u{4}\u{1f}\u{7f}");
    assert_eq!(encode(&v), r#""\"ABC\"\u0004\u001f\u007f""#);
}

#[test]
fn encode_non_ascii_as_unicode_escape() {
    assert_eq!(encode(&Value::from("caf\u{e9}")), r#""caf\u00e9""#);
    assert_eq!(encode(&Value::from("\u{4f60}\u{597d}")), r#""\u4f60\u597d""#);
}

#[test]
fn encode_astral_code_point_as_low_16_bits() {
    assert_eq!(encode(&Value::from("\u{1F600}")), r#""\uf600""#);
}

#[test]
fn encode_escapes_keys() {
    let v = Value::new();
    v.field("a/b").set(1);
    assert_eq!(encode(&v), r#"{"a\/b":1}"#);
}

// ============================================================================
// Layout thresholds
// ============================================================================

#[test]
fn encode_empty_containers() {
    assert_eq!(encode(&Value::from(ObjectMap::new())), "{}");
    assert_eq!(encode(&Value::from(Vec::new())), "[]");
}

#[test]
fn object_with_two_entries_is_one_line() {
    let v = object_of(&[("a", 1), ("b", 2)]);
    assert_eq!(encode(&v), r#"{"a":1, "b":2}"#);
}

#[test]
fn object_with_three_entries_is_one_per_line() {
    let v = object_of(&[("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(encode(&v), "{\n \"a\":1,\n \"b\":2,\n \"c\":3\n }");
}

#[test]
fn array_with_four_elements_is_one_line() {
    assert_eq!(encode(&array_of(&[1, 2, 3, 4])), "[1,2,3,4]");
}

#[test]
fn array_with_five_elements_is_one_per_line() {
    assert_eq!(
        encode(&array_of(&[1, 2, 3, 4, 5])),
        "[\n 1,\n 2,\n 3,\n 4,\n 5\n ]"
    );
}

#[test]
fn indentation_grows_per_nesting_level() {
    let v = object_of(&[("a", 1), ("b", 2)]);
    v.bind_field("c", object_of(&[("x", 1), ("y", 2), ("z", 3)]));
    assert_eq!(
        encode(&v),
        "{\n \"a\":1,\n \"b\":2,\n \"c\":{\n  \"x\":1,\n  \"y\":2,\n  \"z\":3\n  }\n }"
    );
}

#[test]
fn array_inside_large_array_indents_deeper() {
    let v = array_of(&[1, 2, 3, 4]);
    v.append(array_of(&[5, 6, 7, 8, 9]));
    assert_eq!(
        encode(&v),
        "[\n 1,\n 2,\n 3,\n 4,\n [\n  5,\n  6,\n  7,\n  8,\n  9\n  ]\n ]"
    );
}

#[test]
fn small_containers_nest_inline() {
    let v = Value::new();
    v.field("list").append(1);
    v.field("list").append("two");
    v.field("obj").field("k").set(Value::new());
    assert_eq!(encode(&v), r#"{"list":[1,"two"], "obj":{"k":null}}"#);
}

// ============================================================================
// Output surfaces
// ============================================================================

#[test]
fn printing_is_idempotent() {
    let v = from_str(r#"{"a":[1,2,3,4,5],"b":{"c":"d"},"e":null}"#).unwrap();
    assert_eq!(encode(&v), encode(&v));
}

#[test]
fn display_matches_encode() {
    let v = object_of(&[("a", 1)]);
    assert_eq!(v.to_string(), encode(&v));
    assert_eq!(format!("{v}"), r#"{"a":1}"#);
}

#[test]
fn write_to_stream() {
    let v = array_of(&[1, 2]);
    let mut out = Vec::new();
    write_to(&v, &mut out).unwrap();
    assert_eq!(out, b"[1,2]");
}
