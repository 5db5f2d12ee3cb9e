//! serde interop: `Value` serializes like the JSON it encodes to, and
//! converts to and from `serde_json::Value`.
//!
//! Conversions always build fresh cells; nothing aliases the source.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::types::{Cell, ObjectMap, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &*self.cell() {
            Cell::Null => serializer.serialize_unit(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::String(s) => serializer.serialize_str(s),
            Cell::Integer(n) => serializer.serialize_i64(*n),
            Cell::Double(d) => serializer.serialize_f64(*d),
            Cell::Object(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Cell::Array(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::new(),
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::from(i),
                // u64 beyond i64 range, or a float
                None => Value::from(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>())
            }
            serde_json::Value::Object(map) => Value::from(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<ObjectMap>(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match &*value.cell() {
            Cell::Null => serde_json::Value::Null,
            Cell::Bool(b) => serde_json::Value::Bool(*b),
            Cell::String(s) => serde_json::Value::String(s.clone()),
            Cell::Integer(n) => serde_json::Value::from(*n),
            // Non-finite doubles have no JSON number form.
            Cell::Double(d) => serde_json::Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Cell::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
            Cell::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_through_serde_json() {
        let doc = Value::new();
        doc.field("a").set(1);
        doc.field("b").append(true);
        doc.field("b").append(1.5);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"a":1,"b":[true,1.5]}"#
        );
    }

    #[test]
    fn converts_from_serde_json() {
        let v = Value::from(json!({"n": null, "s": "x", "list": [1, 2.5, u64::MAX]}));
        assert!(v.get("n").unwrap().is_null());
        assert_eq!(v.get("s").unwrap().as_string(), "x");
        let list = v.get("list").unwrap();
        assert!(list.at(0).is_integer());
        assert!(list.at(1).is_double());
        assert!(list.at(2).is_double());
    }

    #[test]
    fn converts_to_serde_json() {
        let v = Value::new();
        v.field("x").set(2);
        v.field("y").set(f64::NAN);
        assert_eq!(serde_json::Value::from(&v), json!({"x": 2, "y": null}));
    }

    #[test]
    fn conversion_does_not_alias() {
        let source = Value::from(vec![Value::from(1)]);
        let copy = Value::from(serde_json::Value::from(&source));
        copy.at(0).set(5);
        assert_eq!(source.at(0).as_integer(), 1);
    }
}
