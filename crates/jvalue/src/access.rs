//! Auto-vivifying access and primitive comparisons.
//!
//! `at`, `field` and `append` never fail. When the cell is not already the
//! container kind they need, its payload is discarded and replaced by an empty
//! container, so `doc.at(0).field("name").set(1)` works on a fresh Null.

use std::cmp::Ordering;

use crate::text::duplicate;
use crate::types::{Cell, Value};

impl Value {
    /// Handle to element `index`, turning this cell into an array and padding
    /// it with Nulls as needed.
    pub fn at(&self, index: usize) -> Value {
        let mut cell = self.cell_mut();
        let items = cell.array_mut();
        if index >= items.len() {
            items.resize_with(index + 1, Value::new);
        }
        items[index].clone()
    }

    /// Handle mapped to `name`, turning this cell into an object and
    /// inserting a Null under `name` if absent.
    pub fn field(&self, name: &str) -> Value {
        let mut cell = self.cell_mut();
        cell.object_mut()
            .entry(duplicate(name))
            .or_default()
            .clone()
    }

    /// Push `value` as the last element, turning this cell into an array
    /// first if needed. Existing array contents are kept. A `Value` argument
    /// is stored as-is, so the new element aliases it.
    pub fn append(&self, value: impl Into<Value>) {
        let value = value.into();
        self.cell_mut().array_mut().push(value);
    }

    /// Rebind slot `index` to `value` (vivifying like [`Value::at`]). The
    /// previous occupant's cell is not modified.
    pub fn bind_at(&self, index: usize, value: Value) {
        let mut cell = self.cell_mut();
        let items = cell.array_mut();
        if index >= items.len() {
            items.resize_with(index + 1, Value::new);
        }
        items[index] = value;
    }

    /// Rebind key `name` to `value` (vivifying like [`Value::field`]).
    /// Returns the handle previously stored there.
    pub fn bind_field(&self, name: &str, value: Value) -> Option<Value> {
        self.cell_mut().object_mut().insert(duplicate(name), value)
    }

    /// Element `index` without vivifying.
    pub fn get_index(&self, index: usize) -> Option<Value> {
        match &*self.cell() {
            Cell::Array(items) => items.get(index).cloned(),
            _ => None,
        }
    }

    /// Handle under `name` without vivifying.
    pub fn get(&self, name: &str) -> Option<Value> {
        match &*self.cell() {
            Cell::Object(map) => map.get(name).cloned(),
            _ => None,
        }
    }

    /// Remove and return the handle under `name`. Non-objects are untouched.
    pub fn remove(&self, name: &str) -> Option<Value> {
        match &mut *self.cell_mut() {
            Cell::Object(map) => map.remove(name),
            _ => None,
        }
    }

    /// Object keys in order; empty for non-objects.
    pub fn keys(&self) -> Vec<String> {
        match &*self.cell() {
            Cell::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Object entries in key order; empty for non-objects.
    pub fn entries(&self) -> Vec<(String, Value)> {
        match &*self.cell() {
            Cell::Object(map) => map
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

// Comparisons against primitives go through the coercing accessors, so
// `Value::from("12") == 12` and a non-string compares as "".

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_integer() == *other
    }
}

impl PartialOrd<i64> for Value {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.as_integer().cmp(other))
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        *self == i64::from(*other)
    }
}

impl PartialOrd<i32> for Value {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        self.partial_cmp(&i64::from(*other))
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_double() == *other
    }
}

impl PartialOrd<f64> for Value {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.as_double().partial_cmp(other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == *other
    }
}

impl PartialOrd<bool> for Value {
    fn partial_cmp(&self, other: &bool) -> Option<Ordering> {
        Some(self.as_bool().cmp(other))
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match &*self.cell() {
            Cell::String(s) => s == other,
            _ => other.is_empty(),
        }
    }
}

impl PartialOrd<str> for Value {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        match &*self.cell() {
            Cell::String(s) => Some(s.as_str().cmp(other)),
            _ => Some("".cmp(other)),
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd<&str> for Value {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.partial_cmp(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        *self == *other.as_str()
    }
}

impl PartialOrd<String> for Value {
    fn partial_cmp(&self, other: &String) -> Option<Ordering> {
        self.partial_cmp(other.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Kind;

    #[test]
    fn at_pads_with_nulls() {
        let v = Value::new();
        v.at(2).set("x");
        assert_eq!(v.size(), 3);
        assert!(v.at(0).is_null());
        assert_eq!(v.at(2).as_string(), "x");
    }

    #[test]
    fn field_inserts_null() {
        let v = Value::new();
        assert!(v.field("a").is_null());
        assert_eq!(v.kind(), Kind::Object);
        assert_eq!(v.keys(), vec!["a".to_string()]);
    }

    #[test]
    fn get_does_not_vivify() {
        let v = Value::from(3);
        assert!(v.get("a").is_none());
        assert!(v.get_index(0).is_none());
        assert!(v.is_integer());
    }

    #[test]
    fn remove_only_touches_objects() {
        let v = Value::new();
        v.field("a").set(1);
        assert_eq!(v.remove("a").map(|x| x.as_integer()), Some(1));
        assert!(v.is_empty());

        let n = Value::from(1);
        assert!(n.remove("a").is_none());
        assert!(n.is_integer());
    }

    #[test]
    fn string_comparisons() {
        let v = Value::from("abc");
        assert!(v == "abc");
        assert!(v < "abd");
        assert!(v <= "abc");
        assert!(Value::from(1) == "");
    }
}
