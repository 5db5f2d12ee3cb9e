//! The value model: a reference-counted handle (`Value`) to a mutable cell.
//!
//! A `Value` is only a pointer. Cloning it creates a second handle to the
//! *same* cell, so assigning a primitive through one handle is visible through
//! every alias. Containers hold handles too: copying an object or array
//! payload copies the map/vector but aliases the children one level down.
//!
//! Handles are `!Send`; the model is single-threaded. A handle stored inside
//! its own descendant forms a cycle that reference counting never reclaims,
//! and printing or comparing such a tree does not terminate. Nothing here
//! detects that.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::text::{duplicate, leading_double, leading_integer};

/// Object payload: keys in byte-wise ascending order.
pub type ObjectMap = BTreeMap<String, Value>;

/// Array payload: insertion order.
pub type ArrayVec = Vec<Value>;

/// Discriminant of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    String,
    Integer,
    Double,
    Object,
    Array,
}

impl Kind {
    /// Lower-case name, for messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::Object => "object",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The payload a handle points at.
///
/// `Clone` is the cell-to-cell assignment: strings are duplicated, containers
/// get a new map/vector holding copies of the child *handles*.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Cell {
    #[default]
    Null,
    Bool(bool),
    String(String),
    Integer(i64),
    Double(f64),
    Object(ObjectMap),
    Array(ArrayVec),
}

impl Cell {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Cell::Null => Kind::Null,
            Cell::Bool(_) => Kind::Bool,
            Cell::String(_) => Kind::String,
            Cell::Integer(_) => Kind::Integer,
            Cell::Double(_) => Kind::Double,
            Cell::Object(_) => Kind::Object,
            Cell::Array(_) => Kind::Array,
        }
    }

    /// Array payload, replacing any other kind with an empty array first.
    pub(crate) fn array_mut(&mut self) -> &mut ArrayVec {
        if !matches!(self, Cell::Array(_)) {
            *self = Cell::Array(ArrayVec::new());
        }
        match self {
            Cell::Array(items) => items,
            _ => unreachable!("cell was just made an array"),
        }
    }

    /// Object payload, replacing any other kind with an empty object first.
    pub(crate) fn object_mut(&mut self) -> &mut ObjectMap {
        if !matches!(self, Cell::Object(_)) {
            *self = Cell::Object(ObjectMap::new());
        }
        match self {
            Cell::Object(map) => map,
            _ => unreachable!("cell was just made an object"),
        }
    }
}

/// Shared handle to a JSON value cell.
///
/// `Clone` aliases; use [`Value::shallow_copy`] or [`Value::deep_copy`] for a
/// new cell. `==` compares content, [`Value::ptr_eq`] compares identity.
#[derive(Clone, Default)]
pub struct Value(Rc<RefCell<Cell>>);

impl Value {
    /// A fresh Null cell.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_cell(cell: Cell) -> Self {
        Value(Rc::new(RefCell::new(cell)))
    }

    pub(crate) fn cell(&self) -> Ref<'_, Cell> {
        self.0.borrow()
    }

    pub(crate) fn cell_mut(&self) -> RefMut<'_, Cell> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same cell.
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Number of handles sharing this cell (including `self`).
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn kind(&self) -> Kind {
        self.cell().kind()
    }

    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Bool
    }

    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }

    pub fn is_integer(&self) -> bool {
        self.kind() == Kind::Integer
    }

    pub fn is_double(&self) -> bool {
        self.kind() == Kind::Double
    }

    pub fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    /// Null → 0, Bool/Integer/Double → 1, String → byte length,
    /// Object/Array → element count.
    pub fn size(&self) -> usize {
        match &*self.cell() {
            Cell::Null => 0,
            Cell::Bool(_) | Cell::Integer(_) | Cell::Double(_) => 1,
            Cell::String(s) => s.len(),
            Cell::Object(map) => map.len(),
            Cell::Array(items) => items.len(),
        }
    }

    /// True for Null, an empty string, and empty containers.
    pub fn is_empty(&self) -> bool {
        match &*self.cell() {
            Cell::Null => true,
            Cell::Bool(_) | Cell::Integer(_) | Cell::Double(_) => false,
            Cell::String(s) => s.is_empty(),
            Cell::Object(map) => map.is_empty(),
            Cell::Array(items) => items.is_empty(),
        }
    }

    // ------------------------------------------------------------------
    // Read accessors. None of these fail: a kind mismatch yields the
    // zero value of the requested type.
    // ------------------------------------------------------------------

    pub fn as_bool(&self) -> bool {
        matches!(*self.cell(), Cell::Bool(true))
    }

    pub fn as_string(&self) -> String {
        match &*self.cell() {
            Cell::String(s) => s.clone(),
            _ => String::new(),
        }
    }

    /// Integer value; doubles truncate toward zero and strings are read
    /// best-effort (see [`leading_integer`]).
    pub fn as_integer(&self) -> i64 {
        match &*self.cell() {
            Cell::Integer(n) => *n,
            Cell::Double(d) => *d as i64,
            Cell::String(s) => leading_integer(s),
            _ => 0,
        }
    }

    /// Double value; integers widen and strings are read best-effort
    /// (see [`leading_double`]).
    pub fn as_double(&self) -> f64 {
        match &*self.cell() {
            Cell::Double(d) => *d,
            Cell::Integer(n) => *n as f64,
            Cell::String(s) => leading_double(s),
            _ => 0.0,
        }
    }

    /// Copy of the object map (child handles alias), or `None` if not an object.
    pub fn as_object(&self) -> Option<ObjectMap> {
        match &*self.cell() {
            Cell::Object(map) => Some(map.clone()),
            _ => None,
        }
    }

    /// Copy of the element vector (child handles alias), or `None` if not an array.
    pub fn as_array(&self) -> Option<ArrayVec> {
        match &*self.cell() {
            Cell::Array(items) => Some(items.clone()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // In-place assignment. The old payload is dropped and the new one is
    // installed in the shared cell, so every alias observes it.
    // ------------------------------------------------------------------

    pub fn set_null(&self) {
        *self.cell_mut() = Cell::Null;
    }

    pub fn set_bool(&self, value: bool) {
        *self.cell_mut() = Cell::Bool(value);
    }

    /// Stores an owned copy of `value`, truncated at the first NUL.
    pub fn set_string(&self, value: &str) {
        *self.cell_mut() = Cell::String(duplicate(value));
    }

    pub fn set_integer(&self, value: i64) {
        *self.cell_mut() = Cell::Integer(value);
    }

    pub fn set_double(&self, value: f64) {
        *self.cell_mut() = Cell::Double(value);
    }

    pub fn set_object(&self, map: ObjectMap) {
        *self.cell_mut() = Cell::Object(map);
    }

    pub fn set_array(&self, items: ArrayVec) {
        *self.cell_mut() = Cell::Array(items);
    }

    /// Assign any convertible value into this cell in place.
    ///
    /// `v.set(5)` and `v.set("x")` mutate the shared cell. Passing a `Value`
    /// copies that handle's payload in (see [`Value::assign_from`]); it does
    /// not rebind.
    pub fn set(&self, value: impl Into<Value>) {
        let value = value.into();
        if Value::ptr_eq(self, &value) {
            return;
        }
        let cell = match Rc::try_unwrap(value.0) {
            Ok(owned) => owned.into_inner(),
            Err(shared) => {
                let copy = shared.borrow().clone();
                copy
            }
        };
        *self.cell_mut() = cell;
    }

    /// Cell-to-cell assignment: replace this payload with a copy of
    /// `other`'s. Strings are duplicated; objects and arrays get new
    /// containers whose entries alias `other`'s children.
    pub fn assign_from(&self, other: &Value) {
        if Value::ptr_eq(self, other) {
            return;
        }
        let copy = other.cell().clone();
        *self.cell_mut() = copy;
    }

    /// New cell with a copy of this payload; children are shared.
    pub fn shallow_copy(&self) -> Value {
        Value::from_cell(self.cell().clone())
    }

    /// New, fully independent tree. Does not terminate on cyclic input.
    pub fn deep_copy(&self) -> Value {
        let cell = match &*self.cell() {
            Cell::Object(map) => Cell::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.deep_copy()))
                    .collect(),
            ),
            Cell::Array(items) => Cell::Array(items.iter().map(Value::deep_copy).collect()),
            scalar => scalar.clone(),
        };
        Value::from_cell(cell)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Value::ptr_eq(self, other) || *self.cell() == *other.cell()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.cell() {
            Cell::Null => f.write_str("Null"),
            Cell::Bool(b) => write!(f, "Bool({b})"),
            Cell::String(s) => write!(f, "String({s:?})"),
            Cell::Integer(n) => write!(f, "Integer({n})"),
            Cell::Double(d) => write!(f, "Double({d:?})"),
            Cell::Object(map) => f.debug_map().entries(map.iter()).finish(),
            Cell::Array(items) => f.debug_list().entries(items.iter()).finish(),
        }
    }
}

// ----------------------------------------------------------------------
// Construction. Every integer width normalizes to i64, every float width
// to f64, and strings are copied (NUL-truncated).
// ----------------------------------------------------------------------

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::from_cell(Cell::Bool(value))
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::from_cell(Cell::Integer(value as i64))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from_cell(Cell::Double(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_cell(Cell::Double(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_cell(Cell::String(duplicate(value)))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::from(value.as_str())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::from(value.as_str())
    }
}

impl From<ObjectMap> for Value {
    fn from(map: ObjectMap) -> Self {
        Value::from_cell(Cell::Object(map))
    }
}

impl From<ArrayVec> for Value {
    fn from(items: ArrayVec) -> Self {
        Value::from_cell(Cell::Array(items))
    }
}

/// Aliasing copy of a borrowed handle.
impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
