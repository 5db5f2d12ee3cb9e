//! # jvalue
//!
//! An in-memory JSON document model built from shared, mutable cells, with a
//! compact encoder and a stream decoder.
//!
//! A [`Value`] is a reference-counted handle. Cloning a handle aliases the
//! cell, so a primitive assigned through one handle is seen through all of
//! them. Access is auto-vivifying: indexing a Null turns it into an array,
//! naming a key turns it into an object, and missing slots spring into
//! existence as Null.
//!
//! ## Quick start
//!
//! ```rust
//! use jvalue::{from_str, Value};
//!
//! let doc = Value::new();
//! doc.at(0).field("name").set("Ada");
//! doc.at(0).field("born").set(1815);
//! assert_eq!(doc.to_string(), r#"[{"born":1815, "name":"Ada"}]"#);
//!
//! // Handles alias
//! let first = doc.at(0);
//! first.field("born").set(1816);
//! assert_eq!(doc.at(0).field("born").as_integer(), 1816);
//!
//! // JSON → Value → JSON
//! let parsed = from_str(r#"{"k":1,"k":2}"#).unwrap();
//! assert_eq!(parsed.to_string(), r#"{"k":2}"#);
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Value` handle, `Kind`, construction, accessors, copies
//! - [`access`] - auto-vivifying `at`/`field`/`append`, lookups, comparisons
//! - [`encoder`] - `Value` → compact JSON text
//! - [`decoder`] - JSON byte stream → `Value`
//! - [`limits`] - decoder nesting limits
//! - [`error`] - error type for decode and stream failures
//! - [`text`] - NUL-truncating string copy and lenient number reading

pub mod access;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod limits;
mod serde_impl;
pub mod text;
pub mod types;

pub use decoder::{from_slice, from_str, Decoder};
pub use encoder::{encode, write_to};
pub use error::{JsonError, Result};
pub use limits::Limits;
pub use types::{ArrayVec, Kind, ObjectMap, Value};
