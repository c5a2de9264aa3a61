//! Textform domain types
//!
//! Core types shared by every other crate: field descriptors, the ordered
//! schema and its editing operations, extraction results, and the boundary
//! traits implemented by the infrastructure crates.
//!
//! # Overview
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s describing what to
//! pull out of free text. An [`ExtractionResult`] maps field names to typed
//! [`FieldValue`]s and carries the original input as a memo.
//!
//! # Examples
//!
//! ```
//! use textform_schema::{FieldType, Schema};
//!
//! let mut schema = Schema::default_template();
//! schema.add_field();
//! let idx = schema.len() - 1;
//! schema.rename_field(idx, "amount").unwrap();
//! schema.set_field_type(idx, FieldType::Number).unwrap();
//! assert!(schema.is_valid());
//! ```

#![warn(missing_docs)]

mod field;
mod result;
mod schema;

pub mod traits;

pub use field::{validate_field_name, FieldDescriptor, FieldType, NameError};
pub use result::{ExtractionResult, FieldValue};
pub use schema::{Schema, SchemaError, SchemaImportError};
