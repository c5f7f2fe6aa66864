//! Operation catalogue
//!
//! A static table of every operation the server exposes. Each entry carries a
//! name, a description and an ordered list of argument fields, from which the
//! JSON Schema advertised to clients is derived. The table is built once, on
//! first use, and never changes afterwards.
//!
//! Argument handling is two-staged:
//! 1. [`OperationDescriptor::validate`] checks that required fields are present.
//! 2. [`Operation::decode`] turns the arguments into a typed record, validating
//!    every id along the way.

mod descriptor;
mod operation;
mod table;

pub use descriptor::{FieldSpec, FieldType, OperationDescriptor};
pub use operation::Operation;
pub use table::{lookup, CATALOGUE};
