//! Intermediate representation types for procli.
//!
//! This crate provides the vendor-neutral description of procedure input
//! schemas, and the types that describe the CLI surface compiled from them.
//!
//! # Architecture
//!
//! ```text
//! raw schema (vendor) → adapter → SchemaNode (procli-ir) → compiler → CLI surface
//! ```
//!
//! The IR types are designed to be:
//! - Vendor-agnostic (no knowledge of the schema library that produced them)
//! - Closed (one tagged union, no duck-typing on shapes)
//! - Serializable (the IR's own serde form doubles as a schema vendor)

mod schema;
mod surface;

pub use schema::{ObjectShape, SchemaNode, Shape, TypeName};
pub use surface::{DecodedArgv, FlagDescriptor, FlagsSchema, PositionalParameter, PositionalValue};
