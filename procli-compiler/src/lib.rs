//! Procedure-input-to-CLI-surface compiler.
//!
//! Given the input schemas of a procedure, this crate decides which parts of
//! the input become positional arguments and which become named flags, and
//! produces a [`CompiledProcedure`] that turns parsed argv back into the exact
//! call shape the procedure expects.
//!
//! # Example
//!
//! ```ignore
//! use procli_compiler::{CoercionPolicy, compile_schema};
//! use procli_ir::{DecodedArgv, ObjectShape, SchemaNode};
//!
//! let schema = SchemaNode::tuple([
//!     SchemaNode::string(),
//!     SchemaNode::number(),
//!     SchemaNode::object(ObjectShape::new().with_property("foo", SchemaNode::string(), true)),
//! ]);
//! let compiled = compile_schema(&schema, CoercionPolicy::default())?;
//!
//! let argv = DecodedArgv::new().positional("hello").positional("123").option("foo", "bar");
//! assert_eq!(compiled.get_pojo_input(&argv)?, json!(["hello", 123, { "foo": "bar" }]));
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod adapters;
mod classify;
pub mod coerce;
mod compiled;
mod decode;
mod error;
mod merge;
pub mod naming;
mod partition;
pub mod pipeline;

pub use adapters::{AdapterRegistry, RawSchema, SchemaAdapter};
pub use classify::{Classified, accepts_object, classify, is_optional, is_primitive};
pub use coerce::{CoercionPolicy, coerce};
pub use compiled::{CompiledProcedure, compile_inputs, compile_schema};
pub use error::{CliValidationError, SchemaIncompatibility};
pub use merge::merge_inputs;
