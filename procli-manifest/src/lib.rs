//! Router manifest (`procli.toml`) parsing and validation.
//!
//! A manifest names the CLI and lists its procedures, each with the raw input
//! schemas it was declared with. Schemas stay opaque here: they are handed to
//! the compiler together with their vendor marker.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod procedure;

pub use error::{Error, Result, SourceContext};
pub use manifest::{CliConfig, CoercionConfig, Manifest, ParseContext, ProcliToml};
pub use procedure::{DEFAULT_VENDOR, InputSchema, Procedure};
