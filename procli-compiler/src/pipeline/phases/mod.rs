//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`ValidatePhase`] - lints the manifest and collects diagnostics
//! - [`ResolvePhase`] - converts raw input schemas to IR through the adapters
//! - [`CompilePhase`] - compiles IR into CLI surfaces

mod compile;
mod resolve;
mod validate;

pub use compile::CompilePhase;
pub use resolve::ResolvePhase;
pub use validate::{DuplicateCommandLint, EmptyDescriptionLint, Lint, LintInfo, ValidatePhase};
