//! Build pipeline from manifest to compiled procedures.
//!
//! This module provides a [`Pipeline`] orchestrator that runs the build
//! phases over a parsed manifest:
//!
//! - Explicit phase boundaries (validate → resolve → compile)
//! - Per-procedure failure isolation: an incompatible procedure is ignored
//!   with its reason, every other procedure still builds
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use procli_compiler::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(manifest)?;
//!
//! for ignored in &ctx.ignored {
//!     eprintln!("ignored {}: {}", ignored.name, ignored.reason);
//! }
//! let add = ctx.procedure("add").unwrap();
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::{CompilationContext, IgnoredProcedure};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
