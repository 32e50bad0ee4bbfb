//! Core operations.
//!
//! This module contains the business logic for procli commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod decode;
pub mod explain;

use eyre::{Context, Result, bail};
use procli_compiler::{CompiledProcedure, pipeline::Pipeline};
use procli_manifest::Manifest;

pub use check::check;
pub use decode::{DecodeInput, decode};
pub use explain::explain;

/// Run the pipeline and return the compiled surface of one procedure.
fn compile_procedure(manifest: &Manifest, name: &str) -> Result<CompiledProcedure> {
    if !manifest.has_procedure(name) {
        bail!(
            "unknown procedure '{}' (available: {})",
            name,
            manifest.procedure_names().join(", ")
        );
    }

    let ctx = Pipeline::new()
        .run(manifest.clone())
        .wrap_err("Compilation failed")?;

    if let Some(reason) = ctx.ignored_reason(name) {
        bail!("procedure '{}' is ignored: {}", name, reason);
    }
    match ctx.procedure(name) {
        Some(compiled) => Ok(compiled.clone()),
        None => bail!("procedure '{}' was not compiled", name),
    }
}
