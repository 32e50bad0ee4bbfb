//! Explain operation - describe the compiled surface of a procedure.

use eyre::Result;
use procli_compiler::naming;
use procli_manifest::Manifest;

use super::compile_procedure;
use crate::reports::{ExplainReport, FlagInfo};

/// Execute the explain operation.
pub fn explain(manifest: &Manifest, name: &str) -> Result<ExplainReport> {
    let compiled = compile_procedure(manifest, name)?;

    let flags = compiled
        .flags_schema
        .flags()
        .into_iter()
        .map(|flag| FlagInfo {
            name: flag.name.to_string(),
            ty: flag.schema.type_display(),
            required: flag.required,
            description: flag.schema.description.clone().unwrap_or_default(),
        })
        .collect();

    Ok(ExplainReport {
        procedure: name.to_string(),
        command: naming::command_path(name).join(" "),
        description: manifest
            .procedure(name)
            .map(|p| p.description.clone())
            .unwrap_or_default(),
        usage: compiled.usage(),
        positionals: compiled.positional_parameters.clone(),
        flags,
        flags_schema: compiled.flags_schema.to_json_schema(),
    })
}
