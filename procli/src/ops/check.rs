//! Check operation - compile every procedure and collect diagnostics.

use std::path::Path;

use eyre::Result;
use procli_compiler::{
    naming,
    pipeline::{CompilationContext, Pipeline, Severity},
};
use procli_manifest::Manifest;

use crate::reports::{CheckReport, CompiledInfo};

/// Execute the check operation.
///
/// Lint errors stop the pipeline but still end up in the report.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let mut ctx = CompilationContext::new(manifest.clone());
    if let Err(err) = Pipeline::new().run_with(&mut ctx)
        && !ctx.has_errors()
    {
        return Err(err.wrap_err("Compilation failed"));
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let compiled = ctx
        .procedures
        .iter()
        .map(|(name, procedure)| CompiledInfo {
            name: name.clone(),
            command: naming::command_path(name).join(" "),
            usage: procedure.usage(),
        })
        .collect();

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        cli_name: manifest.cli.name.clone(),
        cli_version: manifest.cli.version.clone(),
        compiled,
        ignored: ctx.ignored,
        errors,
        warnings,
        infos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    #[test]
    fn test_check_lists_compiled_and_ignored() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "calc"

            [procedures.add]
            description = "Add two numbers"

            [[procedures.add.inputs]]
            schema = { type = "array", items = [{ type = "number" }, { type = "number" }] }

            [procedures.echo]
            description = "Echo a string"

            [[procedures.echo.inputs]]
            schema = { type = "array", items = { type = "object" } }
            "#,
        );

        let report = check(&manifest, Path::new("procli.toml")).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.compiled.len(), 1);
        assert_eq!(report.compiled[0].name, "add");
        assert_eq!(report.compiled[0].usage, "<parameter_1> <parameter_2>");
        assert_eq!(report.ignored.len(), 1);
        assert_eq!(report.ignored[0].name, "echo");
    }

    #[test]
    fn test_check_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procli.toml");
        std::fs::write(
            &path,
            r#"
            [cli]
            name = "calc"
            version = "1.2.0"

            [procedures.ping]
            "#,
        )
        .unwrap();

        let procli_toml = procli_manifest::ProcliToml::open(&path).unwrap();
        let report = check(procli_toml.manifest(), procli_toml.path()).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.cli_version, "1.2.0");
        assert_eq!(report.config_path, path);
        assert_eq!(report.compiled[0].usage, "");
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_check_reports_lint_errors() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "calc"

            [procedures.fooBar]
            description = "One"

            [procedures.foo-bar]
            description = "Two"
            "#,
        );

        let report = check(&manifest, Path::new("procli.toml")).unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert!(report.compiled.is_empty());
    }
}
