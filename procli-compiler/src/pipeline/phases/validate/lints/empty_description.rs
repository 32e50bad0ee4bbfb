//! Lint for empty procedure descriptions.

use procli_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about procedures missing descriptions.
pub struct EmptyDescriptionLint;

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn description(&self) -> &'static str {
        "Warn about procedures without help text"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for name in manifest.procedure_names() {
            let Some(procedure) = manifest.procedure(name) else {
                continue;
            };
            if procedure.description.trim().is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("procedure '{}' has no description", name),
                    )
                    .at(format!("procedures.{}", name)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    #[test]
    fn test_empty_description() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "test"

            [procedures.deploy]
            description = ""
        "#,
        );

        let mut diagnostics = Vec::new();
        EmptyDescriptionLint.check(&manifest, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("deploy"));
        assert!(diagnostics[0].severity.is_warning());
    }

    #[test]
    fn test_has_description() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "test"

            [procedures.deploy]
            description = "Deploy the application"
        "#,
        );

        let mut diagnostics = Vec::new();
        EmptyDescriptionLint.check(&manifest, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
