//! Lint for procedures that map to the same command.

use std::collections::HashMap;

use procli_manifest::Manifest;

use super::super::Lint;
use crate::{naming::command_path, pipeline::Diagnostic};

/// Lint that errors when two procedure names produce the same command path.
///
/// `users.getUser` and `users.get_user` both become `users get-user`.
pub struct DuplicateCommandLint;

impl Lint for DuplicateCommandLint {
    fn name(&self) -> &'static str {
        "duplicate-command"
    }

    fn description(&self) -> &'static str {
        "Detect procedures that map to the same command path"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: HashMap<String, &str> = HashMap::new();

        for name in manifest.procedure_names() {
            let path = command_path(name).join(" ");
            if let Some(first) = seen.get(&path) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "procedure '{}' maps to command '{}' (conflicts with '{}')",
                            name, path, first
                        ),
                    )
                    .at(format!("procedures.{}", name)),
                );
            } else {
                seen.insert(path, name);
            }
        }
    }
}
