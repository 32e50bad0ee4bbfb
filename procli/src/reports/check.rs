//! Check command report data structures.

use std::path::PathBuf;

use procli_compiler::pipeline::IgnoredProcedure;

use super::output::{Output, Report};

/// Report data from compiling a manifest.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub cli_name: String,
    pub cli_version: String,
    /// Procedures that compiled, in name order.
    pub compiled: Vec<CompiledInfo>,
    /// Procedures left out of the CLI.
    pub ignored: Vec<IgnoredProcedure>,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

/// A compiled procedure as listed by `check`.
#[derive(Debug)]
pub struct CompiledInfo {
    pub name: String,
    /// Space-separated command path, e.g. `users create`.
    pub command: String,
    pub usage: String,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }
        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.title(&format!("{} {}", self.cli_name, self.cli_version));
        if !self.compiled.is_empty() {
            out.section("Procedures");
            for procedure in &self.compiled {
                let line = format!("{} {}", procedure.command, procedure.usage);
                out.key_value_indented(&procedure.name, line.trim_end());
            }
        }
        if !self.ignored.is_empty() {
            out.section("Ignored");
            for ignored in &self.ignored {
                out.key_value_indented(&ignored.name, &ignored.reason);
            }
        }
        out.newline();
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
    }
}
