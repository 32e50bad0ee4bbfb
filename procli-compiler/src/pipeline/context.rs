//! Compilation context passed through pipeline phases.

use indexmap::IndexMap;
use procli_ir::SchemaNode;
use procli_manifest::Manifest;
use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::CompiledProcedure;

/// A procedure left out of the CLI, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredProcedure {
    pub name: String,
    pub reason: String,
}

/// Context passed through all pipeline phases.
///
/// Procedures move from `resolved` to `procedures` as they compile, or to
/// `ignored` at whichever phase rejects them.
#[derive(Debug)]
pub struct CompilationContext {
    /// The original manifest being compiled.
    pub manifest: Manifest,
    /// Input schemas converted to IR (populated by ResolvePhase).
    pub resolved: IndexMap<String, Vec<SchemaNode>>,
    /// Compiled procedures in name order (populated by CompilePhase).
    pub procedures: IndexMap<String, CompiledProcedure>,
    /// Procedures excluded from the CLI.
    pub ignored: Vec<IgnoredProcedure>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from a manifest.
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            resolved: IndexMap::new(),
            procedures: IndexMap::new(),
            ignored: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    /// Add an error diagnostic.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Exclude a procedure from the CLI.
    pub fn ignore(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        let name = name.into();
        let reason = reason.into();
        tracing::warn!(procedure = %name, %reason, "ignoring procedure");
        self.resolved.shift_remove(&name);
        self.procedures.shift_remove(&name);
        self.ignored.push(IgnoredProcedure { name, reason });
    }

    /// Get a compiled procedure by name.
    pub fn procedure(&self, name: &str) -> Option<&CompiledProcedure> {
        self.procedures.get(name)
    }

    /// Returns true if the procedure was ignored.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|i| i.name == name)
    }

    /// Why a procedure was ignored, if it was.
    pub fn ignored_reason(&self, name: &str) -> Option<&str> {
        self.ignored
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.reason.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    fn make_test_manifest() -> Manifest {
        parse_manifest(
            r#"
            [cli]
            name = "test"
        "#,
        )
    }

    #[test]
    fn test_context_creation() {
        let ctx = CompilationContext::new(make_test_manifest());

        assert!(ctx.resolved.is_empty());
        assert!(ctx.procedures.is_empty());
        assert!(ctx.ignored.is_empty());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = CompilationContext::new(make_test_manifest());

        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");
        ctx.add_info("test", "just info");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.errors().count(), 1);
        assert_eq!(ctx.warnings().count(), 1);
    }

    #[test]
    fn test_ignore_removes_resolved_schemas() {
        let mut ctx = CompilationContext::new(make_test_manifest());
        ctx.resolved.insert("add".into(), vec![SchemaNode::string()]);

        ctx.ignore("add", "Invalid input type unknown, expected object or tuple.");

        assert!(ctx.resolved.is_empty());
        assert!(ctx.is_ignored("add"));
        assert_eq!(
            ctx.ignored_reason("add"),
            Some("Invalid input type unknown, expected object or tuple.")
        );
        assert!(ctx.ignored_reason("other").is_none());
    }
}
