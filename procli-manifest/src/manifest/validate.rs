//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest hierarchy, making it easier to pass validation
/// context through nested declarations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "procli.toml");
/// ctx.validate_procedure_name("users.create")?;
///
/// let nested = ctx.push("users.create");
/// assert_eq!(nested.path_string(), "users.create");
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Find the span of a procedure name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a procedure name is usable as a command path.
    pub fn validate_procedure_name(&self, name: &str) -> Result<()> {
        if let Some(reason) = validate_procedure_name(name) {
            return Err(self
                .source
                .invalid_name_error(name, reason, self.find_span(name)));
        }
        Ok(())
    }
}

/// Find the span of a procedure name in the TOML source
/// Searches for table headers like `[procedures.name]` or `[procedures."a.b"]`
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    // Quoted keys first, since dotted names must be quoted
    let quoted = [format!(".\"{}\"", name), format!(".'{}'", name)];
    for pattern in &quoted {
        if let Some(pos) = src.find(pattern) {
            // +2 to skip the dot and the opening quote
            return Some(SourceSpan::from((pos + 2, name.len())));
        }
    }

    let bare = [
        format!(".{}]", name), // [procedures.name]
        format!(".{}.", name), // [procedures.name.inputs]
    ];
    for pattern in &bare {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    None
}

/// Validate a dotted procedure name.
/// Returns None if valid, Some(reason) if invalid
///
/// Each dot-separated segment becomes one level of the command path, so every
/// segment must be a non-empty identifier (dashes allowed).
pub(crate) fn validate_procedure_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }

    for segment in name.split('.') {
        let mut chars = segment.chars();

        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(_) => return Some("each segment must start with a letter or underscore"),
            None => return Some("name cannot contain empty segments"),
        }

        for c in chars {
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                return Some("name must contain only letters, numbers, underscores and dashes");
            }
        }

        if segment.ends_with('-') {
            return Some("a segment cannot end with a dash");
        }
    }

    None
}
