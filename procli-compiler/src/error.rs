//! Error types for compiling and decoding.

use miette::Diagnostic;
use procli_ir::SchemaNode;
use thiserror::Error;

/// A shape the compiler cannot turn into a CLI surface.
///
/// Raised at build time and scoped to one procedure: the procedure is left
/// out of the CLI with [`SchemaIncompatibility::message`] recorded as the
/// reason, while every other procedure still builds.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(procli::schema_incompatibility))]
pub struct SchemaIncompatibility {
    message: String,
}

impl SchemaIncompatibility {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable reason.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Combine several failures into one, newline-joined.
    pub fn join(errors: impl IntoIterator<Item = SchemaIncompatibility>) -> Self {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        Self::new(messages.join("\n"))
    }

    pub(crate) fn additional_properties() -> Self {
        Self::new("Invalid input type: inputs with additional properties are not currently supported.")
    }

    pub(crate) fn nullable_array(array: &SchemaNode) -> Self {
        Self::new(format!(
            "Invalid input type {}. Nullable arrays are not supported.",
            array.type_display()
        ))
    }

    pub(crate) fn non_primitive_array(array: &SchemaNode) -> Self {
        Self::new(format!(
            "Invalid input type {}. Array elements must be strings, numbers or booleans.",
            array.type_display()
        ))
    }

    pub(crate) fn non_primitive_positional(tuple: &SchemaNode) -> Self {
        Self::new(format!(
            "Invalid input type {}. Positional parameters must be strings, numbers or booleans.",
            tuple.type_display()
        ))
    }

    pub(crate) fn non_object_tail(tuple: &SchemaNode) -> Self {
        Self::new(format!(
            "Invalid input type {}. The last type must accept object inputs.",
            tuple.type_display()
        ))
    }

    pub(crate) fn array_not_last(tuple: &SchemaNode) -> Self {
        Self::new(format!(
            "Invalid input type {}. Array positional parameters must be the last positional parameter.",
            tuple.type_display()
        ))
    }

    pub(crate) fn unconvertible(node: &SchemaNode) -> Self {
        Self::new(format!(
            "Invalid input type {}, expected object or tuple.",
            node.type_display()
        ))
    }

    pub(crate) fn multi_input_positionals() -> Self {
        Self::new("Can't use positional parameters with multi-input type.")
    }

    pub(crate) fn unknown_vendor(vendor: &str) -> Self {
        Self::new(format!("No schema adapter registered for vendor '{vendor}'."))
    }

    pub(crate) fn adapter_unavailable(vendor: &str, reason: &str) -> Self {
        Self::new(format!(
            "Schema adapter for vendor '{vendor}' is unavailable: {reason}"
        ))
    }
}

/// Decoded argv does not match the shape the compiled procedure expects.
///
/// Fatal to the single invocation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CliValidationError {
    #[error("expected at most {expected} positional value(s), got {actual}")]
    #[diagnostic(code(procli::too_many_positionals))]
    TooManyPositionals { expected: usize, actual: usize },

    #[error("missing required positional parameter '{name}' at position {position}")]
    #[diagnostic(code(procli::missing_positional))]
    MissingPositional { position: usize, name: String },

    #[error("expected a list of values for positional parameter at position {position}")]
    #[diagnostic(
        code(procli::expected_array),
        help("array positional parameters collect every remaining value")
    )]
    ExpectedArray { position: usize },

    #[error("expected a single value for positional parameter at position {position}, got a list")]
    #[diagnostic(code(procli::expected_single))]
    ExpectedSingle { position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_newline_separated() {
        let joined = SchemaIncompatibility::join([
            SchemaIncompatibility::new("first"),
            SchemaIncompatibility::new("second"),
        ]);
        assert_eq!(joined.message(), "first\nsecond");
    }

    #[test]
    fn test_messages_name_the_shape() {
        let array = SchemaNode::array(SchemaNode::any_of([
            SchemaNode::string(),
            SchemaNode::null(),
        ]));
        assert_eq!(
            SchemaIncompatibility::nullable_array(&array).to_string(),
            "Invalid input type Array<string | null>. Nullable arrays are not supported."
        );
    }

    #[test]
    fn test_cli_validation_display() {
        let err = CliValidationError::MissingPositional {
            position: 1,
            name: "file".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing required positional parameter 'file' at position 1"
        );
    }
}
