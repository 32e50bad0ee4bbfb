//! Built-in lints for manifest validation.

mod duplicate_command;
mod empty_description;

pub use duplicate_command::DuplicateCommandLint;
pub use empty_description::EmptyDescriptionLint;
