//! Manifest types and parsing for procli.toml files.

mod cli;
mod file;
mod parse;
mod validate;

use std::collections::HashMap;

pub use cli::{CliConfig, CoercionConfig};
pub use file::ProcliToml;
use serde::Deserialize;
pub use validate::ParseContext;

use crate::Procedure;

/// Root manifest for procli.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// CLI metadata
    pub cli: CliConfig,

    /// Procedures keyed by their dotted name (e.g. "users.create")
    #[serde(default)]
    pub procedures: HashMap<String, Procedure>,
}

impl Manifest {
    /// Check if a procedure exists
    pub fn has_procedure(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    /// Get a procedure by name
    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    /// Procedure names in sorted order, for deterministic processing
    pub fn procedure_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.procedures.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}
