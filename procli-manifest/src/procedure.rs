use serde::Deserialize;
use serde_json::Value;

use crate::{ParseContext, Result};

/// Vendor used when an input does not name one.
pub const DEFAULT_VENDOR: &str = "json-schema";

/// A procedure declaration (`[procedures.<name>]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Procedure {
    /// Description for help text
    #[serde(default)]
    pub description: String,

    /// Input schemas in declaration order. More than one input means the
    /// procedure's options are the merge of every input.
    #[serde(default)]
    pub inputs: Vec<InputSchema>,
}

/// One raw input schema with its vendor marker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSchema {
    #[serde(default = "default_vendor")]
    pub vendor: String,
    pub schema: Value,
}

fn default_vendor() -> String {
    DEFAULT_VENDOR.to_string()
}

impl Procedure {
    /// Validate the procedure's input declarations.
    ///
    /// The schemas themselves are opaque here; only their outer form is checked.
    pub fn validate(&self, ctx: &ParseContext) -> Result<()> {
        let name = ctx.path_string();

        for (index, input) in self.inputs.iter().enumerate() {
            if input.vendor.trim().is_empty() {
                return Err(ctx.source_context().invalid_input_error(
                    &name,
                    index,
                    "vendor cannot be empty",
                    ctx.find_span(&name),
                ));
            }

            if !matches!(input.schema, Value::Object(_) | Value::Bool(_)) {
                return Err(ctx.source_context().invalid_input_error(
                    &name,
                    index,
                    "schema must be a table (or a boolean schema)",
                    ctx.find_span(&name),
                ));
            }
        }
        Ok(())
    }
}
