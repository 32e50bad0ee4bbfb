//! Adapter for the IR's own serde form.

use procli_ir::SchemaNode;
use serde::Deserialize;
use serde_json::Value;

use super::SchemaAdapter;
use crate::error::SchemaIncompatibility;

/// Reads schemas already written as [`SchemaNode`]s (`kind`-tagged).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAdapter;

impl SchemaAdapter for NativeAdapter {
    fn vendor(&self) -> &'static str {
        "procli"
    }

    fn to_ir(&self, schema: &Value) -> Result<SchemaNode, SchemaIncompatibility> {
        SchemaNode::deserialize(schema)
            .map_err(|e| SchemaIncompatibility::new(format!("Invalid procli schema: {e}")))
    }
}
