//! Resolve phase - converts raw input schemas to IR.

use std::sync::Arc;

use eyre::Result;

use crate::{
    AdapterRegistry, RawSchema, SchemaIncompatibility,
    pipeline::{CompilationContext, Phase},
};

/// Phase that runs every procedure's input schemas through the adapter
/// registered for their vendor.
///
/// A procedure with any input that fails to convert is ignored, with every
/// failure in the reason.
pub struct ResolvePhase {
    registry: Arc<AdapterRegistry>,
}

impl ResolvePhase {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self { registry }
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Convert raw input schemas to IR"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut resolved = Vec::new();
        let mut failed = Vec::new();

        for name in ctx.manifest.procedure_names() {
            let Some(procedure) = ctx.manifest.procedure(name) else {
                continue;
            };

            let mut nodes = Vec::with_capacity(procedure.inputs.len());
            let mut errors = Vec::new();
            for input in &procedure.inputs {
                match self.registry.to_ir(&RawSchema::from(input)) {
                    Ok(node) => nodes.push(node),
                    Err(err) => errors.push(err),
                }
            }

            if errors.is_empty() {
                tracing::debug!(procedure = name, inputs = nodes.len(), "resolved inputs");
                resolved.push((name.to_string(), nodes));
            } else {
                failed.push((name.to_string(), SchemaIncompatibility::join(errors)));
            }
        }

        ctx.resolved.extend(resolved);
        for (name, err) in failed {
            ctx.ignore(name, err.message());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use procli_ir::SchemaNode;
    use procli_manifest::Manifest;

    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    #[test]
    fn test_resolves_in_name_order() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "test"

            [procedures.zeta]
            [[procedures.zeta.inputs]]
            schema = { type = "string" }

            [procedures.alpha]
            [[procedures.alpha.inputs]]
            vendor = "procli"
            schema = { kind = "number" }
        "#,
        );
        let mut ctx = CompilationContext::new(manifest);
        ResolvePhase::new(Arc::new(AdapterRegistry::new()))
            .run(&mut ctx)
            .unwrap();

        let names: Vec<_> = ctx.resolved.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(ctx.resolved["alpha"], vec![SchemaNode::number()]);
        assert_eq!(ctx.resolved["zeta"], vec![SchemaNode::string()]);
    }

    #[test]
    fn test_unknown_vendor_ignores_procedure() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "test"

            [procedures.ok]

            [procedures.broken]
            [[procedures.broken.inputs]]
            vendor = "valibot"
            schema = {}
        "#,
        );
        let mut ctx = CompilationContext::new(manifest);
        ResolvePhase::new(Arc::new(AdapterRegistry::new()))
            .run(&mut ctx)
            .unwrap();

        assert!(ctx.resolved.contains_key("ok"));
        assert!(!ctx.resolved.contains_key("broken"));
        assert_eq!(
            ctx.ignored_reason("broken"),
            Some("No schema adapter registered for vendor 'valibot'.")
        );
    }
}
