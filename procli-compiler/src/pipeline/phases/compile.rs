//! Compile phase - turns resolved IR into CLI surfaces.

use eyre::Result;

use crate::{
    CoercionPolicy, compile_inputs,
    pipeline::{CompilationContext, Phase},
};

/// Phase that compiles every resolved procedure.
///
/// The coercion policy comes from the manifest's `[cli.coercion]` table.
/// Procedures that fail to compile are ignored.
pub struct CompilePhase;

impl Phase for CompilePhase {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn description(&self) -> &'static str {
        "Compile input schemas into positional parameters and flags"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let policy = CoercionPolicy::from(ctx.manifest.cli.coercion);

        let results: Vec<_> = ctx
            .resolved
            .iter()
            .map(|(name, inputs)| (name.clone(), compile_inputs(inputs, policy)))
            .collect();

        for (name, result) in results {
            match result {
                Ok(compiled) => {
                    tracing::debug!(
                        procedure = %name,
                        positionals = compiled.positional_parameters.len(),
                        flags = compiled.has_flags(),
                        "compiled procedure"
                    );
                    ctx.procedures.insert(name, compiled);
                }
                Err(err) => ctx.ignore(name, err.message()),
            }
        }

        tracing::info!(
            compiled = ctx.procedures.len(),
            ignored = ctx.ignored.len(),
            "compilation finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use procli_ir::{ObjectShape, SchemaNode};
    use procli_manifest::Manifest;

    use super::*;

    fn parse_manifest(content: &str) -> Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    #[test]
    fn test_failures_are_isolated() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "test"
        "#,
        );
        let mut ctx = CompilationContext::new(manifest);
        ctx.resolved
            .insert("good".into(), vec![SchemaNode::string()]);
        ctx.resolved.insert(
            "bad".into(),
            vec![SchemaNode::array(SchemaNode::any_of([
                SchemaNode::string(),
                SchemaNode::null(),
            ]))],
        );
        ctx.resolved.insert(
            "merged".into(),
            vec![
                SchemaNode::object(ObjectShape::new()),
                SchemaNode::object(ObjectShape::new()),
            ],
        );

        CompilePhase.run(&mut ctx).unwrap();

        assert!(ctx.procedure("good").is_some());
        assert!(ctx.procedure("merged").is_some());
        assert!(ctx.procedure("bad").is_none());
        assert!(
            ctx.ignored_reason("bad")
                .is_some_and(|reason| reason.contains("Nullable arrays are not supported."))
        );
    }

    #[test]
    fn test_policy_from_manifest() {
        let manifest = parse_manifest(
            r#"
            [cli]
            name = "test"

            [cli.coercion]
            forward_non_integral = false
        "#,
        );
        let mut ctx = CompilationContext::new(manifest);
        ctx.resolved.insert("n".into(), vec![SchemaNode::integer()]);

        CompilePhase.run(&mut ctx).unwrap();

        assert_eq!(
            ctx.procedure("n").map(|p| p.policy()),
            Some(CoercionPolicy::STRICT)
        );
    }
}
