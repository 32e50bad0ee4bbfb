//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use procli_manifest::Manifest;

use super::{
    CompilationContext, Phase, PhaseInfo,
    phases::{CompilePhase, ResolvePhase, ValidatePhase},
};
use crate::AdapterRegistry;

/// The build pipeline orchestrator.
///
/// Runs the built-in phases (validate, resolve, compile) followed by any
/// user phases.
///
/// # Example
///
/// ```ignore
/// let mut registry = AdapterRegistry::new();
/// registry.register(MyAdapter);
///
/// let pipeline = Pipeline::with_registry(registry).phase(MyCustomPhase);
/// let ctx = pipeline.run(manifest)?;
/// ```
pub struct Pipeline {
    registry: Arc<AdapterRegistry>,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in adapters.
    pub fn new() -> Self {
        Self::with_registry(AdapterRegistry::new())
    }

    /// Create a pipeline resolving schemas through the given registry.
    pub fn with_registry(registry: AdapterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            phases: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// The adapter registry schemas are resolved through.
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    fn builtin_phases(&self) -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(ValidatePhase::new()),
            Box::new(ResolvePhase::new(Arc::clone(&self.registry))),
            Box::new(CompilePhase),
        ]
    }

    /// Information about every phase, in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Run the pipeline on a manifest.
    ///
    /// Executes all phases in order:
    /// 1. ValidatePhase - lints the manifest, stops on errors
    /// 2. ResolvePhase - converts raw schemas to IR
    /// 3. CompilePhase - compiles IR into CLI surfaces
    /// 4. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. Incompatible procedures
    /// are not errors: they end up in [`CompilationContext::ignored`].
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);
        self.run_with(&mut ctx)?;
        Ok(ctx)
    }

    /// Run the pipeline on an existing context, keeping its diagnostics if a
    /// phase fails.
    pub fn run_with(&self, ctx: &mut CompilationContext) -> Result<()> {
        let builtin_phases = self.builtin_phases();
        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            tracing::debug!(phase = phase.name(), "running phase");
            phase.run(ctx)?;
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
