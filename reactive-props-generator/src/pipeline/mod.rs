//! The generation pipeline.
//!
//! Data flows strictly one way:
//!
//! ```text
//! discovery -> filter -> validate -> group -> synthesize -> emit
//!                           |
//!                           +-> diagnostics
//! ```
//!
//! Every stage is a pure function of its input. [`ReactivePropertyGenerator`]
//! runs them once over a snapshot; [`IncrementalDriver`] reruns them and
//! reuses results whose inputs did not change.

pub mod discovery;
pub mod emit;
pub mod filter;
pub mod group;
pub mod incremental;
pub mod naming;
pub mod synthesize;
pub mod validate;

use std::sync::Arc;

use tracing::debug;

use crate::diagnostics::{sort_diagnostics, Diagnostic};
use crate::error::GeneratorResult;
use crate::generator::{FragmentRenderer, PartialTypeRenderer, RenderConfig};
use crate::model::{GeneratedFragment, Program};
use crate::symbols::{ProgramSymbols, SymbolQuery};

pub use incremental::{CancellationToken, IncrementalDriver, RunStats};

/// Result of one run: fragments sorted by output identifier and diagnostics
/// sorted by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub fragments: Vec<Arc<GeneratedFragment>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratorOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Fragment generated for the given output identifier.
    pub fn fragment(&self, output_id: &str) -> Option<&GeneratedFragment> {
        self.fragments
            .iter()
            .map(Arc::as_ref)
            .find(|fragment| fragment.output_id == output_id)
    }
}

/// Runs the pipeline over a program snapshot.
pub struct ReactivePropertyGenerator {
    renderer: Box<dyn FragmentRenderer>,
    config: RenderConfig,
}

impl Default for ReactivePropertyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReactivePropertyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactivePropertyGenerator")
            .field("renderer", &self.renderer.id())
            .field("config", &self.config)
            .finish()
    }
}

impl ReactivePropertyGenerator {
    /// Generator with the partial type renderer and default options.
    pub fn new() -> Self {
        Self {
            renderer: Box::new(PartialTypeRenderer),
            config: RenderConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl FragmentRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn renderer(&self) -> &dyn FragmentRenderer {
        self.renderer.as_ref()
    }

    /// Run over `program`, resolving symbols from the program itself.
    pub fn run(&self, program: &Program) -> GeneratorResult<GeneratorOutput> {
        let symbols = ProgramSymbols::new(program);
        self.run_with(&symbols, program)
    }

    /// Run over `program` with a caller-supplied symbol service.
    pub fn run_with<Q>(&self, symbols: &Q, program: &Program) -> GeneratorResult<GeneratorOutput>
    where
        Q: SymbolQuery + ?Sized,
    {
        let types = program.declared_types();
        let candidates = discovery::discover(&types, symbols)?;

        let mut diagnostics = Vec::new();
        let mut valid = Vec::new();
        for candidate in filter::filter_marked(candidates) {
            let verdict = validate::validate(symbols, candidate);
            match validate::diagnose(&verdict) {
                Some(diagnostic) => diagnostics.push(diagnostic),
                None => valid.push(verdict.candidate),
            }
        }

        let fragments = group::group_fields(valid)
            .iter()
            .map(|group| emit::emit(group, self.renderer.as_ref(), &self.config).map(Arc::new))
            .collect::<GeneratorResult<Vec<_>>>()?;

        let output = finish(fragments, diagnostics)?;
        debug!(
            fragments = output.fragments.len(),
            diagnostics = output.diagnostics.len(),
            "Generation finished"
        );
        Ok(output)
    }
}

/// Sort both outputs and reject identifier collisions.
fn finish(
    mut fragments: Vec<Arc<GeneratedFragment>>,
    mut diagnostics: Vec<Diagnostic>,
) -> GeneratorResult<GeneratorOutput> {
    fragments.sort_by(|a, b| a.output_id.cmp(&b.output_id));
    emit::check_collisions(&fragments)?;
    sort_diagnostics(&mut diagnostics);

    Ok(GeneratorOutput {
        fragments,
        diagnostics,
    })
}
