//! Incremental re-execution of the pipeline.
//!
//! [`IncrementalDriver`] keeps the verdict of every candidate and the fragment
//! of every group from the previous run, keyed by structural equality. A
//! rerun over an unchanged snapshot reuses all of them, so unchanged
//! fragments come back as the very same `Arc`.
//!
//! Verdicts also depend on the type hierarchy. The driver remembers the
//! symbol table they were computed against and drops them when it changes.
//!
//! The caches are replaced only when a run completes. A cancelled or failed
//! run leaves them as they were.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use super::{
    discovery, emit, filter, finish, group, validate, GeneratorOutput, ReactivePropertyGenerator,
};
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::RenderConfig;
use crate::model::{FieldCandidate, GeneratedFragment, Program, TypeGroup, TypeId, ValidityVerdict};
use crate::symbols::ProgramSymbols;

/// Shared flag that asks a running pipeline to stop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self) -> GeneratorResult<()> {
        if self.is_cancelled() {
            Err(GeneratorError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Cache behavior of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub verdict_hits: usize,
    pub verdict_misses: usize,
    pub fragment_hits: usize,
    pub fragment_misses: usize,
    /// Cache entries dropped because the run no longer produced them.
    pub evicted: usize,
}

impl RunStats {
    /// Whether the run recomputed nothing.
    pub fn is_fully_cached(&self) -> bool {
        self.verdict_misses == 0 && self.fragment_misses == 0
    }
}

/// Group identity with membership in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    type_id: TypeId,
    fields: Vec<FieldCandidate>,
}

impl GroupKey {
    fn of(group: &TypeGroup) -> Self {
        let mut fields = group.fields.clone();
        fields.sort();
        Self {
            type_id: group.type_id.clone(),
            fields,
        }
    }
}

/// Pipeline runner that memoizes per-candidate and per-group results.
#[derive(Debug, Default)]
pub struct IncrementalDriver {
    generator: ReactivePropertyGenerator,
    symbols: Option<ProgramSymbols>,
    verdicts: HashMap<FieldCandidate, bool>,
    fragments: HashMap<GroupKey, Arc<GeneratedFragment>>,
    last_stats: RunStats,
}

impl IncrementalDriver {
    pub fn new(generator: ReactivePropertyGenerator) -> Self {
        Self {
            generator,
            ..Self::default()
        }
    }

    pub fn generator(&self) -> &ReactivePropertyGenerator {
        &self.generator
    }

    /// Replace the render options. Cached fragments are dropped since their
    /// text depends on them.
    pub fn set_config(&mut self, config: RenderConfig) {
        if &config != self.generator.config() {
            self.fragments.clear();
        }
        let generator = std::mem::take(&mut self.generator);
        self.generator = generator.with_config(config);
    }

    /// Statistics of the last completed run.
    pub fn last_stats(&self) -> RunStats {
        self.last_stats
    }

    /// Number of cached verdicts and fragments.
    pub fn cache_len(&self) -> (usize, usize) {
        (self.verdicts.len(), self.fragments.len())
    }

    /// Run over `program` without cancellation.
    pub fn run(&mut self, program: &Program) -> GeneratorResult<GeneratorOutput> {
        self.run_cancellable(program, &CancellationToken::new())
    }

    /// Run over `program`, checking `token` between stages and between groups.
    pub fn run_cancellable(
        &mut self,
        program: &Program,
        token: &CancellationToken,
    ) -> GeneratorResult<GeneratorOutput> {
        let mut stats = RunStats::default();

        let symbols = ProgramSymbols::new(program);
        let symbols_changed = self.symbols.as_ref() != Some(&symbols);
        if symbols_changed {
            trace!("Type hierarchy changed, cached verdicts are stale");
        }
        token.check()?;

        let types = program.declared_types();
        let candidates = discovery::discover(&types, &symbols)?;
        token.check()?;

        let mut verdicts = HashMap::new();
        let mut diagnostics = Vec::new();
        let mut valid = Vec::new();
        for candidate in filter::filter_marked(candidates) {
            let cached = if symbols_changed {
                None
            } else {
                self.verdicts.get(&candidate).copied()
            };

            let is_valid = match cached {
                Some(is_valid) => {
                    stats.verdict_hits += 1;
                    is_valid
                }
                None => {
                    stats.verdict_misses += 1;
                    validate::validate(&symbols, candidate.clone()).is_valid
                }
            };
            verdicts.insert(candidate.clone(), is_valid);

            let verdict = ValidityVerdict {
                candidate,
                is_valid,
            };
            match validate::diagnose(&verdict) {
                Some(diagnostic) => diagnostics.push(diagnostic),
                None => valid.push(verdict.candidate),
            }
        }
        token.check()?;

        let mut fragments = HashMap::new();
        let mut output = Vec::new();
        for group in group::group_fields(valid) {
            token.check()?;

            let key = GroupKey::of(&group);
            let fragment = match self.fragments.get(&key) {
                Some(fragment) => {
                    stats.fragment_hits += 1;
                    Arc::clone(fragment)
                }
                None => {
                    stats.fragment_misses += 1;
                    Arc::new(emit::emit(
                        &group,
                        self.generator.renderer(),
                        self.generator.config(),
                    )?)
                }
            };
            fragments.insert(key, Arc::clone(&fragment));
            output.push(fragment);
        }

        let result = finish(output, diagnostics)?;
        token.check()?;

        stats.evicted = self
            .verdicts
            .keys()
            .filter(|candidate| !verdicts.contains_key(*candidate))
            .count()
            + self
                .fragments
                .keys()
                .filter(|key| !fragments.contains_key(*key))
                .count();

        self.symbols = Some(symbols);
        self.verdicts = verdicts;
        self.fragments = fragments;
        self.last_stats = stats;

        debug!(
            verdict_hits = stats.verdict_hits,
            verdict_misses = stats.verdict_misses,
            fragment_hits = stats.fragment_hits,
            fragment_misses = stats.fragment_misses,
            evicted = stats.evicted,
            "Incremental run finished"
        );

        Ok(result)
    }
}
