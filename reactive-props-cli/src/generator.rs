//! Build step driver.
//!
//! Runs the accessor pipeline over a loaded program and maps each fragment
//! to a file in the output directory. The same [`BuildStep`] can be run
//! repeatedly; unchanged groups are served from the pipeline cache.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reactive_props_generator::{
    GeneratedFragment, GeneratorOutput, IncrementalDriver, Program, ReactivePropertyGenerator,
    RenderConfig, RunStats,
};

use crate::error::CliResult;

/// A fragment and the file it belongs in.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub fragment: Arc<GeneratedFragment>,
}

impl PlannedFile {
    pub fn content(&self) -> &str {
        &self.fragment.text
    }
}

/// Result of one run: what to write and what to report.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub output: GeneratorOutput,
    pub files: Vec<PlannedFile>,
    pub stats: RunStats,
}

/// Differences between a plan and the files already on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Staleness {
    /// Planned files that do not exist.
    pub missing: Vec<PathBuf>,
    /// Planned files whose content differs.
    pub outdated: Vec<PathBuf>,
    /// Generated files on disk that the plan no longer produces.
    pub orphaned: Vec<PathBuf>,
}

impl Staleness {
    pub fn is_up_to_date(&self) -> bool {
        self.missing.is_empty() && self.outdated.is_empty() && self.orphaned.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len() + self.outdated.len() + self.orphaned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pipeline runner bound to an output directory.
#[derive(Debug)]
pub struct BuildStep {
    driver: IncrementalDriver,
    output_dir: PathBuf,
}

impl BuildStep {
    pub fn new(output_dir: impl Into<PathBuf>, render: RenderConfig) -> Self {
        Self {
            driver: IncrementalDriver::new(ReactivePropertyGenerator::new().with_config(render)),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Suffix shared by every generated file name.
    pub fn file_suffix(&self) -> &'static str {
        self.driver.generator().renderer().file_suffix()
    }

    /// Run the pipeline over `program` and place each fragment.
    pub fn plan(&mut self, program: &Program) -> CliResult<GenerationPlan> {
        let output = self.driver.run(program)?;
        let stats = self.driver.last_stats();

        let files = output
            .fragments
            .iter()
            .map(|fragment| PlannedFile {
                path: self.output_dir.join(&fragment.hint_name),
                fragment: Arc::clone(fragment),
            })
            .collect();

        tracing::debug!(
            fragments = output.fragments.len(),
            diagnostics = output.diagnostics.len(),
            cached = stats.is_fully_cached(),
            "Planned generation"
        );

        Ok(GenerationPlan {
            output,
            files,
            stats,
        })
    }

    /// Compare `plan` with the contents of the output directory.
    pub fn compare(&self, plan: &GenerationPlan) -> CliResult<Staleness> {
        let mut staleness = Staleness::default();

        for file in &plan.files {
            match std::fs::read_to_string(&file.path) {
                Ok(existing) if existing == file.content() => {}
                Ok(_) => staleness.outdated.push(file.path.clone()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    staleness.missing.push(file.path.clone())
                }
                Err(e) => return Err(e.into()),
            }
        }

        let planned: BTreeSet<&Path> = plan.files.iter().map(|f| f.path.as_path()).collect();
        for path in self.generated_files()? {
            if !planned.contains(path.as_path()) {
                staleness.orphaned.push(path);
            }
        }

        Ok(staleness)
    }

    /// Files in the output directory that carry the generated suffix.
    pub fn generated_files(&self) -> CliResult<Vec<PathBuf>> {
        if !self.output_dir.is_dir() {
            return Ok(Vec::new());
        }

        let suffix = self.file_suffix();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            let is_generated = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(suffix));
            if path.is_file() && is_generated {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }
}
