//! Reporting of run results.
//!
//! Human output is colored and line oriented. JSON output is a single
//! [`Report`] document so build tools can consume it.

use std::path::PathBuf;

use colored::Colorize;
use reactive_props_generator::{Diagnostic, Location, Severity};
use serde::Serialize;

use crate::error::{CliResult, LoadError};
use crate::generator::{GenerationPlan, Staleness};

/// Machine-readable summary of one run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub fragments: Vec<FragmentReport>,
    pub diagnostics: Vec<DiagnosticReport>,
    pub load_errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<StaleReport>,
}

#[derive(Debug, Serialize)]
pub struct FragmentReport {
    pub output_id: String,
    pub path: PathBuf,
    pub accessors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub id: &'static str,
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StaleReport {
    pub missing: Vec<PathBuf>,
    pub outdated: Vec<PathBuf>,
    pub orphaned: Vec<PathBuf>,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            id: diagnostic.id(),
            severity: diagnostic.severity(),
            location: diagnostic.location.clone(),
            message: diagnostic.message(),
        }
    }
}

impl From<&Staleness> for StaleReport {
    fn from(staleness: &Staleness) -> Self {
        Self {
            missing: staleness.missing.clone(),
            outdated: staleness.outdated.clone(),
            orphaned: staleness.orphaned.clone(),
        }
    }
}

impl Report {
    pub fn new(plan: &GenerationPlan, load_errors: &[LoadError]) -> Self {
        Self {
            fragments: plan
                .files
                .iter()
                .map(|file| FragmentReport {
                    output_id: file.fragment.output_id.clone(),
                    path: file.path.clone(),
                    accessors: file
                        .fragment
                        .accessors
                        .iter()
                        .map(|accessor| accessor.name.clone())
                        .collect(),
                })
                .collect(),
            diagnostics: plan.output.diagnostics.iter().map(Into::into).collect(),
            load_errors: load_errors.iter().map(ToString::to_string).collect(),
            stale: None,
        }
    }

    #[must_use]
    pub fn with_staleness(mut self, staleness: &Staleness) -> Self {
        self.stale = Some(staleness.into());
        self
    }

    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(std::io::Error::from)?)
    }
}

/// One colored line per diagnostic, in the usual `file:line:col: severity ID: message` form.
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let severity = match diagnostic.severity() {
        Severity::Error => diagnostic.severity().as_str().red().bold(),
        Severity::Warning => diagnostic.severity().as_str().yellow().bold(),
        Severity::Info | Severity::Hidden => diagnostic.severity().as_str().cyan(),
    };

    format!(
        "{}: {} {}: {}",
        diagnostic.location.to_string().bold(),
        severity,
        diagnostic.id().dimmed(),
        diagnostic.message()
    )
}

/// Print every diagnostic to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", format_diagnostic(diagnostic));
    }
}

/// Print load errors as warnings.
pub fn print_load_errors(errors: &[LoadError]) {
    if errors.is_empty() {
        return;
    }

    println!("{} {} model file(s) could not be loaded:", "Warning:".yellow(), errors.len());
    for error in errors {
        println!("  {}", error);
    }
}

/// Print the stale files found by `validate`.
pub fn print_staleness(staleness: &Staleness) {
    let sections = [
        ("missing", &staleness.missing),
        ("outdated", &staleness.outdated),
        ("orphaned", &staleness.orphaned),
    ];

    for (label, paths) in sections {
        for path in paths {
            println!("  {} {}", format!("{label}:").yellow(), path.display());
        }
    }
}
