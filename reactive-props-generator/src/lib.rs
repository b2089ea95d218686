//! # reactive-props-generator
//!
//! Build-time synthesis of change-notifying accessors for marked backing
//! fields.
//!
//! A host compiler exports its declarations as a [`Program`]. The generator
//! finds every field marked with `[ReactiveProperty]`, checks that the
//! enclosing type implements `ReactiveUI.IReactiveObject` (directly or through
//! its ancestors), and emits one partial re-declaration per enclosing type
//! holding a public property per marked field:
//!
//! ```text
//! public class UserInfoViewModel : ReactiveObject     public string Username
//! {                                                    {
//!     [ReactiveProperty]                      ==>          get => this._username;
//!     private string _username = "";                       set => RaiseAndSetIfChanged(this, ref this._username, value);
//! }                                                    }
//! ```
//!
//! Fields in types without the capability produce a diagnostic instead, and
//! generation continues for everything else.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reactive_props_generator::{Program, ReactivePropertyGenerator};
//!
//! let program: Program = serde_json::from_str(&exported_json)?;
//! let output = ReactivePropertyGenerator::new().run(&program)?;
//!
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! for fragment in &output.fragments {
//!     std::fs::write(&fragment.hint_name, &fragment.text)?;
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`model`] - Program snapshot and the values passed between stages
//! - [`symbols`] - Symbol queries the pipeline runs against
//! - [`pipeline`] - Discovery, filtering, validation, grouping, synthesis, emission
//! - [`generator`] - Fragment renderers
//! - [`diagnostics`] - Diagnostic descriptors and occurrences
//! - [`capability`] - Marker, capability and setter contract
//! - [`error`] - Error types

pub mod capability;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod symbols;

pub use diagnostics::{Diagnostic, DiagnosticDescriptor, Severity};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{FragmentRenderer, IndentStyle, LineEnding, PartialTypeRenderer, RenderConfig};
pub use model::{GeneratedFragment, Location, Program, TypeId};
pub use pipeline::{
    CancellationToken, GeneratorOutput, IncrementalDriver, ReactivePropertyGenerator, RunStats,
};
pub use symbols::{ProgramSymbols, SymbolQuery};
