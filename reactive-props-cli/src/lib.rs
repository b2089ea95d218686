//! # reactive-props-cli
//!
//! Host build step for `reactive-props-generator`.
//!
//! This crate provides the core functionality of the `reactive-props` tool:
//! it discovers exported program models on disk, runs the accessor pipeline,
//! writes one file per generated fragment and reports diagnostics.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Model file discovery and filtering
//! - [`loader`] - Program model decoding and merging
//! - [`generator`] - Pipeline driver and output placement
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - File system watching for watch mode
//! - [`report`] - Human and JSON reporting
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod report;
pub mod scanner;
pub mod watcher;
pub mod writer;

pub use config::{Config, ConfigManager, OutputFormat};
pub use error::{CliError, CliResult};
pub use generator::{BuildStep, GenerationPlan, Staleness};
pub use loader::ModelLoader;
pub use scanner::{ModelFile, ModelScanner};
pub use watcher::FileWatcher;
pub use writer::{FileWriter, WriteResult};
