//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `reactive-props.toml`
//! files and merging it with command-line arguments.

use std::path::{Path, PathBuf};

use reactive_props_generator::{IndentStyle, LineEnding, RenderConfig};
use serde::Deserialize;

use crate::error::{CliResult, ConfigError};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "reactive-props.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where program models are read from.
    pub input: InputConfig,

    /// Where fragments are written.
    pub output: OutputConfig,

    /// Shape of the generated text.
    pub render: RenderSection,

    /// How diagnostics are reported.
    pub diagnostics: DiagnosticsConfig,
}

/// Input configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for model files.
    pub dir: PathBuf,

    /// Extension of model files, without the dot.
    pub extension: String,

    /// Glob applied to paths relative to `dir`.
    pub filter: Option<String>,

    /// Whether `.gitignore` files are honored while scanning.
    pub respect_gitignore: bool,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,
}

/// `[render]` section, mirrored onto [`RenderConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    pub indent: IndentStyle,
    pub line_ending: LineEnding,
    pub doc_comments: bool,
    pub generated_code_attribute: bool,
    pub exclude_from_coverage: bool,
}

/// Diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Report format.
    pub format: OutputFormat,

    /// Whether error diagnostics make the command fail.
    pub fail_on_error: bool,
}

/// Report format for diagnostics and run summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, line-oriented output.
    #[default]
    Human,
    /// A single JSON document on stdout.
    Json,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            extension: "json".to_string(),
            filter: None,
            respect_gitignore: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
        }
    }
}

impl Default for RenderSection {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            indent: render.indent,
            line_ending: render.line_ending,
            doc_comments: render.doc_comments,
            generated_code_attribute: render.generated_code_attribute,
            exclude_from_coverage: render.exclude_from_coverage,
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            fail_on_error: true,
        }
    }
}

impl RenderSection {
    /// Render options for the generator.
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_indent(self.indent)
            .with_line_ending(self.line_ending)
            .with_doc_comments(self.doc_comments)
            .with_generated_code_attribute(self.generated_code_attribute)
            .with_exclude_from_coverage(self.exclude_from_coverage)
    }
}

impl Config {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = self.input.extension.as_str();
        if extension.is_empty() || extension.starts_with('.') || extension.contains('/') {
            return Err(ConfigError::invalid_value(
                "input.extension",
                format!("expected a bare extension such as \"json\", got {extension:?}"),
            ));
        }

        if let Some(filter) = &self.input.filter {
            glob::Pattern::new(filter)
                .map_err(|e| ConfigError::invalid_value("input.filter", e.to_string()))?;
        }

        Ok(())
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&config_path, &content)?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Parse and validate configuration text read from `path`.
    pub fn parse(path: &Path, content: &str) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref input) = args.input {
            config.input.dir = input.clone();
        }

        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref filter) = args.filter {
            config.input.filter = Some(filter.clone());
        }

        if let Some(format) = args.format {
            config.diagnostics.format = format;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# reactive-props configuration file

[input]
# Directory scanned for exported program models
dir = "."

# Extension of model files
extension = "json"

# Only load model files whose relative path matches this glob
# filter = "**/*.model.json"

# Skip files ignored by .gitignore
respect_gitignore = true

[output]
# Directory receiving one generated file per enclosing type
dir = "./generated"

[render]
# Indentation of generated code (spaces2, spaces4, tabs)
indent = "spaces4"

# Line endings of generated code (lf, crlf)
line_ending = "lf"

# Emit <inheritdoc> comments pointing at the backing field
doc_comments = true

# Emit [GeneratedCode] on every accessor
generated_code_attribute = true

# Emit [ExcludeFromCodeCoverage] on every accessor
exclude_from_coverage = true

[diagnostics]
# Report format (human, json)
format = "human"

# Fail the command when an error diagnostic is reported
fail_on_error = true
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Input directory override.
    pub input: Option<PathBuf>,

    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Filter pattern override.
    pub filter: Option<String>,

    /// Report format override.
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.dir, PathBuf::from("."));
        assert_eq!(config.input.extension, "json");
        assert_eq!(config.input.filter, None);
        assert!(config.input.respect_gitignore);
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.render.to_render_config(), RenderConfig::default());
        assert_eq!(config.diagnostics.format, OutputFormat::Human);
        assert!(config.diagnostics.fail_on_error);
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let config =
            ConfigManager::parse(Path::new(CONFIG_FILENAME), ConfigManager::default_config_content())
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_cli_args_output() {
        let config = Config::default();
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.diagnostics.format, OutputFormat::Json);
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let args = CliArgs::default();

        let merged = ConfigManager::merge_cli_args(config.clone(), &args);
        assert_eq!(merged, config);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[input]
dir = "./models"
extension = "model"
filter = "**/vm/*.model"

[output]
dir = "./obj/generated"

[render]
indent = "tabs"
line_ending = "crlf"
doc_comments = false

[diagnostics]
format = "json"
fail_on_error = false
"#;

        let config = ConfigManager::parse(Path::new("test.toml"), toml).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("./models"));
        assert_eq!(config.input.extension, "model");
        assert_eq!(config.input.filter.as_deref(), Some("**/vm/*.model"));
        assert_eq!(config.output.dir, PathBuf::from("./obj/generated"));
        assert_eq!(config.render.indent, IndentStyle::Tabs);
        assert_eq!(config.render.line_ending, LineEnding::CrLf);
        assert!(!config.render.doc_comments);
        assert!(config.render.generated_code_attribute);
        assert_eq!(config.diagnostics.format, OutputFormat::Json);
        assert!(!config.diagnostics.fail_on_error);
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let result = ConfigManager::parse(Path::new("test.toml"), "[input]\nextension = \".json\"\n");

        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(ConfigError::InvalidValue { ref key, .. })) if key == "input.extension"
        ));
    }

    #[test]
    fn test_rejects_invalid_filter() {
        let result = ConfigManager::parse(Path::new("test.toml"), "[input]\nfilter = \"[\"\n");

        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ConfigManager::load(Some(Path::new("/nonexistent/reactive-props.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }
}
