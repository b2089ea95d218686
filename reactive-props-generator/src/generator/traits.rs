//! Fragment renderer trait definition.
//!
//! A renderer turns the accessors synthesized for one enclosing type into the
//! text of a definition fragment the host merges into that type.

use serde::{Deserialize, Serialize};

use crate::error::GeneratorResult;
use crate::model::{AccessorSpec, TypeId};

/// Name recorded in generated-code markers.
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Version recorded in generated-code markers.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Trait for fragment renderers.
///
/// Implementations must be pure: the same type and accessors under the same
/// configuration always render the same text.
pub trait FragmentRenderer: Send + Sync {
    /// Short, lowercase identifier (e.g. "partial").
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Suffix appended to the output identifier to form the hint name.
    fn file_suffix(&self) -> &'static str;

    /// Render the fragment for `type_id`.
    ///
    /// `accessors` arrive in their final order.
    fn render(
        &self,
        type_id: &TypeId,
        accessors: &[AccessorSpec],
        config: &RenderConfig,
    ) -> GeneratorResult<String>;
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderConfig {
    pub indent: IndentStyle,
    pub line_ending: LineEnding,

    /// Emit `/// <inheritdoc cref="field"/>` above each accessor.
    pub doc_comments: bool,

    /// Emit the generated-code attribute on each accessor.
    pub generated_code_attribute: bool,

    /// Emit the exclude-from-coverage attribute on each accessor.
    pub exclude_from_coverage: bool,

    pub tool_name: String,
    pub tool_version: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            doc_comments: true,
            generated_code_attribute: true,
            exclude_from_coverage: true,
            tool_name: TOOL_NAME.to_string(),
            tool_version: TOOL_VERSION.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    #[must_use]
    pub fn with_doc_comments(mut self, enabled: bool) -> Self {
        self.doc_comments = enabled;
        self
    }

    #[must_use]
    pub fn with_generated_code_attribute(mut self, enabled: bool) -> Self {
        self.generated_code_attribute = enabled;
        self
    }

    #[must_use]
    pub fn with_exclude_from_coverage(mut self, enabled: bool) -> Self {
        self.exclude_from_coverage = enabled;
        self
    }

    /// Override the tool name and version recorded in generated-code markers.
    #[must_use]
    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self.tool_version = version.into();
        self
    }
}

/// Indentation style for rendered fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    Spaces2,
    #[default]
    Spaces4,
    Tabs,
}

impl IndentStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for rendered fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}
