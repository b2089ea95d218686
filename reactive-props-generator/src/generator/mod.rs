//! Fragment renderers.
//!
//! This module defines the renderer trait and the default renderer that
//! produces partial type re-declarations.

pub mod partial;
pub mod traits;

pub use partial::PartialTypeRenderer;
pub use traits::{FragmentRenderer, IndentStyle, LineEnding, RenderConfig, TOOL_NAME, TOOL_VERSION};
