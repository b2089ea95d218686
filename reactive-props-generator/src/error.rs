//! Error types for the generator.
//!
//! User mistakes are never errors here: they surface as
//! [`Diagnostic`](crate::diagnostics::Diagnostic) values. A
//! [`GeneratorError`] means a broken invariant between the pipeline and its
//! collaborators, or a cancelled run.

use thiserror::Error;

use crate::model::Location;

/// Result type alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Failure of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// A discovered field did not resolve to a symbol.
    #[error("Failed to resolve field declaration in '{container}' at {location}: {message}")]
    Resolution {
        container: String,
        location: Location,
        message: String,
    },

    /// A backing field name leaves nothing to build an accessor name from.
    #[error("Cannot derive an accessor name from field '{field}' in '{container}'")]
    InvalidAccessorName { container: String, field: String },

    /// Two distinct types derived the same output identifier.
    #[error("Output identifier '{output_id}' is derived by both '{first}' and '{second}'")]
    NamingCollision {
        output_id: String,
        first: String,
        second: String,
    },

    /// The run was superseded before it finished.
    #[error("Generation cancelled")]
    Cancelled,
}

impl GeneratorError {
    /// Create a resolution error.
    pub fn resolution(
        container: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            container: container.into(),
            location,
            message: message.into(),
        }
    }

    /// Create an invalid accessor name error.
    pub fn invalid_accessor_name(container: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidAccessorName {
            container: container.into(),
            field: field.into(),
        }
    }

    /// Create a naming collision error.
    pub fn naming_collision(
        output_id: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::NamingCollision {
            output_id: output_id.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Whether the error comes from cancellation rather than a broken invariant.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GeneratorError::Cancelled)
    }
}
