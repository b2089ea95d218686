//! Capability validation and the diagnostics it produces.
//!
//! A candidate is valid iff its immediate enclosing type implements the
//! capability interface through its own declaration, any ancestor, or
//! interface inheritance. Containing types of a nested type play no part.

use tracing::debug;

use crate::capability::{CAPABILITY_INTERFACE, MARKER_ATTRIBUTE};
use crate::diagnostics::{Diagnostic, REACTIVE_PROPERTY_IN_NON_REACTIVE_TYPE};
use crate::model::{FieldCandidate, ValidityVerdict};
use crate::symbols::SymbolQuery;

/// Judge one candidate.
pub fn validate<Q>(symbols: &Q, candidate: FieldCandidate) -> ValidityVerdict
where
    Q: SymbolQuery + ?Sized,
{
    let is_valid = symbols.implements(&candidate.container.qualified_name(), CAPABILITY_INTERFACE);
    if !is_valid {
        debug!(
            container = %candidate.container,
            field = %candidate.name,
            "Marked field in a type without the notification capability"
        );
    }
    ValidityVerdict {
        candidate,
        is_valid,
    }
}

/// The diagnostic for an invalid verdict; `None` when valid.
pub fn diagnose(verdict: &ValidityVerdict) -> Option<Diagnostic> {
    if verdict.is_valid {
        return None;
    }

    let candidate = &verdict.candidate;
    Some(Diagnostic::new(
        REACTIVE_PROPERTY_IN_NON_REACTIVE_TYPE,
        candidate.attribute_location(MARKER_ATTRIBUTE).clone(),
        [candidate.container.display_name(), candidate.name.clone()],
    ))
}
