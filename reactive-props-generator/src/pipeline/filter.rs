//! Marker filter: keep candidates annotated with the exact marker.

use crate::capability::MARKER_ATTRIBUTE;
use crate::model::FieldCandidate;

/// Whether the candidate carries the marker attribute.
pub fn is_marked(candidate: &FieldCandidate) -> bool {
    candidate.has_attribute(MARKER_ATTRIBUTE)
}

/// Keep marked candidates, preserving order.
pub fn filter_marked<I>(candidates: I) -> impl Iterator<Item = FieldCandidate>
where
    I: IntoIterator<Item = FieldCandidate>,
{
    candidates.into_iter().filter(is_marked)
}
