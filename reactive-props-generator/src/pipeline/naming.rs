//! Output identifiers for generated fragments.
//!
//! The identifier is the metadata name of the enclosing type with the arity
//! marker and the nested-type separator both replaced by `.`:
//! ``App.Outer`1+Inner`` becomes `App.Outer.1.Inner`. The arity digit stays,
//! so `Outer` and `Outer<T>` never share an identifier.

use crate::model::{TypeId, ARITY_MARKER, NESTED_SEPARATOR};

/// Stable identifier of the fragment generated for `type_id`.
pub fn output_identifier(type_id: &TypeId) -> String {
    type_id
        .metadata_name()
        .replace([ARITY_MARKER, NESTED_SEPARATOR], ".")
}

/// File name the host stores the fragment under.
pub fn hint_name(type_id: &TypeId, suffix: &str) -> String {
    format!("{}{}", output_identifier(type_id), suffix)
}
