//! Accessor synthesis.
//!
//! The accessor name comes from the backing field: an `m_` prefix is removed
//! if present, otherwise every leading underscore is, and the first remaining
//! character is upper-cased.

use crate::capability::SET_AND_RAISE_OPERATION;
use crate::error::{GeneratorError, GeneratorResult};
use crate::model::{AccessorSpec, FieldCandidate, Getter, Setter};

const MEMBER_PREFIX: &str = "m_";

/// Derive the accessor name for a backing field.
///
/// Returns `None` when nothing is left after stripping the prefix.
pub fn accessor_name(field: &str) -> Option<String> {
    let stripped = match field.strip_prefix(MEMBER_PREFIX) {
        Some(rest) => rest,
        None => field.trim_start_matches('_'),
    };

    let mut chars = stripped.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Build the accessor for one valid candidate.
pub fn synthesize(candidate: &FieldCandidate) -> GeneratorResult<AccessorSpec> {
    let name = accessor_name(&candidate.name).ok_or_else(|| {
        GeneratorError::invalid_accessor_name(candidate.container.display_name(), &candidate.name)
    })?;

    Ok(AccessorSpec {
        name,
        ty: candidate.ty.clone(),
        backing_field: candidate.name.clone(),
        getter: Getter {
            field: candidate.name.clone(),
        },
        setter: Setter {
            operation: SET_AND_RAISE_OPERATION.to_string(),
            field: candidate.name.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclaredType, Location, TypeId, TypeKind, TypeSegment};

    #[test]
    fn test_accessor_names() {
        let cases = [
            ("_username", "Username"),
            ("_displayName", "DisplayName"),
            ("m_total", "Total"),
            ("m_x", "X"),
            ("__count", "Count"),
            ("value", "Value"),
            ("Already", "Already"),
            ("m__odd", "_odd"),
            ("_m_keep", "M_keep"),
            ("_ßeta", "SSeta"),
            ("_élan", "Élan"),
        ];

        for (field, expected) in cases {
            assert_eq!(accessor_name(field).as_deref(), Some(expected), "field {field}");
        }
    }

    #[test]
    fn test_empty_after_stripping() {
        assert_eq!(accessor_name("_"), None);
        assert_eq!(accessor_name("___"), None);
        assert_eq!(accessor_name("m_"), None);
        assert_eq!(accessor_name(""), None);
    }

    #[test]
    fn test_synthesize_shapes_getter_and_setter() {
        let candidate = FieldCandidate::new(
            TypeId::new("App", TypeSegment::new(TypeKind::Class, "UserInfo")),
            "_username",
            DeclaredType::nullable("string"),
            Location::new("UserInfo.cs", 9, 21),
        );

        let accessor = synthesize(&candidate).unwrap();

        assert_eq!(accessor.name, "Username");
        assert_eq!(accessor.ty, DeclaredType::nullable("string"));
        assert_eq!(accessor.getter.field, "_username");
        assert_eq!(accessor.setter.field, "_username");
        assert_eq!(accessor.setter.operation, SET_AND_RAISE_OPERATION);
    }

    #[test]
    fn test_synthesize_rejects_unnameable_field() {
        let candidate = FieldCandidate::new(
            TypeId::new("App", TypeSegment::new(TypeKind::Class, "Vm")),
            "_",
            DeclaredType::new("int"),
            Location::file_only("Vm.cs"),
        );

        assert_eq!(
            synthesize(&candidate),
            Err(GeneratorError::invalid_accessor_name("App.Vm", "_"))
        );
    }
}
