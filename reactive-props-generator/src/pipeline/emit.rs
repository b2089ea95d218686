//! Fragment emission.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use tracing::{trace, warn};

use super::naming::{hint_name, output_identifier};
use super::synthesize::synthesize;
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::{FragmentRenderer, RenderConfig};
use crate::model::{AccessorSpec, GeneratedFragment, TypeGroup, TypeId};

/// Accessors of a group in output order: derived name, then backing field.
pub fn ordered_accessors(group: &TypeGroup) -> GeneratorResult<Vec<AccessorSpec>> {
    let mut accessors = group
        .fields
        .iter()
        .map(synthesize)
        .collect::<GeneratorResult<Vec<_>>>()?;

    accessors.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.backing_field.cmp(&b.backing_field))
    });
    accessors.dedup();

    for pair in accessors.windows(2) {
        if pair[0].name == pair[1].name {
            warn!(
                container = %group.type_id,
                accessor = %pair[0].name,
                first = %pair[0].backing_field,
                second = %pair[1].backing_field,
                "Two backing fields derive the same accessor name"
            );
        }
    }

    Ok(accessors)
}

/// Render the fragment for one group.
pub fn emit<R>(group: &TypeGroup, renderer: &R, config: &RenderConfig) -> GeneratorResult<GeneratedFragment>
where
    R: FragmentRenderer + ?Sized,
{
    let accessors = ordered_accessors(group)?;
    let text = renderer.render(&group.type_id, &accessors, config)?;
    let output_id = output_identifier(&group.type_id);

    trace!(
        output_id = %output_id,
        accessors = accessors.len(),
        renderer = renderer.id(),
        "Emitted fragment"
    );

    Ok(GeneratedFragment {
        hint_name: hint_name(&group.type_id, renderer.file_suffix()),
        output_id,
        type_id: group.type_id.clone(),
        accessors,
        text,
    })
}

/// Fail if two distinct types share an output identifier.
pub fn check_collisions<F>(fragments: &[F]) -> GeneratorResult<()>
where
    F: Borrow<GeneratedFragment>,
{
    let mut seen: BTreeMap<&str, &TypeId> = BTreeMap::new();

    for fragment in fragments {
        let fragment = fragment.borrow();
        if let Some(first) = seen.insert(&fragment.output_id, &fragment.type_id) {
            if first != &fragment.type_id {
                return Err(GeneratorError::naming_collision(
                    fragment.output_id.clone(),
                    first.metadata_name(),
                    fragment.type_id.metadata_name(),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PartialTypeRenderer;
    use crate::model::{DeclaredType, FieldCandidate, Location, TypeKind, TypeSegment};

    fn group(fields: &[&str]) -> TypeGroup {
        let id = TypeId::new("App", TypeSegment::new(TypeKind::Class, "Vm"));
        TypeGroup::new(
            id.clone(),
            fields
                .iter()
                .map(|name| {
                    FieldCandidate::new(id.clone(), *name, DeclaredType::new("int"), Location::file_only("Vm.cs"))
                })
                .collect(),
        )
    }

    #[test]
    fn test_accessor_order_is_independent_of_field_order() {
        let forward = ordered_accessors(&group(&["_b", "m_a", "_c"])).unwrap();
        let backward = ordered_accessors(&group(&["_c", "m_a", "_b"])).unwrap();

        assert_eq!(forward, backward);
        let names: Vec<&str> = forward.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_emit_sets_identifier_and_hint() {
        let fragment = emit(&group(&["_count"]), &PartialTypeRenderer, &RenderConfig::default()).unwrap();

        assert_eq!(fragment.output_id, "App.Vm");
        assert_eq!(fragment.hint_name, "App.Vm.g.cs");
        assert_eq!(fragment.accessors.len(), 1);
        assert!(fragment.text.contains("public int Count"));
    }

    #[test]
    fn test_emit_propagates_invalid_name() {
        let result = emit(&group(&["_ok", "__"]), &PartialTypeRenderer, &RenderConfig::default());
        assert!(matches!(result, Err(GeneratorError::InvalidAccessorName { .. })));
    }

    #[test]
    fn test_collision_between_distinct_types() {
        let fragment = |id: TypeId| GeneratedFragment {
            output_id: "App.Clash".to_string(),
            hint_name: "App.Clash.g.cs".to_string(),
            type_id: id,
            accessors: Vec::new(),
            text: String::new(),
        };
        let a = fragment(TypeId::new("App", TypeSegment::new(TypeKind::Class, "Clash")));
        let b = fragment(TypeId::new("", TypeSegment::new(TypeKind::Class, "App")).nested(TypeSegment::new(TypeKind::Class, "Clash")));

        assert!(check_collisions(&[a.clone()]).is_ok());
        assert!(matches!(
            check_collisions(&[a, b]),
            Err(GeneratorError::NamingCollision { .. })
        ));
    }
}
