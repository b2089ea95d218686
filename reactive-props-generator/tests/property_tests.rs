//! Property-based tests for reactive-props-generator.
//!
//! Properties tested:
//! - Grouping membership does not depend on input order
//! - Pipeline output does not depend on declaration order
//! - Output identifiers are injective over distinct metadata names
//! - Accessor names follow the prefix rules

use std::collections::{BTreeMap, BTreeSet, HashMap};

use proptest::prelude::*;

use reactive_props_generator::capability::{CAPABILITY_INTERFACE, MARKER_ATTRIBUTE};
use reactive_props_generator::model::{
    AttributeUsage, CompilationUnit, DeclaredType, ExternalType, FieldCandidate, FieldDecl,
    Location, TypeDecl, TypeId, TypeKind, TypeSegment, VariableDecl,
};
use reactive_props_generator::pipeline::group::group_fields;
use reactive_props_generator::pipeline::naming::output_identifier;
use reactive_props_generator::pipeline::synthesize::accessor_name;
use reactive_props_generator::{Program, ReactivePropertyGenerator};

// =============================================================================
// Generators for property tests
// =============================================================================

const OWNERS: [&str; 3] = ["Alpha", "Beta", "Plain"];

/// Owner index per field, and a permutation of the field indices.
fn arb_layout() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    prop::collection::vec(0usize..OWNERS.len(), 1..12).prop_flat_map(|owners| {
        let order: Vec<usize> = (0..owners.len()).collect();
        (Just(owners), Just(order).prop_shuffle())
    })
}

/// A type identity with lowercase namespaces and capitalized type names.
fn arb_type_id() -> impl Strategy<Value = TypeId> {
    (
        prop::collection::vec("[a-z][a-z0-9]{0,3}", 0..3),
        prop::collection::vec(("[A-Z][A-Za-z0-9]{0,3}", 0usize..3), 1..4),
    )
        .prop_map(|(namespace, segments)| {
            let segment = |(name, arity): &(String, usize)| {
                TypeSegment::new(TypeKind::Class, name.clone())
                    .with_type_parameters((0..*arity).map(|i| format!("T{i}")))
            };
            let mut id = TypeId::new(&namespace.join("."), segment(&segments[0]));
            for nested in &segments[1..] {
                id = id.nested(segment(nested));
            }
            id
        })
}

fn candidate(owner: usize, index: usize) -> FieldCandidate {
    FieldCandidate::new(
        TypeId::new("App", TypeSegment::new(TypeKind::Class, OWNERS[owner])),
        format!("_f{index}"),
        DeclaredType::new("int"),
        Location::new("A.cs", index as u32 + 1, 5),
    )
}

/// One compilation unit per field, each re-declaring the owner as a partial part.
fn program(owners: &[usize], order: &[usize]) -> Program {
    let mut program = Program::new()
        .with_reference(ExternalType::new(TypeKind::Interface, CAPABILITY_INTERFACE));

    for &index in order {
        let owner = OWNERS[owners[index]];
        let file = format!("{owner}.{index}.cs");
        let mut decl = TypeDecl::class(owner).with_field(
            FieldDecl::new(DeclaredType::new("int"))
                .with_attribute(AttributeUsage::resolved("ReactiveProperty", MARKER_ATTRIBUTE))
                .with_variable(VariableDecl::new(format!("_f{index}")).at(Location::new(&file, 4, 17))),
        );
        if owner != "Plain" {
            decl = decl.with_interface(CAPABILITY_INTERFACE);
        }
        program = program.with_unit(CompilationUnit::new(file).with_namespace("App").with_member(decl));
    }

    program
}

fn membership(groups: Vec<reactive_props_generator::model::TypeGroup>) -> BTreeMap<TypeId, BTreeSet<FieldCandidate>> {
    groups
        .into_iter()
        .map(|group| (group.type_id, group.fields.into_iter().collect()))
        .collect()
}

// =============================================================================
// Grouping order independence
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_grouping_ignores_input_order((owners, order) in arb_layout()) {
        let natural: Vec<FieldCandidate> =
            owners.iter().enumerate().map(|(i, &owner)| candidate(owner, i)).collect();
        let shuffled: Vec<FieldCandidate> =
            order.iter().map(|&i| candidate(owners[i], i)).collect();

        let expected = membership(group_fields(natural));
        let actual = membership(group_fields(shuffled));

        prop_assert_eq!(&expected, &actual);
        let total: usize = actual.values().map(BTreeSet::len).sum();
        prop_assert_eq!(total, owners.len());
    }
}

// =============================================================================
// Pipeline order independence and diagnostic locality
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pipeline_ignores_declaration_order((owners, order) in arb_layout()) {
        let natural: Vec<usize> = (0..owners.len()).collect();
        let generator = ReactivePropertyGenerator::new();

        let expected = generator.run(&program(&owners, &natural)).unwrap();
        let actual = generator.run(&program(&owners, &order)).unwrap();

        prop_assert_eq!(&expected, &actual);

        let invalid = owners.iter().filter(|&&owner| OWNERS[owner] == "Plain").count();
        let accessors: usize = actual.fragments.iter().map(|f| f.accessors.len()).sum();
        prop_assert_eq!(actual.diagnostics.len(), invalid);
        prop_assert_eq!(accessors, owners.len() - invalid);
    }
}

// =============================================================================
// Injective naming
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_output_identifiers_are_injective(ids in prop::collection::vec(arb_type_id(), 1..16)) {
        let mut seen: HashMap<String, String> = HashMap::new();

        for id in &ids {
            let output = output_identifier(id);
            let metadata = id.metadata_name();
            if let Some(previous) = seen.insert(output.clone(), metadata.clone()) {
                prop_assert_eq!(previous, metadata, "identifier {} reused", output);
            }
        }
    }

    #[test]
    fn prop_output_identifier_has_no_marker_characters(id in arb_type_id()) {
        let output = output_identifier(&id);
        prop_assert!(!output.contains('`'));
        prop_assert!(!output.contains('+'));
        prop_assert_eq!(output_identifier(&id), output);
    }
}

// =============================================================================
// Name derivation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_accessor_name_rules(
        prefix in prop::sample::select(vec!["", "_", "__", "m_"]),
        head in "[a-z]",
        tail in "[A-Za-z0-9_]{0,10}",
    ) {
        let field = format!("{prefix}{head}{tail}");
        let expected = format!("{}{}", head.to_uppercase(), tail);

        prop_assert_eq!(accessor_name(&field), Some(expected));
    }

    #[test]
    fn prop_underscores_only_have_no_name(count in 1usize..6) {
        prop_assert_eq!(accessor_name(&"_".repeat(count)), None);
    }
}
