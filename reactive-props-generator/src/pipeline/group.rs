//! Grouping of valid candidates by enclosing type.
//!
//! Groups are materialized in first-arrival order of their key, and items
//! within a group keep arrival order. Callers must not rely on either:
//! only membership is stable under reordering of the input.

use std::collections::HashMap;
use std::hash::Hash;

use crate::model::{FieldCandidate, TypeGroup};

/// Partition `(key, item)` pairs by key equality.
pub fn group_by<K, V, I>(pairs: I) -> Vec<(K, Vec<V>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();

    for (key, value) in pairs {
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(value),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![value]));
            }
        }
    }

    groups
}

/// Partition items by a caller-supplied key projection.
pub fn group_by_key<T, K, I, F>(items: I, key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
{
    group_by(items.into_iter().map(|item| (key(&item), item)))
}

/// One [`TypeGroup`] per enclosing type.
pub fn group_fields<I>(valid: I) -> Vec<TypeGroup>
where
    I: IntoIterator<Item = FieldCandidate>,
{
    group_by_key(valid, |candidate| candidate.container.clone())
        .into_iter()
        .map(|(type_id, fields)| TypeGroup::new(type_id, fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclaredType, Location, TypeId, TypeKind, TypeSegment};

    #[test]
    fn test_group_by_collects_per_key() {
        let groups = group_by(vec![("a", 1), ("b", 2), ("a", 3)]);

        assert_eq!(groups, vec![("a", vec![1, 3]), ("b", vec![2])]);
    }

    #[test]
    fn test_group_by_key_with_projection() {
        let groups = group_by_key(vec!["Apple", "avocado", "Banana"], |word| {
            word.chars().next().map(|c| c.to_ascii_lowercase())
        });

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, vec!["Apple", "avocado"]);
    }

    #[test]
    fn test_group_fields_one_group_per_type() {
        let vm = TypeId::new("App", TypeSegment::new(TypeKind::Class, "Vm"));
        let other = TypeId::new("App", TypeSegment::new(TypeKind::Class, "Other"));
        let field = |id: &TypeId, name: &str| {
            FieldCandidate::new(id.clone(), name, DeclaredType::new("int"), Location::file_only("A.cs"))
        };

        let groups = group_fields(vec![field(&vm, "_a"), field(&other, "_b"), field(&vm, "_c")]);

        assert_eq!(groups.len(), 2);
        let vm_group = groups.iter().find(|g| g.type_id == vm).unwrap();
        assert_eq!(vm_group.fields.len(), 2);
        assert!(vm_group.fields.iter().all(|f| f.container == vm));
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_fields(Vec::new()).is_empty());
    }
}
