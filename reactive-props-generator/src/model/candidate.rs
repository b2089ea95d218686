//! Values flowing between pipeline stages.
//!
//! Every value here is immutable once built and compares by structure, so a
//! recomputation over an unchanged snapshot produces equal values.

use std::collections::BTreeSet;

use serde::Serialize;

use super::declaration::FieldDecl;
use super::types::{DeclaredType, Location, TypeId, TypeName};

/// A syntactic match found by discovery, before symbol resolution.
#[derive(Debug, Clone, Copy)]
pub struct FieldSite<'a> {
    pub file: &'a str,
    pub container: &'a TypeId,
    pub field: &'a FieldDecl,
}

/// Attribute attached to a resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AttributeRef {
    pub name: TypeName,
    pub location: Option<Location>,
}

/// One declared field variable, resolved to its semantic identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldCandidate {
    pub container: TypeId,
    pub name: String,
    pub ty: DeclaredType,
    pub location: Location,
    pub attributes: Vec<AttributeRef>,
}

impl FieldCandidate {
    pub fn new(
        container: TypeId,
        name: impl Into<String>,
        ty: DeclaredType,
        location: Location,
    ) -> Self {
        Self {
            container,
            name: name.into(),
            ty,
            location,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<TypeName>,
        location: Option<Location>,
    ) -> Self {
        self.attributes.push(AttributeRef {
            name: name.into(),
            location,
        });
        self
    }

    /// Exact match against the resolved attribute names.
    pub fn has_attribute(&self, qualified_name: &str) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.name.as_str() == qualified_name)
    }

    /// Where to report problems with the given attribute: its own location
    /// when known, the field's otherwise.
    pub fn attribute_location(&self, qualified_name: &str) -> &Location {
        self.attributes
            .iter()
            .filter(|attribute| attribute.name.as_str() == qualified_name)
            .find_map(|attribute| attribute.location.as_ref())
            .unwrap_or(&self.location)
    }
}

/// Candidate paired with the capability check result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidityVerdict {
    pub candidate: FieldCandidate,
    pub is_valid: bool,
}

/// All valid marked fields of one enclosing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeGroup {
    pub type_id: TypeId,
    pub fields: Vec<FieldCandidate>,
}

impl TypeGroup {
    pub fn new(type_id: TypeId, fields: Vec<FieldCandidate>) -> Self {
        Self { type_id, fields }
    }

    /// Membership as a set, ignoring arrival order.
    pub fn members(&self) -> BTreeSet<&FieldCandidate> {
        self.fields.iter().collect()
    }
}

/// Read side of a generated accessor: returns the backing field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Getter {
    pub field: String,
}

/// Write side of a generated accessor: delegates to the compare-and-set
/// operation with a reference to the backing field and the new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Setter {
    pub operation: String,
    pub field: String,
}

/// Shape of one generated accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccessorSpec {
    pub name: String,
    pub ty: DeclaredType,
    pub backing_field: String,
    pub getter: Getter,
    pub setter: Setter,
}

/// Terminal artifact: one generated definition fragment per enclosing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeneratedFragment {
    /// Stable, collision-free identifier of the enclosing type.
    pub output_id: String,

    /// File name the host should store the fragment under.
    pub hint_name: String,

    pub type_id: TypeId,
    pub accessors: Vec<AccessorSpec>,
    pub text: String,
}
