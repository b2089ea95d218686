//! Symbol queries the pipeline runs against.
//!
//! The pipeline never inspects a host's representation directly. Discovery
//! resolves syntactic matches through [`SymbolQuery::resolve`] and validation
//! asks for ancestry and interfaces, so any host that can answer these three
//! questions can drive the generator.

mod program;

use std::collections::BTreeSet;

use crate::error::GeneratorResult;
use crate::model::{FieldCandidate, FieldSite, TypeName};

pub use program::ProgramSymbols;

/// Symbol resolution service.
pub trait SymbolQuery {
    /// Resolve a field declaration to one candidate per declared variable.
    fn resolve(&self, site: &FieldSite<'_>) -> GeneratorResult<Vec<FieldCandidate>>;

    /// Base-type chain of `ty`, nearest first, excluding `ty` itself.
    fn ancestors_of(&self, ty: &TypeName) -> Vec<TypeName>;

    /// Interfaces `ty` lists directly: implemented ones for classes, extended
    /// ones for interfaces.
    fn interfaces_of(&self, ty: &TypeName) -> Vec<TypeName>;

    /// Every interface `ty` implements, through its own declaration, its
    /// ancestors, and interface inheritance.
    fn all_interfaces_of(&self, ty: &TypeName) -> BTreeSet<TypeName> {
        let mut pending: Vec<TypeName> = std::iter::once(ty.clone())
            .chain(self.ancestors_of(ty))
            .flat_map(|owner| self.interfaces_of(&owner))
            .collect();

        let mut all = BTreeSet::new();
        while let Some(interface) = pending.pop() {
            if all.insert(interface.clone()) {
                pending.extend(self.interfaces_of(&interface));
            }
        }
        all
    }

    /// Whether `ty` implements `interface` (exact qualified-name match).
    fn implements(&self, ty: &TypeName, interface: &str) -> bool {
        self.all_interfaces_of(ty)
            .iter()
            .any(|candidate| candidate.as_str() == interface)
    }
}
