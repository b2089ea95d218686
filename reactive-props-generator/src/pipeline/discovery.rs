//! Declaration discovery.
//!
//! Walks the declaration tree for field declarations that sit directly in a
//! class or record and carry at least one attribute, then resolves each one
//! to candidates through the symbol service.

use tracing::trace;

use crate::error::GeneratorResult;
use crate::model::{DeclaredTypeRef, FieldCandidate, FieldSite};
use crate::symbols::SymbolQuery;

/// Field declarations worth resolving, in declaration order.
pub fn field_sites<'a>(types: &'a [DeclaredTypeRef<'a>]) -> impl Iterator<Item = FieldSite<'a>> + 'a {
    types
        .iter()
        .filter(|declared| declared.decl.kind.admits_marked_fields())
        .flat_map(|declared| {
            declared
                .decl
                .fields
                .iter()
                .filter(|field| !field.attributes.is_empty())
                .map(move |field| FieldSite {
                    file: declared.file,
                    container: &declared.id,
                    field,
                })
        })
}

/// Resolve every discovered site. A site that fails to resolve fails the run.
pub fn discover<Q>(types: &[DeclaredTypeRef<'_>], symbols: &Q) -> GeneratorResult<Vec<FieldCandidate>>
where
    Q: SymbolQuery + ?Sized,
{
    let mut candidates = Vec::new();
    for site in field_sites(types) {
        let resolved = symbols.resolve(&site)?;
        trace!(
            container = %site.container,
            variables = resolved.len(),
            "Resolved field declaration"
        );
        candidates.extend(resolved);
    }
    Ok(candidates)
}
