//! [`SymbolQuery`] over an exported [`Program`] snapshot.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::SymbolQuery;
use crate::error::{GeneratorError, GeneratorResult};
use crate::model::{AttributeRef, FieldCandidate, FieldSite, Location, Program, TypeName};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TypeInfo {
    base: Option<TypeName>,
    interfaces: Vec<TypeName>,
}

impl TypeInfo {
    fn absorb(&mut self, base: Option<&TypeName>, interfaces: &[TypeName]) {
        if self.base.is_none() {
            self.base = base.cloned();
        }
        for interface in interfaces {
            if !self.interfaces.contains(interface) {
                self.interfaces.push(interface.clone());
            }
        }
    }
}

/// Symbol table built from the declarations and references of a program.
///
/// Parts of a partial type contribute to a single entry: the base type comes
/// from whichever part names one and the interface lists are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramSymbols {
    types: HashMap<String, TypeInfo>,
}

impl ProgramSymbols {
    pub fn new(program: &Program) -> Self {
        let mut types: HashMap<String, TypeInfo> = HashMap::new();

        for reference in &program.references {
            types
                .entry(reference.name.definition_key())
                .or_default()
                .absorb(reference.base_type.as_ref(), &reference.interfaces);
        }

        for declared in program.declared_types() {
            types
                .entry(declared.id.definition_key())
                .or_default()
                .absorb(declared.decl.base_type.as_ref(), &declared.decl.interfaces);
        }

        trace!(types = types.len(), "Built program symbol table");
        Self { types }
    }

    /// Whether the type is declared or referenced by the program.
    pub fn contains(&self, ty: &TypeName) -> bool {
        self.types.contains_key(&ty.definition_key())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn info(&self, ty: &TypeName) -> Option<&TypeInfo> {
        self.types.get(&ty.definition_key())
    }
}

impl SymbolQuery for ProgramSymbols {
    fn resolve(&self, site: &FieldSite<'_>) -> GeneratorResult<Vec<FieldCandidate>> {
        let container = site.container.display_name();
        let field_location = site
            .field
            .location
            .clone()
            .unwrap_or_else(|| Location::file_only(site.file));

        if !self.types.contains_key(&site.container.definition_key()) {
            return Err(GeneratorError::resolution(
                container,
                field_location,
                "containing type is not part of the program",
            ));
        }

        if site.field.variables.is_empty() {
            return Err(GeneratorError::resolution(
                container,
                field_location,
                "field declaration declares no variables",
            ));
        }

        let mut attributes = Vec::with_capacity(site.field.attributes.len());
        for usage in &site.field.attributes {
            match &usage.resolved {
                Some(name) => attributes.push(AttributeRef {
                    name: name.clone(),
                    location: usage.location.clone(),
                }),
                None => trace!(attribute = %usage.name, container = %container, "Skipping unresolved attribute"),
            }
        }

        site.field
            .variables
            .iter()
            .map(|variable| {
                let location = variable
                    .location
                    .clone()
                    .unwrap_or_else(|| field_location.clone());

                if !is_identifier(&variable.name) {
                    return Err(GeneratorError::resolution(
                        container.clone(),
                        location,
                        format!("'{}' is not a valid field name", variable.name),
                    ));
                }

                Ok(FieldCandidate {
                    container: site.container.clone(),
                    name: variable.name.clone(),
                    ty: site.field.ty.clone(),
                    location,
                    attributes: attributes.clone(),
                })
            })
            .collect()
    }

    fn ancestors_of(&self, ty: &TypeName) -> Vec<TypeName> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([ty.definition_key()]);
        let mut current = ty.clone();

        while let Some(base) = self.info(&current).and_then(|info| info.base.clone()) {
            if !seen.insert(base.definition_key()) {
                trace!(ty = %ty, base = %base, "Base type cycle, stopping ancestor walk");
                break;
            }
            ancestors.push(base.clone());
            current = base;
        }

        ancestors
    }

    fn interfaces_of(&self, ty: &TypeName) -> Vec<TypeName> {
        self.info(ty)
            .map(|info| info.interfaces.clone())
            .unwrap_or_default()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
