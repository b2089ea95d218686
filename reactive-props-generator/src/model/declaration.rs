//! Declaration tree exported by the host compiler.
//!
//! A [`Program`] is an immutable snapshot of every compilation unit plus the
//! referenced library types the units build on. Hosts serialize it as JSON.

use serde::{Deserialize, Serialize};

use super::types::{
    split_namespace, DeclaredType, Location, TypeId, TypeKind, TypeName, TypeSegment,
};

/// Snapshot of a whole program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub units: Vec<CompilationUnit>,

    /// Types known only through metadata (referenced libraries).
    #[serde(default)]
    pub references: Vec<ExternalType>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unit(mut self, unit: CompilationUnit) -> Self {
        self.units.push(unit);
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: ExternalType) -> Self {
        self.references.push(reference);
        self
    }

    /// Append the units and references of `other`.
    pub fn merge(&mut self, other: Program) {
        self.units.extend(other.units);
        for reference in other.references {
            if !self.references.iter().any(|known| known.name == reference.name) {
                self.references.push(reference);
            }
        }
    }

    /// Every type declaration with its identity and the file it lives in,
    /// outer types before the types nested in them.
    pub fn declared_types(&self) -> Vec<DeclaredTypeRef<'_>> {
        let mut out = Vec::new();
        for unit in &self.units {
            let namespace = unit
                .namespace
                .as_deref()
                .map(split_namespace)
                .unwrap_or_default();
            collect_members(&unit.path, &namespace, &unit.members, &mut out);
        }
        out
    }
}

/// A type declaration located in the tree.
#[derive(Debug, Clone)]
pub struct DeclaredTypeRef<'a> {
    pub id: TypeId,
    pub file: &'a str,
    pub decl: &'a TypeDecl,
}

fn collect_members<'a>(
    file: &'a str,
    namespace: &[String],
    members: &'a [Member],
    out: &mut Vec<DeclaredTypeRef<'a>>,
) {
    for member in members {
        match member {
            Member::Namespace(ns) => {
                let mut inner = namespace.to_vec();
                inner.extend(split_namespace(&ns.name));
                collect_members(file, &inner, &ns.members, out);
            }
            Member::Type(decl) => {
                let id = TypeId::new(&namespace.join("."), decl.segment());
                collect_type(file, id, decl, out);
            }
        }
    }
}

fn collect_type<'a>(
    file: &'a str,
    id: TypeId,
    decl: &'a TypeDecl,
    out: &mut Vec<DeclaredTypeRef<'a>>,
) {
    let nested_ids: Vec<TypeId> = decl.nested.iter().map(|n| id.nested(n.segment())).collect();
    out.push(DeclaredTypeRef { id, file, decl });
    for (nested_id, nested) in nested_ids.into_iter().zip(&decl.nested) {
        collect_type(file, nested_id, nested, out);
    }
}

/// One source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub path: String,

    /// File-scoped namespace, applied to every member of the unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub members: Vec<Member>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: None,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }
}

/// Member of a unit or namespace block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

impl From<NamespaceDecl> for Member {
    fn from(value: NamespaceDecl) -> Self {
        Member::Namespace(value)
    }
}

impl From<TypeDecl> for Member {
    fn from(value: TypeDecl) -> Self {
        Member::Type(value)
    }
}

/// Namespace block. `name` may be dotted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }
}

/// Type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeName>,

    /// Interfaces listed on this declaration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeName>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TypeDecl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            nested: Vec::new(),
            location: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    #[must_use]
    pub fn with_type_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<TypeName>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<TypeName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_nested(mut self, nested: TypeDecl) -> Self {
        self.nested.push(nested);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// The identity segment contributed by this declaration.
    pub fn segment(&self) -> TypeSegment {
        TypeSegment::new(self.kind, self.name.clone())
            .with_type_parameters(self.type_parameters.iter().cloned())
    }
}

/// Field declaration; may declare several variables (`int a, b;`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeUsage>,

    #[serde(rename = "type")]
    pub ty: DeclaredType,

    pub variables: Vec<VariableDecl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl FieldDecl {
    pub fn new(ty: DeclaredType) -> Self {
        Self {
            attributes: Vec::new(),
            ty,
            variables: Vec::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeUsage) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_variable(mut self, variable: VariableDecl) -> Self {
        self.variables.push(variable);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Attribute as written in source, with the symbol it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeUsage {
    /// Name as written, e.g. `ReactiveProperty`.
    pub name: String,

    /// Attribute class the host resolved the usage to. `None` if unresolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<TypeName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl AttributeUsage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: None,
            location: None,
        }
    }

    pub fn resolved(name: impl Into<String>, resolved: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            resolved: Some(resolved.into()),
            location: None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Library type known through metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalType {
    pub name: TypeName,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeName>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeName>,
}

impl ExternalType {
    pub fn new(kind: TypeKind, name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            kind,
            base_type: None,
            interfaces: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<TypeName>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<TypeName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}
