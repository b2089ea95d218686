//! Type identities and references.
//!
//! [`TypeId`] is the structural identity of a type declared in the program.
//! [`TypeName`] is a fully qualified reference as written by the host, which
//! may point at a declared type or at a referenced library type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix carried by every fully qualified name.
pub const GLOBAL_PREFIX: &str = "global::";

/// Separator between a type name and its generic arity in metadata names.
pub const ARITY_MARKER: char = '`';

/// Separator between a containing type and a nested type in metadata names.
pub const NESTED_SEPARATOR: char = '+';

/// Kind of a type declaration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Record,
    RecordStruct,
    Struct,
    Interface,
}

impl TypeKind {
    /// Keyword used when re-declaring a type of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Record => "record",
            TypeKind::RecordStruct => "record struct",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
        }
    }

    /// Whether fields declared directly in this kind of type are scanned for markers.
    pub fn admits_marked_fields(&self) -> bool {
        matches!(
            self,
            TypeKind::Class | TypeKind::Record | TypeKind::RecordStruct
        )
    }
}

/// One type level of a [`TypeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeSegment {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
}

impl TypeSegment {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_parameters: Vec::new(),
        }
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

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Name as stored in metadata, e.g. ``Outer`1``.
    pub fn metadata_name(&self) -> String {
        match self.arity() {
            0 => self.name.clone(),
            n => format!("{}{}{}", self.name, ARITY_MARKER, n),
        }
    }

    /// Name as written in source, e.g. `Outer<T>`.
    pub fn display_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}<{}>", self.name, self.type_parameters.join(", "))
        }
    }
}

/// Structural identity of a declared type.
///
/// Two declarations of the same type (e.g. the parts of a partial type spread
/// over several files) produce equal identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    namespace: Vec<String>,
    segments: Vec<TypeSegment>,
}

impl TypeId {
    /// Create an identity for a top-level type in `namespace` (dotted, may be empty).
    pub fn new(namespace: &str, segment: TypeSegment) -> Self {
        Self {
            namespace: split_namespace(namespace),
            segments: vec![segment],
        }
    }

    /// Identity of a type nested directly inside `self`.
    pub fn nested(&self, segment: TypeSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self {
            namespace: self.namespace.clone(),
            segments,
        }
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Type levels from outermost to innermost.
    pub fn segments(&self) -> &[TypeSegment] {
        &self.segments
    }

    /// The innermost segment, i.e. the type itself.
    pub fn segment(&self) -> &TypeSegment {
        self.segments
            .last()
            .expect("TypeId always holds at least one segment")
    }

    pub fn name(&self) -> &str {
        &self.segment().name
    }

    pub fn kind(&self) -> TypeKind {
        self.segment().kind
    }

    /// Identity of the containing type, if this type is nested.
    pub fn containing(&self) -> Option<TypeId> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            namespace: self.namespace.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Dotted namespace, empty for the global namespace.
    pub fn namespace_name(&self) -> String {
        self.namespace.join(".")
    }

    /// Full metadata name, e.g. ``App.Outer`1+Inner``.
    pub fn metadata_name(&self) -> String {
        let types = self
            .segments
            .iter()
            .map(TypeSegment::metadata_name)
            .collect::<Vec<_>>()
            .join(&NESTED_SEPARATOR.to_string());

        if self.namespace.is_empty() {
            types
        } else {
            format!("{}.{}", self.namespace_name(), types)
        }
    }

    /// Human readable name used in messages, e.g. `App.Outer<T>.Inner`.
    pub fn display_name(&self) -> String {
        self.namespace
            .iter()
            .cloned()
            .chain(self.segments.iter().map(TypeSegment::display_name))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Fully qualified reference to this type, e.g. `global::App.Outer<T>.Inner`.
    pub fn qualified_name(&self) -> TypeName {
        TypeName::new(self.display_name())
    }

    /// Lookup key shared with [`TypeName::definition_key`].
    pub fn definition_key(&self) -> String {
        let path = self
            .namespace
            .iter()
            .cloned()
            .chain(self.segments.iter().map(TypeSegment::metadata_name))
            .collect::<Vec<_>>()
            .join(".");
        format!("{}{}", GLOBAL_PREFIX, path)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Split a dotted namespace into its segments, ignoring empty parts.
pub fn split_namespace(namespace: &str) -> Vec<String> {
    namespace
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fully qualified type reference, always starting with `global::`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.starts_with(GLOBAL_PREFIX) {
            Self(trimmed.to_string())
        } else {
            Self(format!("{}{}", GLOBAL_PREFIX, trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key with type arguments erased and replaced by their count.
    ///
    /// `global::App.Base<global::System.String>` becomes ``global::App.Base`1``,
    /// matching the key of the declaration `App.Base<T>`.
    pub fn definition_key(&self) -> String {
        let mut key = String::with_capacity(self.0.len());
        let mut depth = 0usize;
        let mut arity = 0usize;

        for ch in self.0.chars() {
            match ch {
                '<' => {
                    if depth == 0 {
                        arity = 1;
                    }
                    depth += 1;
                }
                '>' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        key.push(ARITY_MARKER);
                        key.push_str(&arity.to_string());
                    }
                }
                ',' if depth == 1 => arity += 1,
                c if depth == 0 && !c.is_whitespace() => key.push(c),
                _ => {}
            }
        }

        key
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TypeName> for String {
    fn from(value: TypeName) -> Self {
        value.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared type of a field, copied verbatim into generated accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclaredType {
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
}

impl DeclaredType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Source position, 1-based. A zero line means the position is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// A location that only knows its file.
    pub fn file_only(file: impl Into<String>) -> Self {
        Self::new(file, 0, 0)
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            f.write_str(&self.file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outer_inner() -> TypeId {
        TypeId::new(
            "App",
            TypeSegment::new(TypeKind::Class, "Outer").with_type_parameters(["T"]),
        )
        .nested(TypeSegment::new(TypeKind::Class, "Inner"))
    }

    #[test]
    fn test_metadata_name_encodes_arity_and_nesting() {
        assert_eq!(outer_inner().metadata_name(), "App.Outer`1+Inner");
    }

    #[test]
    fn test_display_and_qualified_names() {
        let id = outer_inner();
        assert_eq!(id.display_name(), "App.Outer<T>.Inner");
        assert_eq!(id.qualified_name().as_str(), "global::App.Outer<T>.Inner");
    }

    #[test]
    fn test_global_namespace_type() {
        let id = TypeId::new("", TypeSegment::new(TypeKind::Record, "Settings"));
        assert_eq!(id.metadata_name(), "Settings");
        assert_eq!(id.definition_key(), "global::Settings");
        assert!(id.containing().is_none());
    }

    #[test]
    fn test_containing_type() {
        let id = outer_inner();
        let outer = id.containing().unwrap();
        assert_eq!(outer.name(), "Outer");
        assert_eq!(outer.segments.len(), 1);
    }

    #[test]
    fn test_type_name_adds_global_prefix() {
        assert_eq!(TypeName::new("App.Foo").as_str(), "global::App.Foo");
        assert_eq!(TypeName::new("global::App.Foo").as_str(), "global::App.Foo");
    }

    #[test]
    fn test_definition_key_erases_type_arguments() {
        let reference = TypeName::new(
            "global::App.Base<global::System.Collections.Generic.Dictionary<string, int>, int>",
        );
        assert_eq!(reference.definition_key(), "global::App.Base`2");

        let declared = TypeId::new(
            "App",
            TypeSegment::new(TypeKind::Class, "Base").with_type_parameters(["TKey", "TValue"]),
        );
        assert_eq!(declared.definition_key(), reference.definition_key());
    }

    #[test]
    fn test_definition_key_of_nested_generic() {
        let reference = TypeName::new("global::App.Outer<int>.Inner");
        assert_eq!(reference.definition_key(), outer_inner().definition_key());
    }

    #[test]
    fn test_declared_type_display() {
        assert_eq!(DeclaredType::new("string").to_string(), "string");
        assert_eq!(DeclaredType::nullable("string").to_string(), "string?");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("a.cs", 3, 9).to_string(), "a.cs:3:9");
        assert_eq!(Location::file_only("a.cs").to_string(), "a.cs");
    }
}
