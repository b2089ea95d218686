//! Program model.
//!
//! The declaration tree a host exports, the identities derived from it, and
//! the immutable values the pipeline passes from stage to stage.

pub mod candidate;
pub mod declaration;
pub mod types;

pub use candidate::{
    AccessorSpec, AttributeRef, FieldCandidate, FieldSite, GeneratedFragment, Getter, Setter,
    TypeGroup, ValidityVerdict,
};
pub use declaration::{
    AttributeUsage, CompilationUnit, DeclaredTypeRef, ExternalType, FieldDecl, Member,
    NamespaceDecl, Program, TypeDecl, VariableDecl,
};
pub use types::{
    DeclaredType, Location, TypeId, TypeKind, TypeName, TypeSegment, ARITY_MARKER, GLOBAL_PREFIX,
    NESTED_SEPARATOR,
};
