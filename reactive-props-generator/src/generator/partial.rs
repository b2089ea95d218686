//! Partial type re-declaration renderer.
//!
//! Renders the enclosing type again, marked `partial`, inside its namespace
//! and every containing type, and places one property per accessor in it.
//! The host merges the result with the user's own declaration.

use super::traits::{FragmentRenderer, RenderConfig};
use crate::error::GeneratorResult;
use crate::model::{AccessorSpec, TypeId, TypeSegment};

const HEADER: [&str; 3] = ["// <auto-generated/>", "#pragma warning disable", "#nullable enable"];

const GENERATED_CODE_ATTRIBUTE: &str = "global::System.CodeDom.Compiler.GeneratedCode";

const EXCLUDE_FROM_COVERAGE_ATTRIBUTE: &str =
    "global::System.Diagnostics.CodeAnalysis.ExcludeFromCodeCoverage";

/// Default renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialTypeRenderer;

impl PartialTypeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl FragmentRenderer for PartialTypeRenderer {
    fn id(&self) -> &'static str {
        "partial"
    }

    fn name(&self) -> &'static str {
        "Partial Type Renderer"
    }

    fn file_suffix(&self) -> &'static str {
        ".g.cs"
    }

    fn render(
        &self,
        type_id: &TypeId,
        accessors: &[AccessorSpec],
        config: &RenderConfig,
    ) -> GeneratorResult<String> {
        let mut out = CodeWriter::new(config);

        for line in HEADER {
            out.line(line);
        }
        out.blank();

        let has_namespace = !type_id.namespace().is_empty();
        if has_namespace {
            out.line(&format!("namespace {}", type_id.namespace_name()));
            out.open();
        }

        for segment in type_id.segments() {
            out.line(&partial_declaration(segment));
            out.open();
        }

        for (index, accessor) in accessors.iter().enumerate() {
            if index > 0 {
                out.blank();
            }
            write_property(&mut out, accessor, config);
        }

        for _ in type_id.segments() {
            out.close();
        }

        if has_namespace {
            out.close();
        }

        Ok(out.finish())
    }
}

fn partial_declaration(segment: &TypeSegment) -> String {
    format!(
        "partial {} {}",
        segment.kind.keyword(),
        segment.display_name()
    )
}

fn write_property(out: &mut CodeWriter<'_>, accessor: &AccessorSpec, config: &RenderConfig) {
    if config.doc_comments {
        out.line(&format!(
            "/// <inheritdoc cref=\"{}\"/>",
            accessor.backing_field
        ));
    }
    if config.generated_code_attribute {
        out.line(&format!(
            "[{}(\"{}\", \"{}\")]",
            GENERATED_CODE_ATTRIBUTE, config.tool_name, config.tool_version
        ));
    }
    if config.exclude_from_coverage {
        out.line(&format!("[{}]", EXCLUDE_FROM_COVERAGE_ATTRIBUTE));
    }

    out.line(&format!("public {} {}", accessor.ty, accessor.name));
    out.open();
    out.line(&format!("get => this.{};", accessor.getter.field));
    out.line(&format!(
        "set => {}(this, ref this.{}, value);",
        accessor.setter.operation, accessor.setter.field
    ));
    out.close();
}

/// Line-oriented text builder honoring the configured indentation and line
/// ending. Blank lines carry no indentation.
struct CodeWriter<'a> {
    config: &'a RenderConfig,
    depth: usize,
    buf: String,
}

impl<'a> CodeWriter<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            depth: 0,
            buf: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        self.buf.push_str(&self.config.indent.indent(self.depth));
        self.buf.push_str(text);
        self.buf.push_str(self.config.line_ending.as_str());
    }

    fn blank(&mut self) {
        self.buf.push_str(self.config.line_ending.as_str());
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::SET_AND_RAISE_OPERATION;
    use crate::generator::traits::{IndentStyle, LineEnding};
    use crate::model::{DeclaredType, Getter, Setter, TypeKind};

    fn accessor(name: &str, field: &str, ty: DeclaredType) -> AccessorSpec {
        AccessorSpec {
            name: name.to_string(),
            ty,
            backing_field: field.to_string(),
            getter: Getter {
                field: field.to_string(),
            },
            setter: Setter {
                operation: SET_AND_RAISE_OPERATION.to_string(),
                field: field.to_string(),
            },
        }
    }

    fn bare_config() -> RenderConfig {
        RenderConfig::default()
            .with_doc_comments(false)
            .with_generated_code_attribute(false)
            .with_exclude_from_coverage(false)
    }

    #[test]
    fn test_renders_global_namespace_type_without_namespace_block() {
        let id = TypeId::new("", TypeSegment::new(TypeKind::Class, "Vm"));
        let text = PartialTypeRenderer
            .render(
                &id,
                &[accessor("Count", "_count", DeclaredType::new("int"))],
                &bare_config().with_indent(IndentStyle::Spaces2),
            )
            .unwrap();

        let expected = "// <auto-generated/>\n\
                        #pragma warning disable\n\
                        #nullable enable\n\
                        \n\
                        partial class Vm\n\
                        {\n  \
                        public int Count\n  \
                        {\n    \
                        get => this._count;\n    \
                        set => global::ReactiveUI.IReactiveObjectExtensions.RaiseAndSetIfChanged(this, ref this._count, value);\n  \
                        }\n\
                        }\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_nested_generic_containers_are_redeclared() {
        let id = TypeId::new(
            "App",
            TypeSegment::new(TypeKind::Record, "Outer").with_type_parameters(["T"]),
        )
        .nested(TypeSegment::new(TypeKind::RecordStruct, "Inner"));

        let text = PartialTypeRenderer
            .render(&id, &[], &bare_config())
            .unwrap();

        assert!(text.contains("namespace App\n{\n"));
        assert!(text.contains("    partial record Outer<T>\n    {\n"));
        assert!(text.contains("        partial record struct Inner\n"));
        assert!(text.ends_with("        }\n    }\n}\n"));
    }

    #[test]
    fn test_attribute_blocks_follow_config() {
        let id = TypeId::new("App", TypeSegment::new(TypeKind::Class, "Vm"));
        let accessors = [accessor("Name", "_name", DeclaredType::nullable("string"))];

        let full = PartialTypeRenderer
            .render(&id, &accessors, &RenderConfig::default().with_tool("t", "1.2.3"))
            .unwrap();
        assert!(full.contains("/// <inheritdoc cref=\"_name\"/>"));
        assert!(full.contains("[global::System.CodeDom.Compiler.GeneratedCode(\"t\", \"1.2.3\")]"));
        assert!(full.contains("[global::System.Diagnostics.CodeAnalysis.ExcludeFromCodeCoverage]"));
        assert!(full.contains("public string? Name"));

        let bare = PartialTypeRenderer
            .render(&id, &accessors, &bare_config())
            .unwrap();
        assert!(!bare.contains("inheritdoc"));
        assert!(!bare.contains("GeneratedCode"));
        assert!(!bare.contains("ExcludeFromCodeCoverage"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let id = TypeId::new("App", TypeSegment::new(TypeKind::Class, "Vm"));
        let text = PartialTypeRenderer
            .render(
                &id,
                &[accessor("A", "_a", DeclaredType::new("int"))],
                &RenderConfig::default().with_line_ending(LineEnding::CrLf),
            )
            .unwrap();

        assert!(text.contains("\r\n"));
        assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    }

    #[test]
    fn test_properties_separated_by_blank_line() {
        let id = TypeId::new("", TypeSegment::new(TypeKind::Class, "Vm"));
        let text = PartialTypeRenderer
            .render(
                &id,
                &[
                    accessor("A", "_a", DeclaredType::new("int")),
                    accessor("B", "_b", DeclaredType::new("int")),
                ],
                &bare_config(),
            )
            .unwrap();

        assert!(text.contains("    }\n\n    public int B\n"));
    }
}
