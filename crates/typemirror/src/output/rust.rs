//! Rust writer for declarations.
//!
//! Emits serde-annotated structs, enums and internally tagged unions whose
//! JSON form matches the source model's wire format.

use crate::annotations::AnnotationResolver;
use crate::hierarchy::SealedHierarchy;
use crate::ir::{Annotation, Declaration, EnumEntry, Field};
use crate::naming::{escape_if_reserved, to_field_name, to_type_name, to_variant_name, unraw};
use crate::types::{is_optional, map_type};

const INDENT: &str = "    ";

/// Derives for structs and unions. `f64` fields rule out `Eq`.
const STRUCT_DERIVES: &str = "Debug, Clone, PartialEq, Serialize, Deserialize";

/// Derives for fieldless enums.
const ENUM_DERIVES: &str = "Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize";

/// Imports every generated file starts with.
const IMPORTS: &str = "use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use std::collections::{HashMap, HashSet};
";

/// Emits declarations of one source unit as Rust source code.
pub struct RustWriter<'a> {
    resolver: &'a AnnotationResolver,
    escape_template: &'a str,
    output: String,
    blocks: usize,
}

impl<'a> RustWriter<'a> {
    pub fn new(resolver: &'a AnnotationResolver, escape_template: &'a str) -> Self {
        Self {
            resolver,
            escape_template,
            output: String::new(),
            blocks: 0,
        }
    }

    /// Write the file header naming the source unit, followed by the fixed imports.
    pub fn write_header(&mut self, unit: &str) {
        self.output.push_str(&format!(
            "// Code generated by typemirror from `{}`. DO NOT EDIT.\n\n",
            unit
        ));
        self.output.push_str(IMPORTS);
    }

    /// Number of type blocks written so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Write a struct with one line per field.
    pub fn write_struct(&mut self, decl: &Declaration) {
        self.begin_block();
        self.write_docs(decl.docs.as_deref(), 0);
        self.output.push_str(&format!("#[derive({})]\n", STRUCT_DERIVES));

        let name = self.type_ident(&decl.simple_name);
        if decl.fields.is_empty() {
            self.output.push_str(&format!("pub struct {} {{}}\n", name));
            return;
        }

        self.output.push_str(&format!("pub struct {} {{\n", name));
        for field in &decl.fields {
            self.write_field(field);
        }
        self.output.push_str("}\n");
    }

    /// Write a fieldless enum with one variant per entry.
    pub fn write_enum(&mut self, decl: &Declaration) {
        self.begin_block();
        self.write_docs(decl.docs.as_deref(), 0);
        self.output.push_str(&format!("#[derive({})]\n", ENUM_DERIVES));
        self.output
            .push_str(&format!("pub enum {} {{\n", self.type_ident(&decl.simple_name)));
        for entry in &decl.entries {
            self.write_entry(entry);
        }
        self.output.push_str("}\n");
    }

    /// Write a tagged union over the hierarchy's children, then each child struct.
    ///
    /// Writes nothing for a root without children.
    pub fn write_union(&mut self, hierarchy: &SealedHierarchy<'_>) {
        if hierarchy.children.is_empty() {
            return;
        }
        let root = hierarchy.root;

        self.begin_block();
        self.write_docs(root.docs.as_deref(), 0);
        self.output.push_str(&format!("#[derive({})]\n", STRUCT_DERIVES));
        self.output.push_str(&format!(
            "#[serde(tag = {:?})]\n",
            self.resolver.discriminator_key(root)
        ));
        self.output
            .push_str(&format!("pub enum {} {{\n", self.type_ident(&root.simple_name)));
        for child in &hierarchy.children {
            let ident = self.type_ident(&child.simple_name);
            self.write_serde_attr(&ident, &child.annotations, &child.simple_name, false);
            self.output
                .push_str(&format!("{}{}({}),\n", INDENT, ident, ident));
        }
        self.output.push_str("}\n");

        for child in &hierarchy.children {
            self.write_struct(child);
        }
    }

    /// Type names and union variants share one identifier, escaped like fields.
    fn type_ident(&self, name: &str) -> String {
        escape_if_reserved(&to_type_name(name), self.escape_template)
    }

    fn write_field(&mut self, field: &Field) {
        let ident = escape_if_reserved(&to_field_name(&field.name), self.escape_template);
        let ty = map_type(&field.ty, field.nullable);

        self.write_docs(field.docs.as_deref(), 1);
        self.write_serde_attr(&ident, &field.annotations, &field.name, is_optional(&ty));
        self.output
            .push_str(&format!("{}pub {}: {},\n", INDENT, ident, ty));
    }

    fn write_entry(&mut self, entry: &EnumEntry) {
        let ident = escape_if_reserved(&to_variant_name(&entry.name), self.escape_template);

        self.write_docs(entry.docs.as_deref(), 1);
        self.write_serde_attr(&ident, &entry.annotations, &entry.name, false);
        self.output.push_str(&format!("{}{},\n", INDENT, ident));
    }

    /// Write `#[serde(...)]` with a rename when `ident` differs from the wire
    /// name, and `skip_serializing_if` for optional fields.
    fn write_serde_attr(
        &mut self,
        ident: &str,
        annotations: &[Annotation],
        source_name: &str,
        optional: bool,
    ) {
        let wire = self.resolver.wire_name(annotations, source_name);
        let mut parts = Vec::new();
        if unraw(ident) != wire {
            parts.push(format!("rename = {:?}", wire));
        }
        if optional {
            parts.push("skip_serializing_if = \"Option::is_none\"".to_string());
        }
        if !parts.is_empty() {
            self.output
                .push_str(&format!("{}#[serde({})]\n", INDENT, parts.join(", ")));
        }
    }

    fn write_docs(&mut self, docs: Option<&str>, indent: usize) {
        let Some(docs) = docs else {
            return;
        };
        for line in doc_lines(docs) {
            self.output.push_str(&INDENT.repeat(indent));
            if line.is_empty() {
                self.output.push_str("///\n");
            } else {
                self.output.push_str(&format!("/// {}\n", line));
            }
        }
    }

    fn begin_block(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.blocks += 1;
    }
}

/// Trimmed doc lines without leading or trailing blank lines.
fn doc_lines(docs: &str) -> Vec<&str> {
    let lines: Vec<&str> = docs.lines().map(str::trim).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ir::{Primitive, TypeRef};

    const SERIAL_NAME: &str = "kotlinx.serialization.SerialName";

    fn resolver() -> AnnotationResolver {
        AnnotationResolver::from_config(&Config::default()).unwrap()
    }

    fn render(template: &str, f: impl FnOnce(&mut RustWriter<'_>)) -> String {
        let resolver = resolver();
        let mut writer = RustWriter::new(&resolver, template);
        f(&mut writer);
        writer.finish()
    }

    fn string() -> TypeRef {
        TypeRef::Primitive(Primitive::String)
    }

    #[test]
    fn nullable_field_is_skipped_when_absent() {
        let decl = Declaration::structure(
            "m.User",
            vec![Field::nullable("email", string()), Field::new("name", string())],
        );
        let out = render("{field}_", |w| w.write_struct(&decl));
        insta::assert_snapshot!(out, @r#"
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct User {
            #[serde(skip_serializing_if = "Option::is_none")]
            pub email: Option<String>,
            pub name: String,
        }
        "#);
    }

    #[test]
    fn renamed_fields_keep_wire_name() {
        let decl = Declaration::structure(
            "m.User",
            vec![
                Field::new("userName", string()),
                Field::new("id", string())
                    .with_annotation(Annotation::marker(SERIAL_NAME).with_arg("value", "user_id")),
                Field::nullable("HTTPSProxy", string()),
            ],
        );
        let out = render("{field}_", |w| w.write_struct(&decl));
        assert!(out.contains("    #[serde(rename = \"userName\")]\n    pub user_name: String,\n"));
        assert!(out.contains("    #[serde(rename = \"user_id\")]\n    pub id: String,\n"));
        assert!(out.contains(
            "    #[serde(rename = \"HTTPSProxy\", skip_serializing_if = \"Option::is_none\")]\n    pub https_proxy: Option<String>,\n"
        ));
    }

    #[test]
    fn reserved_field_with_suffix_template() {
        let decl = Declaration::structure("m.Event", vec![Field::new("type", string())]);
        let out = render("{field}_", |w| w.write_struct(&decl));
        assert!(out.contains("    #[serde(rename = \"type\")]\n    pub type_: String,\n"));
    }

    #[test]
    fn reserved_field_with_raw_template() {
        let decl = Declaration::structure("m.Event", vec![Field::new("type", string())]);
        let out = render("r#{field}", |w| w.write_struct(&decl));
        assert!(out.contains("    pub r#type: String,\n"));
        assert!(!out.contains("rename"));
    }

    #[test]
    fn raw_template_still_renames_case_changes() {
        let decl = Declaration::structure("m.Event", vec![Field::new("matchType", string())]);
        let out = render("r#{field}", |w| w.write_struct(&decl));
        assert!(out.contains("    #[serde(rename = \"matchType\")]\n    pub match_type: String,\n"));
    }

    #[test]
    fn enum_variants_rename_to_entry_names() {
        let decl = Declaration::enumeration(
            "m.Status",
            vec![
                EnumEntry::new("WAITING_FOR_APPROVAL"),
                EnumEntry::new("Done"),
                EnumEntry::new("LEGACY")
                    .with_annotation(Annotation::marker(SERIAL_NAME).with_arg("value", "old")),
            ],
        )
        .with_docs("Lifecycle of a request.");
        let out = render("{field}_", |w| w.write_enum(&decl));
        insta::assert_snapshot!(out, @r#"
        /// Lifecycle of a request.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Status {
            #[serde(rename = "WAITING_FOR_APPROVAL")]
            WaitingForApproval,
            Done,
            #[serde(rename = "old")]
            Legacy,
        }
        "#);
    }

    #[test]
    fn union_tags_children_and_emits_each_once() {
        let root = Declaration::sealed("m.Result");
        let success = Declaration::structure("m.Success", vec![Field::new("value", string())])
            .extending("m.Result");
        let failure = Declaration::structure("m.Failure", vec![Field::new("error", string())])
            .extending("m.Result");
        let hierarchy = SealedHierarchy {
            root: &root,
            children: vec![&success, &failure],
        };

        let out = render("{field}_", |w| {
            w.write_union(&hierarchy);
            assert_eq!(w.blocks(), 3);
        });
        insta::assert_snapshot!(out, @r#"
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum Result {
            Success(Success),
            Failure(Failure),
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct Success {
            pub value: String,
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct Failure {
            pub error: String,
        }
        "#);
    }

    #[test]
    fn union_variant_uses_serial_name() {
        let root = Declaration::sealed("m.Shape");
        let circle = Declaration::structure("m.Circle", vec![])
            .extending("m.Shape")
            .with_annotation(Annotation::marker(SERIAL_NAME).with_arg("value", "circle"));
        let hierarchy = SealedHierarchy {
            root: &root,
            children: vec![&circle],
        };
        let out = render("{field}_", |w| w.write_union(&hierarchy));
        assert!(out.contains("    #[serde(rename = \"circle\")]\n    Circle(Circle),\n"));
        assert!(out.contains("pub struct Circle {}\n"));
    }

    #[test]
    fn reserved_type_names_escaped_consistently() {
        let root = Declaration::sealed("m.Node");
        let this = Declaration::structure("m.Self", vec![]).extending("m.Node");
        let hierarchy = SealedHierarchy {
            root: &root,
            children: vec![&this],
        };
        let out = render("{field}_", |w| w.write_union(&hierarchy));
        assert!(out.contains("    #[serde(rename = \"Self\")]\n    Self_(Self_),\n"));
        assert!(out.contains("pub struct Self_ {}\n"));
        assert!(!out.contains("pub struct Self "));

        let kind = Declaration::enumeration("m.type", vec![EnumEntry::new("A")]);
        let out = render("{field}_", |w| w.write_enum(&kind));
        assert!(out.contains("pub enum type_ {\n"));
    }

    #[test]
    fn empty_union_writes_nothing() {
        let root = Declaration::sealed("m.Empty");
        let hierarchy = SealedHierarchy {
            root: &root,
            children: vec![],
        };
        let out = render("{field}_", |w| {
            w.write_union(&hierarchy);
            assert_eq!(w.blocks(), 0);
        });
        assert!(out.is_empty());
    }

    #[test]
    fn doc_lines_are_projected() {
        let decl = Declaration::structure(
            "m.User",
            vec![Field::new("name", string()).with_docs("Display name.\n\n  Shown in the UI.  ")],
        )
        .with_docs("\n  A user.\n");
        let out = render("{field}_", |w| w.write_struct(&decl));
        assert!(out.starts_with("/// A user.\n#[derive("));
        assert!(out.contains("    /// Display name.\n    ///\n    /// Shown in the UI.\n    pub name: String,\n"));
    }

    #[test]
    fn header_lists_imports() {
        let out = render("{field}_", |w| w.write_header("src/User.kt"));
        assert!(out.starts_with("// Code generated by typemirror from `src/User.kt`. DO NOT EDIT.\n\n"));
        assert!(out.contains("use serde::{Deserialize, Serialize};\n"));
        assert!(out.contains("use std::collections::{HashMap, HashSet};\n"));
    }
}
