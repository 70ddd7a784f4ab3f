//! Declaration model consumed by the generator.
//!
//! The introspection layer that discovers annotated declarations produces
//! these values once per pass. The engine only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A struct, enum or sealed-root declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// The shape of the declaration.
    pub kind: DeclarationKind,
    /// Fully qualified name (e.g., "com.example.model.User").
    pub qualified_name: String,
    /// Simple name (e.g., "User").
    pub simple_name: String,
    /// Package or namespace the declaration lives in.
    #[serde(default)]
    pub package: Option<String>,
    /// Source unit (file) the declaration was discovered in.
    #[serde(default)]
    pub source_unit: Option<String>,
    /// Documentation comment.
    #[serde(default)]
    pub docs: Option<String>,
    /// Properties, in declaration order. Only meaningful for structs.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Entries, in declaration order. Only meaningful for enums.
    #[serde(default)]
    pub entries: Vec<EnumEntry>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Qualified names of declared supertypes.
    #[serde(default)]
    pub supertypes: Vec<String>,
}

/// The kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// A record with named fields.
    Struct,
    /// A closed set of named constants.
    Enum,
    /// The root of a closed hierarchy whose subtypes are all known.
    SealedRoot,
}

/// A property of a struct declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Property name as declared in the source model.
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// An entry of an enum declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumEntry {
    pub name: String,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// An annotation attached to a declaration, field or entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully qualified annotation name (e.g., "kotlinx.serialization.SerialName").
    pub qualified_name: String,
    /// Named arguments and their values.
    #[serde(default)]
    pub arguments: BTreeMap<String, serde_json::Value>,
}

/// A reference to a type in the source model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(Primitive),

    // Collections
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    Map { key: Box<TypeRef>, value: Box<TypeRef> },

    /// A user-defined declaration, by simple name.
    Named(String),

    /// A temporal or identifier value with a canonical string form.
    WellKnown(WellKnown),

    /// A type the introspection layer could not resolve, with its source spelling.
    Unresolved(String),
}

/// Scalar kinds of the source type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    I32,
    I64,
    I16,
    I8,
    U32,
    U16,
    U8,
    U64,
    Double,
    Float,
    Boolean,
    Char,
}

/// Value types that serialize to a canonical string (ISO-8601, RFC 4122).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellKnown {
    Date,
    Time,
    DateTime,
    Instant,
    OffsetDateTime,
    ZonedDateTime,
    Duration,
    Uuid,
}

impl Declaration {
    fn new(kind: DeclarationKind, qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        let package = qualified_name
            .rsplit_once('.')
            .map(|(package, _)| package.to_string());
        Self {
            kind,
            qualified_name,
            simple_name,
            package,
            source_unit: None,
            docs: None,
            fields: Vec::new(),
            entries: Vec::new(),
            annotations: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    /// A struct with the given fields. Simple name and package are derived
    /// from the qualified name.
    pub fn structure(qualified_name: impl Into<String>, fields: Vec<Field>) -> Self {
        let mut decl = Self::new(DeclarationKind::Struct, qualified_name);
        decl.fields = fields;
        decl
    }

    pub fn enumeration(qualified_name: impl Into<String>, entries: Vec<EnumEntry>) -> Self {
        let mut decl = Self::new(DeclarationKind::Enum, qualified_name);
        decl.entries = entries;
        decl
    }

    pub fn sealed(qualified_name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::SealedRoot, qualified_name)
    }

    pub fn in_unit(mut self, unit: impl Into<String>) -> Self {
        self.source_unit = Some(unit.into());
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn extending(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn is_sealed_root(&self) -> bool {
        self.kind == DeclarationKind::SealedRoot
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            docs: None,
            annotations: Vec::new(),
        }
    }

    pub fn nullable(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, ty)
        }
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl EnumEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl Annotation {
    /// A marker annotation without arguments.
    pub fn marker(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// The named argument, if present and a string.
    pub fn string_arg(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(|v| v.as_str())
    }
}

impl TypeRef {
    pub fn list(element: TypeRef) -> Self {
        Self::List(Box::new(element))
    }

    pub fn set(element: TypeRef) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_derived_from_qualified_name() {
        let decl = Declaration::structure("com.example.User", vec![]);
        assert_eq!(decl.simple_name, "User");
        assert_eq!(decl.package.as_deref(), Some("com.example"));

        let bare = Declaration::structure("User", vec![]);
        assert_eq!(bare.simple_name, "User");
        assert_eq!(bare.package, None);
    }

    #[test]
    fn deserialize_model_from_json() {
        let json = serde_json::json!({
            "kind": "struct",
            "qualified_name": "com.example.User",
            "simple_name": "User",
            "source_unit": "User.kt",
            "fields": [
                { "name": "id", "ty": { "well_known": "uuid" } },
                { "name": "tags", "ty": { "list": { "primitive": "string" } }, "nullable": true },
                {
                    "name": "scores",
                    "ty": { "map": { "key": { "primitive": "string" }, "value": { "primitive": "double" } } }
                }
            ],
            "annotations": [
                { "qualified_name": "kotlinx.serialization.Serializable" }
            ]
        });

        let decl: Declaration = serde_json::from_value(json).unwrap();
        assert_eq!(decl.kind, DeclarationKind::Struct);
        assert_eq!(decl.fields.len(), 3);
        assert_eq!(decl.fields[0].ty, TypeRef::WellKnown(WellKnown::Uuid));
        assert!(decl.fields[1].nullable);
        assert_eq!(
            decl.fields[2].ty,
            TypeRef::map(
                TypeRef::Primitive(Primitive::String),
                TypeRef::Primitive(Primitive::Double)
            )
        );
        assert!(decl.supertypes.is_empty());
    }

    #[test]
    fn string_arg_ignores_non_strings() {
        let ann = Annotation::marker("a.SerialName")
            .with_arg("value", "wire")
            .with_arg("count", 3);
        assert_eq!(ann.string_arg("value"), Some("wire"));
        assert_eq!(ann.string_arg("count"), None);
        assert_eq!(ann.string_arg("missing"), None);
    }
}
