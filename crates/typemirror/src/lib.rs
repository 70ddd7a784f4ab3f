//! Mirror annotated data-model declarations into serde-compatible Rust types.
//!
//! `typemirror` takes declarations discovered in a host object model (structs,
//! enums, sealed hierarchies) and emits Rust type definitions whose JSON wire
//! format matches the source model exactly.
//!
//! # Architecture
//!
//! ```text
//! Declarations        Pass                          Output
//! ────────────     ──────────────────────────     ──────────────
//! struct      ─┐   filter (markers, packages)     one .rs file
//! enum        ─┼─> collect sealed hierarchies ──> per source unit
//! sealed root ─┘   group by source unit           (+ mod.rs)
//!                  emit (types, naming, serde)
//! ```
//!
//! # Example
//!
//! ```
//! use typemirror::{Config, Generator};
//! use typemirror::ir::{Annotation, Declaration, Field, Primitive, TypeRef};
//!
//! let user = Declaration::structure(
//!     "com.example.User",
//!     vec![
//!         Field::new("userName", TypeRef::Primitive(Primitive::String)),
//!         Field::nullable("email", TypeRef::Primitive(Primitive::String)),
//!     ],
//! )
//! .in_unit("User.kt")
//! .with_annotation(Annotation::marker("kotlinx.serialization.Serializable"));
//!
//! let generator = Generator::new(Config::default()).unwrap();
//! let files = generator.generate(&[user]).unwrap();
//!
//! assert_eq!(files[0].file_name, "user.rs");
//! assert!(files[0].content.contains("pub user_name: String,"));
//! assert!(files[0].content.contains("pub email: Option<String>,"));
//! ```

pub mod annotations;
pub mod config;
pub mod generate;
pub mod hierarchy;
pub mod ir;
pub mod naming;
pub mod output;
pub mod sink;
pub mod traits;
pub mod types;

pub use annotations::AnnotationResolver;
pub use config::{AnnotationConfig, Config, ConfigError, Ordering};
pub use generate::{GenerateError, GeneratedFile, Generator, file_name_for};
pub use hierarchy::{Hierarchies, HierarchyError, SealedHierarchy};
pub use naming::{escape_if_reserved, to_field_name, to_type_name, to_variant_name};
pub use sink::DirectorySink;
pub use traits::OutputSink;
pub use types::map_type;
