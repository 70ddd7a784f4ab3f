//! Mapping from source type references to Rust type text.

use crate::ir::{Primitive, TypeRef, WellKnown};

/// Type text used when a reference could not be resolved.
pub const FALLBACK_TYPE: &str = "String";

/// Map a type reference to Rust type text.
///
/// `nullable` wraps the result in `Option<...>` once, at the outermost level.
pub fn map_type(ty: &TypeRef, nullable: bool) -> String {
    let base = base_type(ty);
    if nullable {
        format!("Option<{}>", base)
    } else {
        base
    }
}

/// Whether mapped type text is an optional wrapper.
pub fn is_optional(text: &str) -> bool {
    text.starts_with("Option<")
}

fn base_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(p) => primitive(*p).to_string(),
        TypeRef::List(inner) => format!("Vec<{}>", base_type(inner)),
        TypeRef::Set(inner) => format!("HashSet<{}>", base_type(inner)),
        TypeRef::Map { key, value } => {
            format!("HashMap<{}, {}>", base_type(key), base_type(value))
        }
        TypeRef::Named(name) => name.clone(),
        TypeRef::WellKnown(kind) => well_known(*kind).to_string(),
        TypeRef::Unresolved(spelling) => {
            tracing::warn!(
                "unresolved type `{}`, falling back to {}",
                spelling,
                FALLBACK_TYPE
            );
            FALLBACK_TYPE.to_string()
        }
    }
}

fn primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "String",
        Primitive::I32 => "i32",
        Primitive::I64 => "i64",
        Primitive::I16 => "i16",
        Primitive::I8 => "i8",
        Primitive::U32 => "u32",
        Primitive::U16 => "u16",
        Primitive::U8 => "u8",
        Primitive::U64 => "u64",
        Primitive::Double => "f64",
        Primitive::Float => "f32",
        Primitive::Boolean => "bool",
        Primitive::Char => "char",
    }
}

// Temporal and identifier values travel as their canonical string form.
fn well_known(kind: WellKnown) -> &'static str {
    match kind {
        WellKnown::Date
        | WellKnown::Time
        | WellKnown::DateTime
        | WellKnown::Instant
        | WellKnown::OffsetDateTime
        | WellKnown::ZonedDateTime
        | WellKnown::Duration
        | WellKnown::Uuid => "String",
    }
}
