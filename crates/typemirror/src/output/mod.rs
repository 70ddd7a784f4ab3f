//! Output writers for generated code.
//!
//! Each writer renders declarations of one source unit into target-language
//! source text.

pub mod rust;

pub use rust::RustWriter;

/// File extension of generated files.
pub const EXTENSION: &str = "rs";
