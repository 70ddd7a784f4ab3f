//! Traits for output destinations.

use crate::generate::GeneratedFile;

/// Receives generated files at the end of a pass.
///
/// # Implementing Custom Sinks
///
/// ```
/// use typemirror::{GeneratedFile, OutputSink};
///
/// struct Stdout;
///
/// impl OutputSink for Stdout {
///     fn write(&mut self, file: &GeneratedFile) -> std::io::Result<()> {
///         println!("// {}\n{}", file.file_name, file.content);
///         Ok(())
///     }
/// }
/// ```
pub trait OutputSink {
    /// Persist one generated file.
    fn write(&mut self, file: &GeneratedFile) -> std::io::Result<()>;
}
