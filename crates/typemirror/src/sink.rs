//! Built-in output sinks.

use crate::generate::GeneratedFile;
use crate::traits::OutputSink;
use std::path::{Path, PathBuf};

/// Writes each file into a directory, creating it on first write.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectorySink {
    fn write(&mut self, file: &GeneratedFile) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(&file.file_name), &file.content)
    }
}

/// Collects files in memory.
impl OutputSink for Vec<GeneratedFile> {
    fn write(&mut self, file: &GeneratedFile) -> std::io::Result<()> {
        self.push(file.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str, content: &str) -> GeneratedFile {
        GeneratedFile {
            file_name: name.to_string(),
            source_unit: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn directory_sink_creates_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("generated");
        let mut sink = DirectorySink::new(&out);

        sink.write(&file("user.rs", "pub struct User {}\n")).unwrap();

        let written = std::fs::read_to_string(out.join("user.rs")).unwrap();
        assert_eq!(written, "pub struct User {}\n");
    }

    #[test]
    fn memory_sink_collects() {
        let mut sink: Vec<GeneratedFile> = Vec::new();
        sink.write(&file("a.rs", "a")).unwrap();
        sink.write(&file("b.rs", "b")).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].file_name, "b.rs");
    }
}
