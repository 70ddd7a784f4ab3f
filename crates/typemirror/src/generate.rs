//! Generation pass: filter, collect hierarchies, group by source unit, emit.

use crate::annotations::AnnotationResolver;
use crate::config::{Config, ConfigError, Ordering};
use crate::hierarchy::{Hierarchies, HierarchyError};
use crate::ir::{Declaration, DeclarationKind};
use crate::naming::{
    FIELD_PLACEHOLDER, PATH_KEYWORDS, is_raw_template, to_field_name, to_type_name,
    to_variant_name,
};
use crate::output::{EXTENSION, RustWriter};
use crate::traits::OutputSink;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// File name of the module index written when `mod_file` is enabled.
pub const MOD_FILE: &str = "mod.rs";

/// Error that aborts a generation pass.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("source units `{first}` and `{second}` both generate `{file_name}`")]
    OutputCollision {
        file_name: String,
        first: String,
        second: String,
    },

    #[error("failed to write {file_name}: {source}")]
    Write {
        file_name: String,
        source: std::io::Error,
    },
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory (e.g., "user_models.rs").
    pub file_name: String,
    /// Source unit the file was generated from; `None` for the module index.
    pub source_unit: Option<String>,
    pub content: String,
}

/// A validated, reusable generator.
///
/// Construction parses every configured annotation string and checks the
/// escape template; each pass keeps its grouping state local, so one
/// generator can serve concurrent passes.
#[derive(Debug, Clone)]
pub struct Generator {
    config: Config,
    resolver: AnnotationResolver,
}

impl Generator {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        if !config.escape_template.contains(FIELD_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(
                config.escape_template.clone(),
            ));
        }
        let resolver = AnnotationResolver::from_config(&config)?;
        Ok(Self { config, resolver })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate one file per source unit, without writing anything.
    pub fn generate(&self, decls: &[Declaration]) -> Result<Vec<GeneratedFile>, GenerateError> {
        let eligible: Vec<&Declaration> = decls
            .iter()
            .filter(|d| self.is_eligible(d))
            .filter(|d| is_placeable(d))
            .collect();
        tracing::debug!(
            "{} of {} declarations eligible for generation",
            eligible.len(),
            decls.len()
        );

        self.check_raw_identifiers(&eligible)?;
        let hierarchies = Hierarchies::collect(&eligible)?;
        let units = self.group(&eligible, &hierarchies);
        let file_names = self.file_names(&units)?;

        let mut files = Vec::new();
        for (unit, unit_decls) in &units {
            let mut writer = RustWriter::new(&self.resolver, &self.config.escape_template);
            writer.write_header(unit);

            for decl in unit_decls {
                match decl.kind {
                    DeclarationKind::SealedRoot => match hierarchies.get(decl) {
                        Some(hierarchy) if !hierarchy.children.is_empty() => {
                            writer.write_union(hierarchy)
                        }
                        _ => tracing::debug!(
                            "sealed `{}` has no subtypes, skipping",
                            decl.qualified_name
                        ),
                    },
                    DeclarationKind::Enum => writer.write_enum(decl),
                    DeclarationKind::Struct => writer.write_struct(decl),
                }
            }

            if writer.blocks() == 0 {
                tracing::debug!("source unit `{}` produced no types, skipping", unit);
                continue;
            }
            files.push(GeneratedFile {
                file_name: file_names[unit.as_str()].clone(),
                source_unit: Some(unit.clone()),
                content: writer.finish(),
            });
        }

        if self.config.mod_file && !files.is_empty() {
            files.push(mod_index(&files));
        }

        tracing::debug!("generated {} files", files.len());
        Ok(files)
    }

    /// Generate and hand every file to `sink`. Returns the number of files written.
    pub fn run(
        &self,
        decls: &[Declaration],
        sink: &mut dyn OutputSink,
    ) -> Result<usize, GenerateError> {
        let files = self.generate(decls)?;
        for file in &files {
            sink.write(file).map_err(|source| GenerateError::Write {
                file_name: file.file_name.clone(),
                source,
            })?;
            tracing::info!("wrote {}", file.file_name);
        }
        Ok(files.len())
    }

    fn is_eligible(&self, decl: &Declaration) -> bool {
        self.resolver.is_marked(decl)
            && self
                .config
                .accepts(decl.package.as_deref(), decl.source_unit.as_deref())
    }

    /// Raw identifiers cannot carry path keywords, so fail before emitting
    /// anything if one would be produced.
    fn check_raw_identifiers(&self, decls: &[&Declaration]) -> Result<(), ConfigError> {
        if !is_raw_template(&self.config.escape_template) {
            return Ok(());
        }
        for decl in decls {
            let idents = std::iter::once(to_type_name(&decl.simple_name))
                .chain(decl.fields.iter().map(|f| to_field_name(&f.name)))
                .chain(decl.entries.iter().map(|e| to_variant_name(&e.name)));
            for ident in idents {
                if PATH_KEYWORDS.contains(&ident.as_str()) {
                    return Err(ConfigError::RawPathKeyword { keyword: ident });
                }
            }
        }
        Ok(())
    }

    /// Bucket top-level declarations by source unit. Sealed children are
    /// emitted with their root and left out here.
    fn group<'a>(
        &self,
        decls: &[&'a Declaration],
        hierarchies: &Hierarchies<'a>,
    ) -> BTreeMap<String, Vec<&'a Declaration>> {
        let mut units: BTreeMap<String, Vec<&'a Declaration>> = BTreeMap::new();
        for &decl in decls {
            if hierarchies.is_variant(decl) {
                continue;
            }
            let Some(unit) = &decl.source_unit else {
                tracing::warn!(
                    "`{}` has no source unit, skipping",
                    decl.qualified_name
                );
                continue;
            };
            units.entry(unit.clone()).or_default().push(decl);
        }

        if self.config.ordering == Ordering::Name {
            for unit_decls in units.values_mut() {
                unit_decls.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
            }
        }
        units
    }

    /// Output file name per unit, rejecting two units that map to the same file.
    fn file_names<'u>(
        &self,
        units: &'u BTreeMap<String, Vec<&Declaration>>,
    ) -> Result<HashMap<&'u str, String>, GenerateError> {
        let mut names: HashMap<&'u str, String> = HashMap::new();
        let mut owners: HashMap<String, &'u str> = HashMap::new();
        if self.config.mod_file {
            owners.insert(MOD_FILE.to_string(), "<module index>");
        }

        for unit in units.keys() {
            let file_name = file_name_for(unit);
            if let Some(first) = owners.get(&file_name) {
                return Err(GenerateError::OutputCollision {
                    file_name,
                    first: first.to_string(),
                    second: unit.clone(),
                });
            }
            owners.insert(file_name.clone(), unit.as_str());
            names.insert(unit.as_str(), file_name);
        }
        Ok(names)
    }
}

/// A sealed root without a source unit has no file for its union. Dropping it
/// before hierarchies are collected leaves its children as standalone structs.
fn is_placeable(decl: &Declaration) -> bool {
    if decl.is_sealed_root() && decl.source_unit.is_none() {
        tracing::warn!(
            "sealed `{}` has no source unit, emitting its subtypes standalone",
            decl.qualified_name
        );
        return false;
    }
    true
}

/// Output file name for a source unit: its base name in snake case plus the extension.
pub fn file_name_for(unit: &str) -> String {
    let path = Path::new(unit);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| unit.into());
    format!("{}.{}", to_field_name(&stem), EXTENSION)
}

fn mod_index(files: &[GeneratedFile]) -> GeneratedFile {
    let mut content = String::from("// Code generated by typemirror. DO NOT EDIT.\n\n");
    for file in files {
        let module = file
            .file_name
            .strip_suffix(&format!(".{}", EXTENSION))
            .unwrap_or(&file.file_name);
        content.push_str(&format!("pub mod {};\npub use {}::*;\n", module, module));
    }
    GeneratedFile {
        file_name: MOD_FILE.to_string(),
        source_unit: None,
        content,
    }
}
