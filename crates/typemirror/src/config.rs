//! Generator configuration.
//!
//! Loaded from `typemirror.toml`:
//! ```toml
//! output_dir = "src/generated"
//! packages = ["com.example.model"]
//! source_units = []
//! markers = ["kotlinx.serialization.Serializable"]
//! discriminators = ["kotlinx.serialization.json.JsonClassDiscriminator.discriminator"]
//! serial_name = "kotlinx.serialization.SerialName.value"
//! escape_template = "{field}_"
//! ordering = "discovery"
//! mod_file = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name.
pub const CONFIG_FILE: &str = "typemirror.toml";

/// Error raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "invalid annotation config `{0}`: expected `qualified.annotation.Name.argument` with a non-empty name and argument"
    )]
    MalformedAnnotation(String),

    #[error("escape template `{0}` must contain the `{{field}}` placeholder")]
    MissingPlaceholder(String),

    #[error(
        "escape template `r#{{field}}` cannot escape the path keyword `{keyword}`; use a prefix or suffix template such as `{{field}}_` or `raw_{{field}}`"
    )]
    RawPathKeyword { keyword: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Order of declarations within one source unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    /// The order the introspection layer discovered declarations in.
    #[default]
    Discovery,
    /// Sorted by qualified name, for collaborators without stable discovery order.
    Name,
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory generated files are written to.
    pub output_dir: PathBuf,
    /// Package prefixes to include.
    pub packages: Vec<String>,
    /// Source unit names to include (exact match).
    pub source_units: Vec<String>,
    /// Annotations that make a declaration eligible (any one suffices).
    pub markers: Vec<String>,
    /// `qualified.Name.argument` strings naming the discriminator key.
    pub discriminators: Vec<String>,
    /// `qualified.Name.argument` string naming the wire name.
    pub serial_name: String,
    /// Template applied to reserved identifiers; must contain `{field}`.
    pub escape_template: String,
    pub ordering: Ordering,
    /// Also write a `mod.rs` declaring every generated module.
    pub mod_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            packages: Vec::new(),
            source_units: Vec::new(),
            markers: vec!["kotlinx.serialization.Serializable".to_string()],
            discriminators: vec![
                "kotlinx.serialization.json.JsonClassDiscriminator.discriminator".to_string(),
            ],
            serial_name: "kotlinx.serialization.SerialName.value".to_string(),
            escape_template: "{field}_".to_string(),
            ordering: Ordering::Discovery,
            mod_file: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `typemirror.toml` from `root` if present, otherwise the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether the package/source-unit filters accept a declaration.
    ///
    /// Filters combine with OR. With no filters configured everything passes;
    /// a configured filter never matches a declaration lacking that metadata.
    pub fn accepts(&self, package: Option<&str>, source_unit: Option<&str>) -> bool {
        if self.packages.is_empty() && self.source_units.is_empty() {
            return true;
        }
        let package_match = package.is_some_and(|pkg| {
            self.packages
                .iter()
                .any(|prefix| pkg.starts_with(prefix.as_str()))
        });
        let unit_match =
            source_unit.is_some_and(|unit| self.source_units.iter().any(|u| u == unit));
        package_match || unit_match
    }
}

/// An annotation name paired with the argument to read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationConfig {
    pub qualified_name: String,
    pub argument: String,
}

impl AnnotationConfig {
    /// Parse `"qualified.annotation.Name.argument"`, splitting on the last `.`.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let (qualified_name, argument) = input
            .rsplit_once('.')
            .ok_or_else(|| ConfigError::MalformedAnnotation(input.to_string()))?;
        if qualified_name.is_empty() || argument.is_empty() {
            return Err(ConfigError::MalformedAnnotation(input.to_string()));
        }
        Ok(Self {
            qualified_name: qualified_name.to_string(),
            argument: argument.to_string(),
        })
    }
}
