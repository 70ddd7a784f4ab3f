//! Wire-name and discriminator lookup over annotation lists.

use crate::config::{AnnotationConfig, Config, ConfigError};
use crate::ir::{Annotation, Declaration};

/// Discriminator key used when a sealed root does not configure one.
pub const DEFAULT_DISCRIMINATOR: &str = "type";

/// Resolves annotation-driven names using the configured annotation sets.
#[derive(Debug, Clone)]
pub struct AnnotationResolver {
    markers: Vec<String>,
    serial_name: AnnotationConfig,
    discriminators: Vec<AnnotationConfig>,
}

impl AnnotationResolver {
    /// Parse every configured annotation string. Fails on the first malformed one.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let serial_name = AnnotationConfig::parse(&config.serial_name)?;
        let discriminators = config
            .discriminators
            .iter()
            .map(|s| AnnotationConfig::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            markers: config.markers.clone(),
            serial_name,
            discriminators,
        })
    }

    /// Whether the declaration carries at least one marker annotation.
    pub fn is_marked(&self, decl: &Declaration) -> bool {
        decl.annotations
            .iter()
            .any(|a| self.markers.contains(&a.qualified_name))
    }

    /// The serialized name: the serial-name argument if it is a string, else `fallback`.
    pub fn wire_name<'a>(&'a self, annotations: &'a [Annotation], fallback: &'a str) -> &'a str {
        annotations
            .iter()
            .find(|a| a.qualified_name == self.serial_name.qualified_name)
            .and_then(|a| a.string_arg(&self.serial_name.argument))
            .unwrap_or(fallback)
    }

    /// The discriminator key of a sealed root, defaulting to `"type"`.
    pub fn discriminator_key<'a>(&self, root: &'a Declaration) -> &'a str {
        root.annotations
            .iter()
            .find_map(|a| {
                self.discriminators
                    .iter()
                    .find(|d| d.qualified_name == a.qualified_name)
                    .map(|d| (a, d))
            })
            .and_then(|(a, d)| a.string_arg(&d.argument))
            .unwrap_or(DEFAULT_DISCRIMINATOR)
    }
}
