//! Parent-to-children association for sealed hierarchies.

use crate::ir::{Declaration, DeclarationKind};
use std::collections::HashMap;

/// Error raised while collecting sealed hierarchies.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("`{declaration}` extends more than one sealed root ({})", .parents.join(", "))]
    MultipleSealedParents {
        declaration: String,
        parents: Vec<String>,
    },
}

/// A sealed root and the struct declarations extending it, in discovery order.
#[derive(Debug, Clone)]
pub struct SealedHierarchy<'a> {
    pub root: &'a Declaration,
    pub children: Vec<&'a Declaration>,
}

/// All sealed hierarchies of one generation pass.
#[derive(Debug, Default)]
pub struct Hierarchies<'a> {
    hierarchies: Vec<SealedHierarchy<'a>>,
    by_root: HashMap<&'a str, usize>,
    /// Child qualified name -> index of its hierarchy.
    parent_of: HashMap<&'a str, usize>,
}

impl<'a> Hierarchies<'a> {
    /// Register every sealed root, then attach each struct that extends one.
    pub fn collect(decls: &[&'a Declaration]) -> Result<Self, HierarchyError> {
        let mut this = Self::default();

        for decl in decls.iter().copied().filter(|d| d.is_sealed_root()) {
            let index = this.hierarchies.len();
            this.hierarchies.push(SealedHierarchy {
                root: decl,
                children: Vec::new(),
            });
            this.by_root.insert(decl.qualified_name.as_str(), index);
        }

        for &decl in decls {
            let mut parents: Vec<usize> = decl
                .supertypes
                .iter()
                .filter_map(|s| this.by_root.get(s.as_str()).copied())
                .collect();
            // a supertype listed twice is still one parent
            parents.sort_unstable();
            parents.dedup();

            match parents.as_slice() {
                [] => {}
                [index] => {
                    if decl.kind != DeclarationKind::Struct {
                        tracing::warn!(
                            "`{}` extends sealed `{}` but is not a struct; emitting it standalone",
                            decl.qualified_name,
                            this.hierarchies[*index].root.qualified_name
                        );
                        continue;
                    }
                    this.hierarchies[*index].children.push(decl);
                    this.parent_of.insert(decl.qualified_name.as_str(), *index);
                }
                _ => {
                    return Err(HierarchyError::MultipleSealedParents {
                        declaration: decl.qualified_name.clone(),
                        parents: parents
                            .iter()
                            .map(|i| this.hierarchies[*i].root.qualified_name.clone())
                            .collect(),
                    });
                }
            }
        }

        Ok(this)
    }

    /// The hierarchy rooted at `root`, if it is a sealed root.
    pub fn get(&self, root: &Declaration) -> Option<&SealedHierarchy<'a>> {
        self.by_root
            .get(root.qualified_name.as_str())
            .map(|&i| &self.hierarchies[i])
    }

    /// Whether `decl` is emitted as part of a sealed root rather than on its own.
    pub fn is_variant(&self, decl: &Declaration) -> bool {
        self.parent_of.contains_key(decl.qualified_name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SealedHierarchy<'a>> {
        self.hierarchies.iter()
    }
}
