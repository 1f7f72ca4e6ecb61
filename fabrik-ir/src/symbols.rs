use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Declaration;

/// Batch-scoped map from declaration name to its parsed declaration.
///
/// Built once from all input sources before any classification begins,
/// then treated as immutable. Iteration order is insertion order, which
/// keeps generated output diff-stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    decls: IndexMap<String, Declaration>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, returning the previous one under the same
    /// name if the batch declared it twice.
    pub fn insert(&mut self, decl: Declaration) -> Option<Declaration> {
        self.decls.insert(decl.name.clone(), decl)
    }

    /// Look up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.decls.get(name)
    }

    /// Whether a declaration with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    /// Iterate declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.values()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
