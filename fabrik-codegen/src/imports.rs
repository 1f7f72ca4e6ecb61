//! Go import block collection.

use indexmap::IndexMap;

use crate::CodeBuilder;

/// Tracks Go imports and deduplicates them by path.
///
/// Insertion order is preserved so repeated runs produce identical
/// import blocks.
#[derive(Debug, Clone, Default)]
pub struct GoImports {
    /// Import path -> optional alias.
    paths: IndexMap<String, Option<String>>,
}

impl GoImports {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unaliased import.
    pub fn add(&mut self, path: &str) {
        self.paths.entry(path.to_string()).or_insert(None);
    }

    /// Add an aliased import (`alias "path"`).
    pub fn add_aliased(&mut self, alias: &str, path: &str) {
        self.paths
            .entry(path.to_string())
            .or_insert_with(|| Some(alias.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Render the import clause onto a builder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        match self.paths.len() {
            0 => builder,
            1 => {
                let (path, alias) = self.paths.iter().next().expect("one import");
                builder.line(&format!("import {}", format_spec(alias, path)))
            }
            _ => builder.block("import (", ")", |b| {
                self.paths
                    .iter()
                    .fold(b, |b, (path, alias)| b.line(&format_spec(alias, path)))
            }),
        }
    }
}

fn format_spec(alias: &Option<String>, path: &str) -> String {
    match alias {
        Some(alias) => format!("{} \"{}\"", alias, path),
        None => format!("\"{}\"", path),
    }
}
