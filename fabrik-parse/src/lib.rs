//! Go struct declaration parsing.
//!
//! Turns a batch of Go sources into an immutable [`SymbolTable`] plus an
//! import index for qualified type references. Parsing is two-pass by
//! construction: every source is fully parsed before the table is
//! handed to classification, so declarations may reference each other
//! forward, backward, or cyclically.

mod error;
mod fields;
mod scan;
mod type_expr;

use std::path::Path;

use fabrik_ir::{Declaration, SymbolTable};
use indexmap::IndexMap;
use miette::SourceSpan;

pub use error::{Error, Result, SourceContext};
pub use type_expr::parse_type_expr;

/// A named input source.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a source file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(path.display().to_string(), content))
    }
}

/// Externally-qualified package references collected during parsing,
/// mapped to their import paths for import-statement emission.
#[derive(Debug, Clone, Default)]
pub struct ImportIndex {
    paths: IndexMap<String, String>,
}

impl ImportIndex {
    /// The import path registered for a package identifier.
    pub fn path_for(&self, package: &str) -> Option<&str> {
        self.paths.get(package).map(String::as_str)
    }

    /// Iterate (package, path) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Record a package reference; the first mapping wins.
    fn record(&mut self, package: &str, path: String) {
        self.paths.entry(package.to_string()).or_insert(path);
    }
}

/// The parsed content of a single source file.
#[derive(Debug)]
pub struct ParsedSource {
    decls: Vec<Declaration>,
    decl_spans: Vec<SourceSpan>,
    imports: Vec<(Option<String>, String)>,
    ctx: SourceContext,
}

impl ParsedSource {
    /// Declarations found in this source, in declaration order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.decls
    }
}

/// Result of parsing a whole batch: the complete symbol table plus the
/// import index for qualified references.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub symbols: SymbolTable,
    pub imports: ImportIndex,
}

/// Parse one source file into its struct declarations.
///
/// Fails fast on structurally malformed input, naming the offending
/// source in the diagnostic.
pub fn parse_source(name: &str, content: &str) -> Result<ParsedSource> {
    let ctx = SourceContext::new(content, name);
    let clean = scan::strip_comments(content);
    let scanned = scan::scan(&clean, &ctx)?;

    let mut decls = Vec::new();
    let mut decl_spans = Vec::new();
    for raw in &scanned.structs {
        let body = &clean[raw.body_start..raw.body_end];
        let fields = fields::parse_struct_fields(body, raw.body_start, &raw.name, &ctx)?;
        decls.push(Declaration::new(raw.name.clone(), fields, name));
        decl_spans.push(raw.name_span);
    }

    Ok(ParsedSource {
        decls,
        decl_spans,
        imports: scanned
            .imports
            .into_iter()
            .map(|i| (i.alias, i.path))
            .collect(),
        ctx,
    })
}

/// Parse all sources and build the batch symbol table.
///
/// First pass parses every file; only then are declarations visible to
/// one another, which is what makes forward and circular references
/// work. The returned table is never mutated afterwards.
pub fn parse_batch(sources: &[SourceFile]) -> Result<ParsedBatch> {
    let mut parsed = Vec::with_capacity(sources.len());
    for source in sources {
        parsed.push(parse_source(&source.name, &source.content)?);
    }

    let mut batch = ParsedBatch::default();
    for file in &parsed {
        for (decl, span) in file.decls.iter().zip(&file.decl_spans) {
            if let Some(previous) = batch.symbols.insert(decl.clone()) {
                return Err(file.ctx.duplicate_error(
                    &decl.name,
                    &previous.source,
                    Some(*span),
                ));
            }
        }
    }

    for file in &parsed {
        collect_qualified_refs(file, &mut batch.imports);
    }

    Ok(batch)
}

/// Record the import path for every package a file's fields qualify,
/// including qualifications inside exotic types carried verbatim
/// (channels, fixed arrays, funcs).
///
/// A package identifier matches an import either by explicit alias or
/// by the last segment of the import path. A reference with no matching
/// import (which valid Go cannot produce) degrades to a bare qualifier.
fn collect_qualified_refs(file: &ParsedSource, index: &mut ImportIndex) {
    for decl in &file.decls {
        for field in &decl.fields {
            let mut packages = Vec::new();
            field.ty.collect_packages(&mut packages);
            for package in packages {
                let path = file
                    .imports
                    .iter()
                    .find(|(alias, path)| {
                        alias.as_deref() == Some(package.as_str())
                            || (alias.is_none() && last_segment(path) == package)
                    })
                    .map(|(_, path)| path.clone())
                    .unwrap_or_else(|| package.clone());
                index.record(&package, path);
            }
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
