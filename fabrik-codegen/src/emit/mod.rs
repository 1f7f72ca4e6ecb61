//! Unit emitters: one builder file per declaration, plus the shared
//! registry and protocol-support files.

mod builder;
mod registry;
mod util;

pub use builder::emit_builder;
pub use registry::emit_registry;
pub use util::emit_util;

use fabrik_ir::{SymbolTable, TypeExpr};
use fabrik_parse::ImportIndex;

use crate::classify::is_builtin;

/// Everything emission needs to render types from the output package's
/// point of view.
pub struct EmitContext<'a> {
    /// The finalized batch symbol table. Read-only during emission.
    pub symbols: &'a SymbolTable,
    /// Import paths for externally-qualified type references.
    pub imports: &'a ImportIndex,
    /// Output Go package name.
    pub package: &'a str,
    /// Package qualifier for the declarations' own types, `None` when
    /// builders are generated into the declarations' package.
    pub qualifier: Option<&'a str>,
    /// Import path backing the qualifier, when present.
    pub import_path: Option<&'a str>,
}

impl EmitContext<'_> {
    /// Render a type expression as it must appear in generated code.
    ///
    /// Identifiers that are not builtins are assumed to live in the
    /// declarations' package: that covers known declarations and
    /// unresolved same-package types (aliases, non-struct types).
    pub fn go_type(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(name) if is_builtin(name) => name.clone(),
            TypeExpr::Named(name) => self.decl_type(name),
            TypeExpr::Qualified { package, name } => format!("{}.{}", package, name),
            TypeExpr::Pointer(inner) => format!("*{}", self.go_type(inner)),
            TypeExpr::Slice(elem) => format!("[]{}", self.go_type(elem)),
            TypeExpr::Map { key, value } => {
                format!("map[{}]{}", self.go_type(key), self.go_type(value))
            }
            TypeExpr::Any => "interface{}".to_string(),
            TypeExpr::Other(raw) => raw.clone(),
        }
    }

    /// Render a declaration's type name, qualified when the builders
    /// live outside the declarations' package.
    pub fn decl_type(&self, name: &str) -> String {
        match self.qualifier {
            Some(q) => format!("{}.{}", q, name),
            None => name.to_string(),
        }
    }

    /// Zero literal for a builtin scalar.
    pub fn zero_value(name: &str) -> &'static str {
        match name {
            "string" => "\"\"",
            "bool" => "false",
            _ => "0",
        }
    }
}
