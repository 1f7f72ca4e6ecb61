use serde::{Deserialize, Serialize};

use crate::TypeExpr;

/// A single named, exported struct field.
///
/// Embedded and unexported fields are dropped at parse time and never
/// reach the IR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Exported Go field name.
    pub name: String,
    /// Parsed type expression.
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A named aggregate type with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declaration name (the Go struct type name).
    pub name: String,
    /// Fields in declaration order. Emission order mirrors this exactly.
    pub fields: Vec<Field>,
    /// Source file the declaration was parsed from, for diagnostics.
    pub source: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, fields: Vec<Field>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields,
            source: source.into(),
        }
    }
}
