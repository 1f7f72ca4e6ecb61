use serde::{Deserialize, Serialize};

/// Classification of a slice element, map value, or pointee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElemKind {
    /// A builtin scalar.
    Builtin,
    /// A declaration known to the symbol table, by name.
    Nested(String),
}

/// The closed type algebra a field resolves into.
///
/// Classification never fails: a type that names neither a builtin
/// scalar nor a known declaration is `Opaque` and handled by direct
/// assignment only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of")]
pub enum FieldKind {
    /// A builtin scalar (`string`, `int`, `bool`, ...).
    Builtin,
    /// A slice of builtins or of known declarations. Pointer
    /// indirection on the element is absorbed; the sub-builder always
    /// targets the pointee.
    Slice(ElemKind),
    /// A map with a builtin key. The value may be a builtin or a known
    /// declaration (again with pointer indirection absorbed).
    Map(ElemKind),
    /// A pointer to a builtin or to a known declaration.
    Pointer(ElemKind),
    /// A value-typed field of a known declaration.
    Nested(String),
    /// Anything else: external, qualified, dynamic, or unresolved.
    Opaque,
}

impl FieldKind {
    /// The referenced declaration name, when the kind carries one.
    pub fn nested_decl(&self) -> Option<&str> {
        match self {
            FieldKind::Nested(name) => Some(name),
            FieldKind::Slice(ElemKind::Nested(name))
            | FieldKind::Map(ElemKind::Nested(name))
            | FieldKind::Pointer(ElemKind::Nested(name)) => Some(name),
            _ => None,
        }
    }

    /// Short human-readable label for reports.
    pub fn label(&self) -> String {
        match self {
            FieldKind::Builtin => "builtin".to_string(),
            FieldKind::Slice(ElemKind::Builtin) => "slice of builtin".to_string(),
            FieldKind::Slice(ElemKind::Nested(name)) => format!("slice of {}", name),
            FieldKind::Map(ElemKind::Builtin) => "map of builtin".to_string(),
            FieldKind::Map(ElemKind::Nested(name)) => format!("map of {}", name),
            FieldKind::Pointer(ElemKind::Builtin) => "pointer to builtin".to_string(),
            FieldKind::Pointer(ElemKind::Nested(name)) => format!("pointer to {}", name),
            FieldKind::Nested(name) => format!("nested {}", name),
            FieldKind::Opaque => "opaque".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_decl() {
        assert_eq!(
            FieldKind::Nested("Address".to_string()).nested_decl(),
            Some("Address")
        );
        assert_eq!(
            FieldKind::Slice(ElemKind::Nested("Order".to_string())).nested_decl(),
            Some("Order")
        );
        assert_eq!(FieldKind::Builtin.nested_decl(), None);
        assert_eq!(FieldKind::Opaque.nested_decl(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FieldKind::Builtin.label(), "builtin");
        assert_eq!(
            FieldKind::Pointer(ElemKind::Nested("Contact".to_string())).label(),
            "pointer to Contact"
        );
    }
}
