//! Field classification against the symbol table.
//!
//! Resolution is first-match-wins and total: anything that is neither a
//! builtin scalar, a known declaration, nor a supported composite of
//! those falls back to `Opaque` (direct assignment) instead of being
//! rejected. Partial symbol tables therefore never abort generation.

use fabrik_ir::{ElemKind, FieldKind, SymbolTable, TypeExpr};

/// Go builtin scalar types that zero to `""`, `0`, or `false`.
pub const BUILTINS: &[&str] = &[
    "string",
    "bool",
    "byte",
    "rune",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

/// Whether a type name is a builtin scalar.
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Classify a field type against the complete symbol table.
pub fn classify(ty: &TypeExpr, symbols: &SymbolTable) -> FieldKind {
    match ty {
        TypeExpr::Named(name) if is_builtin(name) => FieldKind::Builtin,
        TypeExpr::Named(name) if symbols.contains(name) => FieldKind::Nested(name.clone()),
        TypeExpr::Slice(elem) => match elem_kind(elem, symbols) {
            Some(kind) => FieldKind::Slice(kind),
            None => FieldKind::Opaque,
        },
        TypeExpr::Map { key, value } => match (&**key, elem_kind(value, symbols)) {
            (TypeExpr::Named(k), Some(kind)) if is_builtin(k) => FieldKind::Map(kind),
            _ => FieldKind::Opaque,
        },
        TypeExpr::Pointer(inner) => match &**inner {
            TypeExpr::Named(name) if is_builtin(name) => FieldKind::Pointer(ElemKind::Builtin),
            TypeExpr::Named(name) if symbols.contains(name) => {
                FieldKind::Pointer(ElemKind::Nested(name.clone()))
            }
            _ => FieldKind::Opaque,
        },
        // Externally-qualified, dynamic, unresolved, and exotic types
        // are all handled by direct assignment only.
        _ => FieldKind::Opaque,
    }
}

/// Classify a slice element or map value, absorbing one level of
/// pointer indirection on nested declarations: the sub-builder always
/// targets the pointee.
fn elem_kind(elem: &TypeExpr, symbols: &SymbolTable) -> Option<ElemKind> {
    match elem {
        TypeExpr::Named(name) if is_builtin(name) => Some(ElemKind::Builtin),
        TypeExpr::Named(name) if symbols.contains(name) => Some(ElemKind::Nested(name.clone())),
        TypeExpr::Pointer(inner) => match &**inner {
            TypeExpr::Named(name) if symbols.contains(name) => {
                Some(ElemKind::Nested(name.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use fabrik_ir::{Declaration, Field};
    use fabrik_parse::parse_type_expr;

    use super::*;

    fn symbols() -> SymbolTable {
        let mut table = SymbolTable::new();
        for name in ["Address", "Contact"] {
            table.insert(Declaration::new(
                name,
                vec![Field::new("Value", TypeExpr::named("int"))],
                "model.go",
            ));
        }
        table
    }

    fn kind(ty: &str) -> FieldKind {
        classify(&parse_type_expr(ty).unwrap(), &symbols())
    }

    #[test]
    fn test_builtins() {
        assert_eq!(kind("string"), FieldKind::Builtin);
        assert_eq!(kind("int64"), FieldKind::Builtin);
        assert_eq!(kind("bool"), FieldKind::Builtin);
        assert_eq!(kind("float64"), FieldKind::Builtin);
    }

    #[test]
    fn test_nested() {
        assert_eq!(kind("Address"), FieldKind::Nested("Address".to_string()));
    }

    #[test]
    fn test_slices() {
        assert_eq!(kind("[]string"), FieldKind::Slice(ElemKind::Builtin));
        assert_eq!(
            kind("[]Contact"),
            FieldKind::Slice(ElemKind::Nested("Contact".to_string()))
        );
        // Pointer indirection on the element is absorbed.
        assert_eq!(
            kind("[]*Contact"),
            FieldKind::Slice(ElemKind::Nested("Contact".to_string()))
        );
    }

    #[test]
    fn test_maps() {
        assert_eq!(kind("map[string]int"), FieldKind::Map(ElemKind::Builtin));
        assert_eq!(
            kind("map[string]Address"),
            FieldKind::Map(ElemKind::Nested("Address".to_string()))
        );
        assert_eq!(
            kind("map[string]*Address"),
            FieldKind::Map(ElemKind::Nested("Address".to_string()))
        );
        // Non-builtin keys fall back to direct assignment.
        assert_eq!(kind("map[Address]int"), FieldKind::Opaque);
    }

    #[test]
    fn test_pointers() {
        assert_eq!(kind("*int"), FieldKind::Pointer(ElemKind::Builtin));
        assert_eq!(
            kind("*Contact"),
            FieldKind::Pointer(ElemKind::Nested("Contact".to_string()))
        );
        // Double indirection and pointers to unknowns are opaque.
        assert_eq!(kind("**Contact"), FieldKind::Opaque);
        assert_eq!(kind("*Unknown"), FieldKind::Opaque);
    }

    #[test]
    fn test_opaque_fallbacks() {
        assert_eq!(kind("time.Time"), FieldKind::Opaque);
        assert_eq!(kind("interface{}"), FieldKind::Opaque);
        assert_eq!(kind("any"), FieldKind::Opaque);
        assert_eq!(kind("Unknown"), FieldKind::Opaque);
        assert_eq!(kind("[]time.Time"), FieldKind::Opaque);
        assert_eq!(kind("[]Unknown"), FieldKind::Opaque);
        assert_eq!(kind("map[string]time.Time"), FieldKind::Opaque);
        assert_eq!(kind("chan int"), FieldKind::Opaque);
        assert_eq!(kind("[4]byte"), FieldKind::Opaque);
    }

    #[test]
    fn test_classification_total_over_empty_table() {
        let empty = SymbolTable::new();
        assert_eq!(
            classify(&parse_type_expr("Address").unwrap(), &empty),
            FieldKind::Opaque
        );
        assert_eq!(
            classify(&parse_type_expr("string").unwrap(), &empty),
            FieldKind::Builtin
        );
    }
}
