//! Lowering: declarations plus the symbol table become per-declaration
//! builder specs with derived setter and appender names.

use fabrik_ir::{Declaration, ElemKind, FieldKind, SymbolTable, TypeExpr};

use crate::classify::classify;
use crate::naming::{appender_name, setter_name};

/// One field of a builder, classified and named.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Go field name on the target struct.
    pub name: String,
    /// The field type as declared.
    pub ty: TypeExpr,
    /// Classification against the batch symbol table.
    pub kind: FieldKind,
    /// Setter method name (`WithStreet`).
    pub setter: String,
    /// Appender method name (`AddContact`), nested-slice fields only.
    pub appender: Option<String>,
    /// Whether the slice element or map value is written as a pointer
    /// in the target type. The indirection is absorbed during
    /// classification but emission has to reproduce it.
    pub elem_pointer: bool,
}

/// A declaration ready for emission: name plus ordered field specs.
///
/// Field order mirrors declaration order exactly; that ordering drives
/// both setter emission and the second appender pass.
#[derive(Debug, Clone)]
pub struct BuilderSpec {
    pub decl_name: String,
    pub fields: Vec<FieldSpec>,
}

impl BuilderSpec {
    /// Derive the builder spec for one declaration.
    ///
    /// Classification only reads the table; self-referencing and
    /// mutually referencing declarations lower without any recursion
    /// because nested fields are recorded by name, never expanded.
    pub fn lower(decl: &Declaration, symbols: &SymbolTable) -> Self {
        let fields = decl
            .fields
            .iter()
            .map(|field| {
                let kind = classify(&field.ty, symbols);
                let appender = match kind {
                    FieldKind::Slice(ElemKind::Nested(_)) => Some(appender_name(&field.name)),
                    _ => None,
                };
                FieldSpec {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                    kind,
                    setter: setter_name(&field.name),
                    appender,
                    elem_pointer: elem_pointer(&field.ty),
                }
            })
            .collect();

        Self {
            decl_name: decl.name.clone(),
            fields,
        }
    }

    /// Fields that get an appender, in the same relative order as their
    /// owning fields.
    pub fn appender_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.appender.is_some())
    }
}

fn elem_pointer(ty: &TypeExpr) -> bool {
    match ty {
        TypeExpr::Slice(elem) => matches!(**elem, TypeExpr::Pointer(_)),
        TypeExpr::Map { value, .. } => matches!(**value, TypeExpr::Pointer(_)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use fabrik_ir::Field;
    use fabrik_parse::parse_type_expr;

    use super::*;

    fn decl_with(fields: &[(&str, &str)]) -> Declaration {
        Declaration::new(
            "Person",
            fields
                .iter()
                .map(|(name, ty)| Field::new(*name, parse_type_expr(ty).unwrap()))
                .collect(),
            "model.go",
        )
    }

    fn symbols_with(names: &[&str]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for name in names {
            table.insert(Declaration::new(*name, Vec::new(), "model.go"));
        }
        table
    }

    #[test]
    fn test_lowering_preserves_field_order() {
        let decl = decl_with(&[("Zed", "string"), ("Alpha", "int"), ("Mid", "bool")]);
        let spec = BuilderSpec::lower(&decl, &SymbolTable::new());
        let names: Vec<&str> = spec.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Zed", "Alpha", "Mid"]);
    }

    #[test]
    fn test_setter_and_appender_names() {
        let decl = decl_with(&[("Street", "string"), ("Contacts", "[]Contact")]);
        let spec = BuilderSpec::lower(&decl, &symbols_with(&["Contact"]));

        assert_eq!(spec.fields[0].setter, "WithStreet");
        assert_eq!(spec.fields[0].appender, None);
        assert_eq!(spec.fields[1].setter, "WithContacts");
        assert_eq!(spec.fields[1].appender.as_deref(), Some("AddContact"));
    }

    #[test]
    fn test_builtin_slice_gets_no_appender() {
        let decl = decl_with(&[("Tags", "[]string")]);
        let spec = BuilderSpec::lower(&decl, &SymbolTable::new());
        assert_eq!(spec.fields[0].appender, None);
    }

    #[test]
    fn test_elem_pointer_flag() {
        let decl = decl_with(&[
            ("Plain", "[]Contact"),
            ("Ptrs", "[]*Contact"),
            ("ByName", "map[string]*Contact"),
        ]);
        let spec = BuilderSpec::lower(&decl, &symbols_with(&["Contact"]));
        assert!(!spec.fields[0].elem_pointer);
        assert!(spec.fields[1].elem_pointer);
        assert!(spec.fields[2].elem_pointer);
    }

    #[test]
    fn test_self_reference_lowers_without_recursion() {
        let decl = Declaration::new(
            "Contact",
            vec![
                Field::new("Name", parse_type_expr("string").unwrap()),
                Field::new("Alternative", parse_type_expr("*Contact").unwrap()),
            ],
            "model.go",
        );
        let mut table = SymbolTable::new();
        table.insert(decl.clone());

        let spec = BuilderSpec::lower(&decl, &table);
        assert_eq!(
            spec.fields[1].kind,
            FieldKind::Pointer(ElemKind::Nested("Contact".to_string()))
        );
    }
}
