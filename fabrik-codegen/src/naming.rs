//! Naming rules for generated Go builders.

use fabrik_core::{to_pascal_case, to_snake_case};

/// Builder type name for a declaration (e.g., "Address" -> "AddressBuilder").
pub fn builder_name(decl: &str) -> String {
    format!("{}Builder", decl)
}

/// Constructor name for a declaration's builder.
pub fn constructor_name(decl: &str) -> String {
    format!("New{}Builder", decl)
}

/// Output unit name for a declaration (e.g., "BankAccount" -> "bank_account_builder.go").
pub fn file_name(decl: &str) -> String {
    format!("{}_builder.go", to_snake_case(decl))
}

/// Setter name for a field (e.g., "Street" -> "WithStreet").
pub fn setter_name(field: &str) -> String {
    format!("With{}", to_pascal_case(field))
}

/// Appender name for a nested-slice field (e.g., "Contacts" -> "AddContact").
pub fn appender_name(field: &str) -> String {
    format!("Add{}", to_pascal_case(&singularize(field)))
}

/// Naive suffix-based singularization.
///
/// `Entries` -> `Entry`, `Contacts` -> `Contact`, anything without a
/// recognized plural suffix is returned unchanged. Irregular plurals
/// (e.g. `People`) are knowingly mishandled; there is no correct
/// general mapping without a dictionary.
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    if name.ends_with("ss") {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix('s') {
        return stem.to_string();
    }
    name.to_string()
}
