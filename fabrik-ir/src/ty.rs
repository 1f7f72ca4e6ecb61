use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed Go type expression.
///
/// Only the shapes the generator reasons about get their own variant;
/// anything else (fixed arrays, funcs, channels, non-empty interfaces)
/// is carried verbatim as [`TypeExpr::Other`] so classification stays
/// total over arbitrary field types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A bare identifier (`string`, `Address`).
    Named(String),
    /// A package-qualified identifier (`time.Time`).
    Qualified { package: String, name: String },
    /// A pointer (`*T`).
    Pointer(Box<TypeExpr>),
    /// A slice (`[]T`).
    Slice(Box<TypeExpr>),
    /// A map (`map[K]V`).
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// The empty interface (`interface{}` or `any`).
    Any,
    /// Any other type, preserved as written.
    Other(String),
}

impl TypeExpr {
    /// Create a named type expression.
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    /// Create a pointer type expression.
    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    /// Create a slice type expression.
    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    /// Create a map type expression.
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// The package a qualified type references, if any.
    pub fn qualifier(&self) -> Option<&str> {
        match self {
            TypeExpr::Qualified { package, .. } => Some(package),
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => inner.qualifier(),
            TypeExpr::Map { value, .. } => value.qualifier(),
            _ => None,
        }
    }

    /// Collect the package identifier of every qualified reference in
    /// the expression, including references spelled inside verbatim
    /// [`TypeExpr::Other`] text (`chan time.Duration`, `[4]pkg.T`).
    /// Emitted code that repeats such a type needs the import.
    pub fn collect_packages(&self, out: &mut Vec<String>) {
        match self {
            TypeExpr::Qualified { package, .. } => out.push(package.clone()),
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => inner.collect_packages(out),
            TypeExpr::Map { key, value } => {
                key.collect_packages(out);
                value.collect_packages(out);
            }
            TypeExpr::Other(raw) => collect_raw_packages(raw, out),
            TypeExpr::Named(_) | TypeExpr::Any => {}
        }
    }
}

/// Scan verbatim type text for `pkg.Name` tokens.
fn collect_raw_packages(raw: &str, out: &mut Vec<String>) {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() || bytes[i] == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let dot_then_ident = i + 1 < bytes.len()
                && bytes[i] == b'.'
                && (bytes[i + 1].is_ascii_alphabetic() || bytes[i + 1] == b'_');
            if dot_then_ident {
                out.push(raw[start..i].to_string());
                i += 1;
            }
        } else {
            i += 1;
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Any => write!(f, "interface{{}}"),
            TypeExpr::Other(raw) => write!(f, "{}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrips_go_syntax() {
        assert_eq!(TypeExpr::named("string").to_string(), "string");
        assert_eq!(
            TypeExpr::pointer(TypeExpr::named("Contact")).to_string(),
            "*Contact"
        );
        assert_eq!(
            TypeExpr::slice(TypeExpr::pointer(TypeExpr::named("Order"))).to_string(),
            "[]*Order"
        );
        assert_eq!(
            TypeExpr::map(TypeExpr::named("string"), TypeExpr::named("int")).to_string(),
            "map[string]int"
        );
        assert_eq!(
            TypeExpr::Qualified {
                package: "time".to_string(),
                name: "Time".to_string()
            }
            .to_string(),
            "time.Time"
        );
        assert_eq!(TypeExpr::Any.to_string(), "interface{}");
        assert_eq!(TypeExpr::Other("[4]byte".to_string()).to_string(), "[4]byte");
    }

    #[test]
    fn test_collect_packages_walks_structured_shapes() {
        let mut out = Vec::new();
        TypeExpr::slice(TypeExpr::Qualified {
            package: "time".to_string(),
            name: "Time".to_string(),
        })
        .collect_packages(&mut out);
        assert_eq!(out, ["time"]);

        out.clear();
        TypeExpr::named("string").collect_packages(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_collect_packages_scans_verbatim_text() {
        for (raw, expected) in [
            ("chan time.Duration", vec!["time"]),
            ("[4]pkg.T", vec!["pkg"]),
            ("func(a.X) b.Y", vec!["a", "b"]),
            ("interface{ io.Reader }", vec!["io"]),
            ("chan int", vec![]),
            ("[8]byte", vec![]),
        ] {
            let mut out = Vec::new();
            TypeExpr::Other(raw.to_string()).collect_packages(&mut out);
            assert_eq!(out, expected, "raw type: {raw}");
        }
    }

    #[test]
    fn test_qualifier() {
        let ty = TypeExpr::slice(TypeExpr::Qualified {
            package: "time".to_string(),
            name: "Time".to_string(),
        });
        assert_eq!(ty.qualifier(), Some("time"));
        assert_eq!(TypeExpr::named("string").qualifier(), None);
    }
}
