//! Go type expression parsing.
//!
//! Handles the shapes the generator reasons about (`T`, `pkg.T`, `*T`,
//! `[]T`, `map[K]V`, `interface{}`/`any`) and preserves everything else
//! verbatim as [`TypeExpr::Other`]. Only genuinely broken text is an
//! error; exotic-but-valid Go types never abort a batch.

use fabrik_ir::TypeExpr;

/// Parse a complete type expression. Trailing garbage is an error.
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty type expression".to_string());
    }
    let (expr, rest) = parse_prefix(trimmed)?;
    if rest.trim_start().is_empty() {
        Ok(expr)
    } else {
        Err(format!("unexpected trailing text '{}'", rest.trim()))
    }
}

/// Parse one type from the front of `input`, returning the remainder.
fn parse_prefix(input: &str) -> Result<(TypeExpr, &str), String> {
    let input = input.trim_start();

    if let Some(rest) = input.strip_prefix('*') {
        let (inner, rest) = parse_prefix(rest)?;
        return Ok((TypeExpr::pointer(inner), rest));
    }

    if let Some(rest) = input.strip_prefix("[]") {
        let (elem, rest) = parse_prefix(rest)?;
        return Ok((TypeExpr::slice(elem), rest));
    }

    // Fixed-size arrays keep their full spelling and classify as opaque.
    if input.starts_with('[') {
        return Ok((TypeExpr::Other(input.trim_end().to_string()), ""));
    }

    let (ident, after_ident) = take_ident(input);
    match ident {
        "" => Err(format!("expected a type, found '{}'", truncate(input))),
        "map" => parse_map(after_ident),
        "any" => Ok((TypeExpr::Any, after_ident)),
        "interface" => parse_interface(input, after_ident),
        "chan" | "func" | "struct" => Ok((TypeExpr::Other(input.trim_end().to_string()), "")),
        _ => parse_named(ident, after_ident),
    }
}

fn parse_map(input: &str) -> Result<(TypeExpr, &str), String> {
    let input = input.trim_start();
    let Some(rest) = input.strip_prefix('[') else {
        return Err("expected '[' after 'map'".to_string());
    };

    // Find the bracket that closes the key type.
    let mut depth = 1usize;
    let mut key_end = None;
    for (i, c) in rest.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    key_end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(key_end) = key_end else {
        return Err("unclosed '[' in map type".to_string());
    };

    let key = parse_type_expr(&rest[..key_end])?;
    let (value, rest) = parse_prefix(&rest[key_end + 1..])?;
    Ok((TypeExpr::map(key, value), rest))
}

fn parse_interface<'a>(original: &'a str, after_ident: &'a str) -> Result<(TypeExpr, &'a str), String> {
    let body = after_ident.trim_start();
    let Some(rest) = body.strip_prefix('{') else {
        return Err("expected '{' after 'interface'".to_string());
    };
    if let Some(rest) = rest.trim_start().strip_prefix('}') {
        return Ok((TypeExpr::Any, rest));
    }
    // Non-empty interface literal: keep as written.
    Ok((TypeExpr::Other(original.trim_end().to_string()), ""))
}

fn parse_named<'a>(ident: &str, rest: &'a str) -> Result<(TypeExpr, &'a str), String> {
    if let Some(after_dot) = rest.strip_prefix('.') {
        let (name, rest) = take_ident(after_dot);
        if name.is_empty() {
            return Err(format!("expected identifier after '{}.'", ident));
        }
        return Ok((
            TypeExpr::Qualified {
                package: ident.to_string(),
                name: name.to_string(),
            },
            rest,
        ));
    }
    Ok((TypeExpr::named(ident), rest))
}

/// Split a leading Go identifier off the input.
fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric() && *c != '_')
        .map_or(input.len(), |(i, _)| i);
    input.split_at(end)
}

fn truncate(s: &str) -> &str {
    let end = s
        .char_indices()
        .nth(20)
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_qualified() {
        assert_eq!(parse_type_expr("string").unwrap(), TypeExpr::named("string"));
        assert_eq!(parse_type_expr("Address").unwrap(), TypeExpr::named("Address"));
        assert_eq!(
            parse_type_expr("time.Time").unwrap(),
            TypeExpr::Qualified {
                package: "time".to_string(),
                name: "Time".to_string()
            }
        );
    }

    #[test]
    fn test_pointer_slice_map() {
        assert_eq!(
            parse_type_expr("*Contact").unwrap(),
            TypeExpr::pointer(TypeExpr::named("Contact"))
        );
        assert_eq!(
            parse_type_expr("[]*Order").unwrap(),
            TypeExpr::slice(TypeExpr::pointer(TypeExpr::named("Order")))
        );
        assert_eq!(
            parse_type_expr("map[string]int").unwrap(),
            TypeExpr::map(TypeExpr::named("string"), TypeExpr::named("int"))
        );
        assert_eq!(
            parse_type_expr("map[string]*Account").unwrap(),
            TypeExpr::map(
                TypeExpr::named("string"),
                TypeExpr::pointer(TypeExpr::named("Account"))
            )
        );
    }

    #[test]
    fn test_empty_interface_and_any() {
        assert_eq!(parse_type_expr("interface{}").unwrap(), TypeExpr::Any);
        assert_eq!(parse_type_expr("interface{ }").unwrap(), TypeExpr::Any);
        assert_eq!(parse_type_expr("any").unwrap(), TypeExpr::Any);
    }

    #[test]
    fn test_exotic_types_preserved() {
        assert_eq!(
            parse_type_expr("[4]byte").unwrap(),
            TypeExpr::Other("[4]byte".to_string())
        );
        assert_eq!(
            parse_type_expr("chan int").unwrap(),
            TypeExpr::Other("chan int".to_string())
        );
        assert_eq!(
            parse_type_expr("func(int) error").unwrap(),
            TypeExpr::Other("func(int) error".to_string())
        );
        assert_eq!(
            parse_type_expr("interface{ Validate() error }").unwrap(),
            TypeExpr::Other("interface{ Validate() error }".to_string())
        );
    }

    #[test]
    fn test_nested_map_of_slices() {
        assert_eq!(
            parse_type_expr("map[string][]int").unwrap(),
            TypeExpr::map(
                TypeExpr::named("string"),
                TypeExpr::slice(TypeExpr::named("int"))
            )
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse_type_expr("").is_err());
        assert!(parse_type_expr("map[string").is_err());
        assert!(parse_type_expr("string garbage").is_err());
        assert!(parse_type_expr("pkg.").is_err());
    }
}
