//! Struct body parsing: field names, types, tags, embedding.
//!
//! Only exported, named fields survive. Embedded (anonymous) fields and
//! unexported fields are dropped, and struct tags are discarded.

use fabrik_core::is_exported;
use fabrik_ir::Field;

use crate::error::{Result, SourceContext};
use crate::type_expr::parse_type_expr;

/// Parse a struct body (the text between the braces) into fields.
///
/// `body_start` is the byte offset of the body in the original source,
/// used for diagnostic spans.
pub(crate) fn parse_struct_fields(
    body: &str,
    body_start: usize,
    decl: &str,
    ctx: &SourceContext,
) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    for (offset, line) in logical_lines(body) {
        let parsed = parse_field_line(line).map_err(|message| {
            ctx.field_error_at(decl, message, (body_start + offset, line.len().max(1)))
        })?;
        fields.extend(parsed.into_iter().filter(|f| is_exported(&f.name)));
    }
    Ok(fields)
}

/// Split a struct body into logical field lines.
///
/// Newlines and semicolons separate fields, except inside nested
/// brackets or literals (multi-line inline types, braces in tags).
fn logical_lines(body: &str) -> Vec<(usize, &str)> {
    let bytes = body.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut depth = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => depth = depth.saturating_sub(1),
            b'`' | b'"' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if quote == b'"' && bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'\n' | b';' if depth == 0 => {
                lines.push((start, &body[start..i]));
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < body.len() {
        lines.push((start, &body[start..]));
    }
    lines
        .into_iter()
        .filter(|(_, l)| !l.trim().is_empty())
        .collect()
}

/// Parse one field line into zero or more fields.
///
/// Multi-name fields (`A, B int`) expand in order. Embedded fields
/// (`Base`, `*Base`, `pkg.Base`) yield no fields.
fn parse_field_line(line: &str) -> std::result::Result<Vec<Field>, String> {
    // Tags are quoted or backquoted and always trail the type; type
    // expressions never contain quote characters.
    let without_tag = match line.find(['`', '"']) {
        Some(idx) => &line[..idx],
        None => line,
    };
    let trimmed = without_tag.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    // Embedded pointer field: *Base or *pkg.Base.
    if trimmed.starts_with('*') {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let mut rest = trimmed;
    loop {
        let (ident, after) = take_ident(rest.trim_start());
        if ident.is_empty() {
            return Err(format!("expected a field name in '{}'", trimmed));
        }
        names.push(ident.to_string());
        rest = after.trim_start();
        match rest.strip_prefix(',') {
            Some(after_comma) => rest = after_comma,
            None => break,
        }
    }

    if rest.is_empty() {
        if names.len() == 1 {
            // Embedded value field.
            return Ok(Vec::new());
        }
        return Err(format!("missing type for fields '{}'", names.join(", ")));
    }

    // Embedded qualified field: pkg.Base.
    if rest.starts_with('.') && names.len() == 1 {
        return Ok(Vec::new());
    }

    let ty = parse_type_expr(rest)?;
    Ok(names
        .into_iter()
        .map(|name| Field::new(name, ty.clone()))
        .collect())
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric() && *c != '_')
        .map_or(input.len(), |(i, _)| i);
    input.split_at(end)
}

#[cfg(test)]
mod tests {
    use fabrik_ir::TypeExpr;

    use super::*;

    fn parse(body: &str) -> Vec<Field> {
        let ctx = SourceContext::new(body, "model.go");
        parse_struct_fields(body, 0, "Test", &ctx).unwrap()
    }

    #[test]
    fn test_simple_fields() {
        let fields = parse("\n\tStreet string\n\tCity string\n");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Street");
        assert_eq!(fields[0].ty, TypeExpr::named("string"));
        assert_eq!(fields[1].name, "City");
    }

    #[test]
    fn test_multi_name_field_expands_in_order() {
        let fields = parse("\n\tWidth, Height int\n");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Width");
        assert_eq!(fields[1].name, "Height");
        assert_eq!(fields[1].ty, TypeExpr::named("int"));
    }

    #[test]
    fn test_unexported_fields_dropped() {
        let fields = parse("\n\tName string\n\tsecret string\n\ta, B int\n");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Name", "B"]);
    }

    #[test]
    fn test_embedded_fields_dropped() {
        let fields = parse("\n\tBase\n\t*Mixin\n\tio.Reader\n\tName string\n");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Name"]);
    }

    #[test]
    fn test_tags_stripped() {
        let fields = parse("\n\tName string `json:\"name\"`\n");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].ty, TypeExpr::named("string"));
    }

    #[test]
    fn test_semicolon_separated() {
        let fields = parse("Street string; City string");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_complex_types() {
        let fields = parse("\n\tTags []string\n\tOwner *Person\n\tIndex map[string]int\n");
        assert_eq!(fields[0].ty, TypeExpr::slice(TypeExpr::named("string")));
        assert_eq!(fields[1].ty, TypeExpr::pointer(TypeExpr::named("Person")));
        assert_eq!(
            fields[2].ty,
            TypeExpr::map(TypeExpr::named("string"), TypeExpr::named("int"))
        );
    }

    #[test]
    fn test_broken_field_errors() {
        let ctx = SourceContext::new("]]]", "model.go");
        assert!(parse_struct_fields("\n\tName ]]]\n", 0, "Test", &ctx).is_err());
    }
}
