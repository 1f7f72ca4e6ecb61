//! Source scanning: comment stripping, struct-block and import-block
//! extraction.
//!
//! The scanner does not try to be a Go parser. It walks the top level of
//! a file, skips string literals and brace-balanced blocks it does not
//! care about, and pulls out `type X struct { ... }` bodies and the
//! import block, all with byte offsets preserved for diagnostics.

use miette::SourceSpan;

use crate::error::{Result, SourceContext};

/// A struct declaration located in the source, body not yet parsed.
#[derive(Debug)]
pub(crate) struct RawStruct {
    pub name: String,
    pub name_span: SourceSpan,
    /// Byte range of the struct body, between the braces.
    pub body_start: usize,
    pub body_end: usize,
}

/// One entry of an import block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawImport {
    pub alias: Option<String>,
    pub path: String,
}

#[derive(Debug, Default)]
pub(crate) struct ScanOutput {
    pub structs: Vec<RawStruct>,
    pub imports: Vec<RawImport>,
}

/// Replace comments with spaces, preserving byte offsets and newlines.
pub(crate) fn strip_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = bytes.to_vec();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out[i] = b' ';
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                out[i] = b' ';
                out[i + 1] = b' ';
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                        out[i] = b' ';
                        out[i + 1] = b' ';
                        i += 2;
                        break;
                    }
                    if bytes[i] != b'\n' {
                        out[i] = b' ';
                    }
                    i += 1;
                }
            }
            b'"' | b'\'' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote && bytes[i] != b'\n' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'`' {
                    i += 1;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    // Only ASCII spaces were substituted, so the result stays valid UTF-8.
    String::from_utf8(out).expect("comment stripping preserves UTF-8")
}

/// Scan a comment-stripped source for struct declarations and imports.
pub(crate) fn scan(clean: &str, ctx: &SourceContext) -> Result<ScanOutput> {
    let mut s = Scanner {
        bytes: clean.as_bytes(),
        pos: 0,
        ctx,
    };
    let mut output = ScanOutput::default();

    while !s.eof() {
        s.skip_ws();
        match s.peek() {
            None => break,
            Some(b'"') | Some(b'\'') | Some(b'`') => s.skip_literal(),
            Some(b'{') => s.skip_balanced(b'{', b'}')?,
            Some(b'(') => s.skip_balanced(b'(', b')')?,
            Some(c) if is_ident_start(c) => {
                let ident = s.read_ident();
                match ident.as_str() {
                    "import" => s.scan_import_clause(&mut output)?,
                    "type" => s.scan_type_clause(&mut output)?,
                    _ => {}
                }
            }
            Some(_) => s.bump(),
        }
    }

    Ok(output)
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    ctx: &'a SourceContext,
}

impl Scanner<'_> {
    fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    /// Skip a string, raw string, or rune literal starting at the cursor.
    fn skip_literal(&mut self) {
        let quote = self.bytes[self.pos];
        self.bump();
        while let Some(c) = self.peek() {
            if c == quote {
                self.bump();
                return;
            }
            if quote != b'`' && c == b'\\' {
                self.bump();
            }
            self.bump();
        }
    }

    /// Skip a balanced block starting at `open`, ending after the
    /// matching `close`. Literals inside are skipped, so braces in
    /// struct tags cannot unbalance the scan.
    fn skip_balanced(&mut self, open: u8, close: u8) -> Result<()> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            if c == b'"' || c == b'\'' || c == b'`' {
                self.skip_literal();
                continue;
            }
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    self.bump();
                    return Ok(());
                }
            }
            self.bump();
        }
        Err(self.ctx.syntax_error_at(
            format!("unclosed '{}'", open as char),
            (start, 1usize),
        ))
    }

    fn scan_import_clause(&mut self, output: &mut ScanOutput) -> Result<()> {
        self.skip_ws();
        if self.peek() == Some(b'(') {
            self.bump();
            loop {
                self.skip_ws();
                match self.peek() {
                    None => {
                        return Err(self
                            .ctx
                            .syntax_error("unclosed import block".to_string()));
                    }
                    Some(b')') => {
                        self.bump();
                        return Ok(());
                    }
                    _ => self.scan_import_spec(output)?,
                }
            }
        }
        self.scan_import_spec(output)
    }

    fn scan_import_spec(&mut self, output: &mut ScanOutput) -> Result<()> {
        self.skip_ws();
        let mut alias = None;
        match self.peek() {
            Some(b'.') | Some(b'_') => {
                // Dot and blank imports contribute nothing to qualified
                // type references.
                self.bump();
                self.skip_ws();
                self.expect_import_path()?;
                return Ok(());
            }
            Some(c) if is_ident_start(c) => {
                alias = Some(self.read_ident());
                self.skip_ws();
            }
            _ => {}
        }
        let path = self.expect_import_path()?;
        output.imports.push(RawImport { alias, path });
        Ok(())
    }

    fn expect_import_path(&mut self) -> Result<String> {
        if self.peek() != Some(b'"') {
            return Err(self.ctx.syntax_error_at(
                "expected quoted import path".to_string(),
                (self.pos, 1usize),
            ));
        }
        let start = self.pos;
        self.skip_literal();
        let raw = &self.bytes[start + 1..self.pos.saturating_sub(1)];
        Ok(String::from_utf8_lossy(raw).into_owned())
    }

    fn scan_type_clause(&mut self, output: &mut ScanOutput) -> Result<()> {
        self.skip_ws();
        if self.peek() == Some(b'(') {
            self.bump();
            loop {
                self.skip_ws();
                match self.peek() {
                    None => {
                        return Err(self.ctx.syntax_error("unclosed type block".to_string()));
                    }
                    Some(b')') => {
                        self.bump();
                        return Ok(());
                    }
                    _ => self.scan_type_spec(output, true)?,
                }
            }
        }
        self.scan_type_spec(output, false)
    }

    fn scan_type_spec(&mut self, output: &mut ScanOutput, grouped: bool) -> Result<()> {
        self.skip_ws();
        let name_start = self.pos;
        let name = self.read_ident();
        if name.is_empty() {
            return Err(self.ctx.syntax_error_at(
                "expected a type name".to_string(),
                (self.pos, 1usize),
            ));
        }
        let name_span = SourceSpan::from((name_start, name.len()));
        self.skip_ws();

        // Alias declarations (`type A = B`) are not aggregates.
        if self.peek() == Some(b'=') {
            self.bump();
            self.skip_spec_tail(grouped)?;
            return Ok(());
        }

        let keyword_start = self.pos;
        let keyword = if self.peek().is_some_and(is_ident_start) {
            self.read_ident()
        } else {
            String::new()
        };

        if keyword == "struct" {
            self.skip_ws();
            if self.peek() != Some(b'{') {
                return Err(self.ctx.syntax_error_at(
                    format!("expected '{{' after 'struct' in declaration '{}'", name),
                    (keyword_start, "struct".len()),
                ));
            }
            let body_start = self.pos + 1;
            self.skip_balanced(b'{', b'}')?;
            let body_end = self.pos - 1;
            output.structs.push(RawStruct {
                name,
                name_span,
                body_start,
                body_end,
            });
            return Ok(());
        }

        // Any other underlying type (named, func, interface, ...) is not
        // an aggregate declaration; skip to the end of the spec.
        self.skip_spec_tail(grouped)?;
        Ok(())
    }

    /// Skip to the end of a non-struct type spec: the next newline at
    /// nesting depth zero, or the group's closing paren (not consumed).
    fn skip_spec_tail(&mut self, grouped: bool) -> Result<()> {
        while let Some(c) = self.peek() {
            match c {
                b'\n' => {
                    self.bump();
                    return Ok(());
                }
                b'"' | b'\'' | b'`' => self.skip_literal(),
                b'{' => self.skip_balanced(b'{', b'}')?,
                b'[' => self.skip_balanced(b'[', b']')?,
                b'(' => self.skip_balanced(b'(', b')')?,
                b')' if grouped => return Ok(()),
                _ => self.bump(),
            }
        }
        Ok(())
    }
}
