//! GoFile abstraction for structured Go file generation.
//!
//! Assembles the generated-code header, package clause, import block,
//! and body sections with blank lines between them.

use crate::{CodeBuilder, GoImports};

/// Header carried by every generated unit. The `Code generated ... DO
/// NOT EDIT.` shape is the convention Go tooling recognizes.
pub const GENERATED_HEADER: &str = "// Code generated by fabrik. DO NOT EDIT.";

/// A structured representation of a generated Go file.
#[derive(Debug, Default)]
pub struct GoFile {
    package: String,
    imports: GoImports,
    body: Vec<String>,
}

impl GoFile {
    /// Create a file in the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: GoImports::new(),
            body: Vec::new(),
        }
    }

    /// Mutable access to the import collector.
    pub fn imports_mut(&mut self) -> &mut GoImports {
        &mut self.imports
    }

    /// Add a body section. Sections are separated by blank lines.
    pub fn push(&mut self, section: impl Into<String>) {
        let section = section.into();
        if !section.trim().is_empty() {
            self.body.push(section);
        }
    }

    /// Render the complete file.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new()
            .line(GENERATED_HEADER)
            .blank()
            .line(&format!("package {}", self.package));

        if !self.imports.is_empty() {
            builder = self.imports.render(builder.blank());
        }

        for section in &self.body {
            builder = builder.blank().raw(section.trim_end_matches('\n')).raw("\n");
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file() {
        let file = GoFile::new("builders");
        assert_eq!(
            file.render(),
            "// Code generated by fabrik. DO NOT EDIT.\n\npackage builders\n"
        );
    }

    #[test]
    fn test_file_with_imports_and_body() {
        let mut file = GoFile::new("builders");
        file.imports_mut().add("fmt");
        file.push("func hello() {\n\tfmt.Println(\"hi\")\n}\n");

        let code = file.render();
        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("package builders\n\nimport \"fmt\"\n\nfunc hello() {"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_sections_separated_by_blank_lines() {
        let mut file = GoFile::new("builders");
        file.push("type A struct{}\n");
        file.push("type B struct{}\n");
        assert!(file.render().contains("type A struct{}\n\ntype B struct{}\n"));
    }
}
