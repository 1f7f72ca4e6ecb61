//! Batch orchestration: lower every declaration, emit every unit, and
//! either preview the files in memory or write them to an output
//! directory.

use std::path::{Path, PathBuf};

use eyre::Result;
use fabrik_core::{GeneratedFile, WriteResult};
use fabrik_parse::ParsedBatch;

use crate::emit::{EmitContext, emit_builder, emit_registry, emit_util};
use crate::lower::BuilderSpec;
use crate::naming::file_name;

/// Output configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Go package name the generated units declare.
    pub package: String,
    /// Import path of the package the declarations live in. Empty when
    /// the builders are generated into that same package.
    pub import_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "builders".to_string(),
            import_path: String::new(),
        }
    }
}

impl GeneratorConfig {
    /// Package qualifier for the declarations' types, derived from the
    /// last segment of the import path.
    fn qualifier(&self) -> Option<&str> {
        if self.import_path.is_empty() {
            None
        } else {
            self.import_path.rsplit('/').next()
        }
    }

    fn import_path(&self) -> Option<&str> {
        if self.import_path.is_empty() {
            None
        } else {
            Some(&self.import_path)
        }
    }
}

/// One rendered unit, not yet on disk.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// File name relative to the output directory.
    pub name: String,
    pub content: String,
}

impl GeneratedFile for PreviewFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.name)
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

/// Summary of a completed generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerateReport {
    pub declarations: usize,
    pub files_written: usize,
    /// Units whose on-disk content already matched and were left alone.
    pub files_unchanged: usize,
}

/// Renders a parsed batch into its generated units.
pub struct Generator<'a> {
    batch: &'a ParsedBatch,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(batch: &'a ParsedBatch, config: GeneratorConfig) -> Self {
        Self { batch, config }
    }

    /// Render every unit in memory: one builder file per declaration in
    /// declaration order, then the registry and support units.
    pub fn preview(&self) -> Result<Vec<PreviewFile>> {
        let ctx = self.context();
        let mut files = Vec::with_capacity(self.batch.symbols.len() + 2);
        for decl in self.batch.symbols.iter() {
            let spec = BuilderSpec::lower(decl, &self.batch.symbols);
            files.push(PreviewFile {
                name: file_name(&decl.name),
                content: emit_builder(&spec, &ctx)?,
            });
        }
        files.push(PreviewFile {
            name: "registry.go".to_string(),
            content: emit_registry(&ctx),
        });
        files.push(PreviewFile {
            name: "util.go".to_string(),
            content: emit_util(&ctx),
        });
        Ok(files)
    }

    /// Render and write every unit under the output directory. Units
    /// whose on-disk content already matches are left untouched.
    ///
    /// Writes are non-transactional: a failure aborts the run and
    /// leaves previously written files in place.
    pub fn generate(&self, out_dir: &Path) -> Result<GenerateReport> {
        let files = self.preview()?;
        let mut written = 0;
        let mut unchanged = 0;
        for file in &files {
            match file.write(out_dir)? {
                WriteResult::Written => written += 1,
                WriteResult::Skipped => unchanged += 1,
            }
        }
        Ok(GenerateReport {
            declarations: self.batch.symbols.len(),
            files_written: written,
            files_unchanged: unchanged,
        })
    }

    fn context(&self) -> EmitContext<'_> {
        EmitContext {
            symbols: &self.batch.symbols,
            imports: &self.batch.imports,
            package: &self.config.package,
            qualifier: self.config.qualifier(),
            import_path: self.config.import_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use fabrik_parse::{SourceFile, parse_batch};

    use super::*;

    fn batch() -> ParsedBatch {
        parse_batch(&[SourceFile::new(
            "model.go",
            "package model\n\ntype Address struct {\n\tStreet string\n\tCity string\n}\n\ntype Person struct {\n\tName string\n\tHome Address\n}\n",
        )])
        .unwrap()
    }

    #[test]
    fn test_preview_emits_one_unit_per_declaration_plus_shared() {
        let batch = batch();
        let generator = Generator::new(&batch, GeneratorConfig::default());
        let files = generator.preview().unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["address_builder.go", "person_builder.go", "registry.go", "util.go"]
        );
    }

    #[test]
    fn test_preview_is_deterministic() {
        let batch = batch();
        let generator = Generator::new(&batch, GeneratorConfig::default());
        let first = generator.preview().unwrap();
        let second = generator.preview().unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.content, b.content);
        }
    }

    #[test]
    fn test_qualifier_from_import_path() {
        let config = GeneratorConfig {
            package: "builders".to_string(),
            import_path: "example.com/shop/model".to_string(),
        };
        assert_eq!(config.qualifier(), Some("model"));
        assert_eq!(GeneratorConfig::default().qualifier(), None);
    }

    #[test]
    fn test_generate_writes_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let batch = batch();
        let generator = Generator::new(&batch, GeneratorConfig::default());

        let report = generator.generate(temp.path()).unwrap();
        assert_eq!(report.declarations, 2);
        assert_eq!(report.files_written, 4);
        assert_eq!(report.files_unchanged, 0);
        assert!(temp.path().join("address_builder.go").exists());
        assert!(temp.path().join("registry.go").exists());
        assert!(temp.path().join("util.go").exists());
    }

    #[test]
    fn test_regenerate_skips_unchanged_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let batch = batch();
        let generator = Generator::new(&batch, GeneratorConfig::default());

        generator.generate(temp.path()).unwrap();
        let second = generator.generate(temp.path()).unwrap();
        assert_eq!(second.files_written, 0);
        assert_eq!(second.files_unchanged, 4);

        // A unit edited out from under the generator gets rewritten.
        std::fs::write(temp.path().join("util.go"), "tampered").unwrap();
        let third = generator.generate(temp.path()).unwrap();
        assert_eq!(third.files_written, 1);
        assert_eq!(third.files_unchanged, 3);
    }
}
