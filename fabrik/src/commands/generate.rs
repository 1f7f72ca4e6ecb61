use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use fabrik_codegen::{Generator, GeneratorConfig};
use fabrik_parse::{ParsedBatch, parse_batch};

use super::UnwrapOrExit;
use crate::inputs;

#[derive(Args)]
pub struct GenerateCommand {
    /// Go source files or directories to scan
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for generated files
    #[arg(short, long, default_value = "builders")]
    pub output: PathBuf,

    /// Package name declared by the generated files
    #[arg(short, long, default_value = "builders")]
    pub package: String,

    /// Import path of the package the structs live in; omit when
    /// generating into that same package
    #[arg(long, default_value = "")]
    pub import_path: String,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let sources = inputs::collect(&self.inputs, self.recursive).unwrap_or_exit();
        if sources.is_empty() {
            eyre::bail!("no Go source files found in the given inputs");
        }

        let batch = parse_batch(&sources).unwrap_or_exit();
        if batch.symbols.is_empty() {
            eyre::bail!("no struct declarations found in {} source file(s)", sources.len());
        }

        let config = GeneratorConfig {
            package: self.package.clone(),
            import_path: self.import_path.clone(),
        };
        let generator = Generator::new(&batch, config);

        if self.dry_run {
            self.run_preview(&generator)
        } else {
            self.run_generation(&generator, &batch)
        }
    }

    fn run_generation(&self, generator: &Generator, batch: &ParsedBatch) -> Result<()> {
        let report = generator
            .generate(&self.output)
            .wrap_err("Failed to generate builders")?;

        println!("Builders ({}):", report.declarations);
        for decl in batch.symbols.iter() {
            println!(
                "  {} ({} field{})",
                decl.name,
                decl.fields.len(),
                if decl.fields.len() == 1 { "" } else { "s" }
            );
        }
        println!();
        if report.files_unchanged > 0 {
            println!(
                "Generated: {} files in {}/ ({} unchanged)",
                report.files_written,
                self.output.display(),
                report.files_unchanged
            );
        } else {
            println!(
                "Generated: {} files in {}/",
                report.files_written,
                self.output.display()
            );
        }

        Ok(())
    }

    fn run_preview(&self, generator: &Generator) -> Result<()> {
        let files = generator.preview()?;

        for file in &files {
            println!("── {} ──", file.name);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}
