use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use fabrik_codegen::lower::BuilderSpec;
use fabrik_parse::parse_batch;

use super::UnwrapOrExit;
use crate::inputs;

#[derive(Args)]
pub struct CheckCommand {
    /// Go source files or directories to scan
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let sources = inputs::collect(&self.inputs, self.recursive).unwrap_or_exit();
        if sources.is_empty() {
            eyre::bail!("no Go source files found in the given inputs");
        }

        let batch = parse_batch(&sources).unwrap_or_exit();

        println!(
            "✓ {} declaration{} across {} source file{}\n",
            batch.symbols.len(),
            if batch.symbols.len() == 1 { "" } else { "s" },
            sources.len(),
            if sources.len() == 1 { "" } else { "s" },
        );

        for decl in batch.symbols.iter() {
            println!("  {} ({})", decl.name, decl.source);
            let spec = BuilderSpec::lower(decl, &batch.symbols);
            for field in &spec.fields {
                println!("    {} {} [{}]", field.name, field.ty, field.kind.label());
            }
            println!();
        }

        if !batch.imports.is_empty() {
            println!("  External packages:");
            for (package, path) in batch.imports.iter() {
                if package == path {
                    println!("    {}", package);
                } else {
                    println!("    {} ({})", package, path);
                }
            }
        }

        Ok(())
    }
}
