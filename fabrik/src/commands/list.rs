use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use fabrik_codegen::lower::BuilderSpec;
use fabrik_codegen::naming::file_name;
use fabrik_parse::{ParsedBatch, parse_batch};

use super::UnwrapOrExit;
use crate::inputs;

#[derive(Args)]
pub struct ListCommand {
    /// Go source files or directories to scan
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Print the declarations as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let sources = inputs::collect(&self.inputs, self.recursive).unwrap_or_exit();
        let batch = parse_batch(&sources).unwrap_or_exit();

        if self.json {
            return Self::print_json(&batch);
        }

        if batch.symbols.is_empty() {
            println!("No struct declarations found");
            return Ok(());
        }

        println!("Declarations:");
        for decl in batch.symbols.iter() {
            println!("  {} -> {}", decl.name, file_name(&decl.name));
            let spec = BuilderSpec::lower(decl, &batch.symbols);
            for field in &spec.fields {
                println!("    {} {} [{}]", field.name, field.ty, field.kind.label());
            }
        }

        Ok(())
    }

    fn print_json(batch: &ParsedBatch) -> Result<()> {
        let decls: Vec<_> = batch
            .symbols
            .iter()
            .map(|decl| {
                let spec = BuilderSpec::lower(decl, &batch.symbols);
                let fields: Vec<_> = spec
                    .fields
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "name": f.name,
                            "type": f.ty.to_string(),
                            "kind": f.kind.label(),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "name": decl.name,
                    "source": decl.source,
                    "unit": file_name(&decl.name),
                    "fields": fields,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&decls)?);
        Ok(())
    }
}
