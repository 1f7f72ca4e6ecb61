//! Go builder code generation.
//!
//! Takes a parsed batch (symbol table + import index) and renders one
//! fluent builder unit per declaration, a name-keyed constructor
//! registry, and the shared protocol-support unit.
//!
//! # Module Organization
//!
//! - [`classify`] - field classification into the closed type algebra
//! - [`lower`] - per-declaration builder specs (setter/appender naming)
//! - [`emit`] - unit emitters (builder, registry, util)
//! - [`CodeBuilder`] - indentation-aware code buffer
//! - [`GoFile`] - package clause + import block + body rendering
//! - [`Generator`] - batch orchestration: preview and write

pub mod classify;
pub mod emit;
pub mod lower;
pub mod naming;

mod code_builder;
mod generator;
mod go_file;
mod imports;

pub use code_builder::CodeBuilder;
pub use generator::{GenerateReport, Generator, GeneratorConfig, PreviewFile};
pub use go_file::GoFile;
pub use imports::GoImports;
