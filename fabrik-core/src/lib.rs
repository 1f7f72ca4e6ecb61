//! Core utilities shared across the fabrik workspace.

mod file;
mod utils;

pub use file::{GeneratedFile, WriteResult, write_file};
pub use utils::{is_exported, to_pascal_case, to_snake_case};
