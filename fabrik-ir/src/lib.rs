//! Declaration intermediate representation.
//!
//! This crate defines the data model shared between the parser and the
//! code generator:
//!
//! ```text
//! .go sources → Declarations + SymbolTable (parsing) → FieldKind (classification) → Generator
//! ```
//!
//! Everything here is plain data. The symbol table is built once per
//! batch, before any classification happens, so declarations may
//! reference each other forward, backward, or cyclically.

mod decl;
mod kind;
mod symbols;
mod ty;

pub use decl::{Declaration, Field};
pub use kind::{ElemKind, FieldKind};
pub use symbols::SymbolTable;
pub use ty::TypeExpr;
