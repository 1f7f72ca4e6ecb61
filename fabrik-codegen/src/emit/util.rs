//! Shared protocol-support unit: the interfaces and function types the
//! generated builders rely on.

use crate::emit::EmitContext;
use crate::{CodeBuilder, GoFile};

/// Emit the support unit. Its content is fixed apart from the package
/// clause.
pub fn emit_util(ctx: &EmitContext) -> String {
    let mut file = GoFile::new(ctx.package);

    file.push(
        CodeBuilder::new()
            .comment("Validatable is implemented by target types that carry their own")
            .comment("validation rules. BuildAndValidate consults it after the registered")
            .comment("validators pass.")
            .block("type Validatable interface {", "}", |b| {
                b.line("Validate() error")
            })
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("ValidatorFunc is a custom validation step registered with")
            .comment("WithValidation. A non-nil error aborts BuildAndValidate.")
            .line("type ValidatorFunc func(target interface{}) error")
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("BuilderOption mutates a builder during construction.")
            .line("type BuilderOption func(builder interface{})")
            .build(),
    );

    file.render()
}
