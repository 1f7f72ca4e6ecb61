//! Per-declaration builder unit emission.
//!
//! Setters are emitted in field declaration order; appenders for
//! nested-slice fields follow in a second pass, in the same relative
//! order. A classified field whose shape disagrees with its recorded
//! type expression is a generator defect and aborts emission.

use eyre::{Result, bail};
use fabrik_ir::{ElemKind, FieldKind, TypeExpr};

use crate::emit::EmitContext;
use crate::lower::{BuilderSpec, FieldSpec};
use crate::naming::{builder_name, constructor_name};
use crate::{CodeBuilder, GoFile};

/// Emit one self-contained builder unit for a declaration.
pub fn emit_builder(spec: &BuilderSpec, ctx: &EmitContext) -> Result<String> {
    let builder_ty = builder_name(&spec.decl_name);
    let target_ty = ctx.decl_type(&spec.decl_name);

    let mut file = GoFile::new(ctx.package);
    file.imports_mut().add("fmt");
    if let Some(path) = ctx.import_path {
        file.imports_mut().add(path);
    }
    collect_qualified_imports(spec, ctx, &mut file);

    file.push(
        CodeBuilder::new()
            .comment(&format!(
                "{} incrementally constructs {} values.",
                builder_ty, target_ty
            ))
            .block(&format!("type {} struct {{", builder_ty), "}", |b| {
                b.line(&format!("target *{}", target_ty))
                    .line("validators []ValidatorFunc")
            })
            .build(),
    );

    file.push(emit_constructor(spec, ctx, &builder_ty, &target_ty)?);

    for field in &spec.fields {
        file.push(emit_setter(field, spec, ctx, &builder_ty)?);
    }
    for field in spec.appender_fields() {
        file.push(emit_appender(field, ctx, &builder_ty)?);
    }

    file.push(emit_protocol(&builder_ty, &target_ty));
    Ok(file.render())
}

/// Register the import of every external package an opaque field
/// mentions, including packages qualified inside verbatim exotic types.
/// Other kinds never render qualified names.
fn collect_qualified_imports(spec: &BuilderSpec, ctx: &EmitContext, file: &mut GoFile) {
    for field in &spec.fields {
        if field.kind != FieldKind::Opaque {
            continue;
        }
        let mut packages = Vec::new();
        field.ty.collect_packages(&mut packages);
        for package in packages {
            let path = ctx.imports.path_for(&package).unwrap_or(&package);
            if path.rsplit('/').next() == Some(package.as_str()) {
                file.imports_mut().add(path);
            } else {
                let path = path.to_string();
                file.imports_mut().add_aliased(&package, &path);
            }
        }
    }
}

fn emit_constructor(
    spec: &BuilderSpec,
    ctx: &EmitContext,
    builder_ty: &str,
    target_ty: &str,
) -> Result<String> {
    let ctor = constructor_name(&spec.decl_name);
    let mut entries = Vec::new();
    for field in &spec.fields {
        match &field.kind {
            FieldKind::Builtin => {
                let TypeExpr::Named(name) = &field.ty else {
                    bail!(
                        "internal: field '{}.{}' classified builtin but declared as '{}'",
                        spec.decl_name,
                        field.name,
                        field.ty
                    );
                };
                entries.push(format!("{}: {},", field.name, EmitContext::zero_value(name)));
            }
            FieldKind::Slice(_) | FieldKind::Map(_) => {
                entries.push(format!("{}: {}{{}},", field.name, ctx.go_type(&field.ty)));
            }
            FieldKind::Pointer(_) => {
                entries.push(format!("{}: nil,", field.name));
            }
            // Value-typed nested and opaque fields take Go's implicit
            // zero value; no literal can be synthesized for externals.
            FieldKind::Nested(_) | FieldKind::Opaque => {}
        }
    }

    let code = CodeBuilder::new()
        .comment(&format!(
            "{} returns a builder wrapping a zero-valued {}.",
            ctor, target_ty
        ))
        .block(&format!("func {}() *{} {{", ctor, builder_ty), "}", |b| {
            if entries.is_empty() {
                b.line(&format!("return &{}{{target: &{}{{}}}}", builder_ty, target_ty))
            } else {
                b.block(&format!("return &{}{{", builder_ty), "}", |b| {
                    b.block(&format!("target: &{}{{", target_ty), "},", |b| {
                        entries.iter().fold(b, |b, entry| b.line(entry))
                    })
                })
            }
        })
        .build();
    Ok(code)
}

fn emit_setter(
    field: &FieldSpec,
    spec: &BuilderSpec,
    ctx: &EmitContext,
    builder_ty: &str,
) -> Result<String> {
    let recv = format!("func (b *{}) {}", builder_ty, field.setter);
    let code = match &field.kind {
        FieldKind::Builtin | FieldKind::Opaque | FieldKind::Pointer(ElemKind::Builtin) => {
            CodeBuilder::new()
                .comment(&format!("{} sets the {} field.", field.setter, field.name))
                .block(
                    &format!("{}(value {}) *{} {{", recv, ctx.go_type(&field.ty), builder_ty),
                    "}",
                    |b| b.line(&format!("b.target.{} = value", field.name)).line("return b"),
                )
                .build()
        }

        FieldKind::Slice(ElemKind::Builtin) => {
            let elem = slice_elem(field, spec)?;
            let elem_ty = ctx.go_type(elem);
            CodeBuilder::new()
                .comment(&format!(
                    "{} replaces the {} slice with the given values.",
                    field.setter, field.name
                ))
                .block(
                    &format!("{}(values ...{}) *{} {{", recv, elem_ty, builder_ty),
                    "}",
                    |b| {
                        b.line(&format!(
                            "b.target.{} = append([]{}{{}}, values...)",
                            field.name, elem_ty
                        ))
                        .line("return b")
                    },
                )
                .build()
        }

        FieldKind::Slice(ElemKind::Nested(decl)) => {
            ensure_known(decl, field, spec, ctx)?;
            let elem_ty = nested_elem_type(decl, field, ctx);
            let sub_builder = builder_name(decl);
            CodeBuilder::new()
                .comment(&format!(
                    "{} builds each sub-builder and replaces the {} slice.",
                    field.setter, field.name
                ))
                .block(
                    &format!("{}(builders ...*{}) *{} {{", recv, sub_builder, builder_ty),
                    "}",
                    |b| {
                        b.line(&format!(
                            "items := make([]{}, 0, len(builders))",
                            elem_ty
                        ))
                        .block("for _, builder := range builders {", "}", |b| {
                            b.line(&format!(
                                "items = append(items, {})",
                                built_value(field.elem_pointer)
                            ))
                        })
                        .line(&format!("b.target.{} = items", field.name))
                        .line("return b")
                    },
                )
                .build()
        }

        FieldKind::Map(ElemKind::Builtin) => {
            let (key_ty, value_ty) = map_types(field, spec, ctx)?;
            CodeBuilder::new()
                .comment(&format!(
                    "{} sets one entry of the {} map, allocating it on first use.",
                    field.setter, field.name
                ))
                .block(
                    &format!(
                        "{}(key {}, value {}) *{} {{",
                        recv, key_ty, value_ty, builder_ty
                    ),
                    "}",
                    |b| {
                        b.block(
                            &format!("if b.target.{} == nil {{", field.name),
                            "}",
                            |b| {
                                b.line(&format!(
                                    "b.target.{} = map[{}]{}{{}}",
                                    field.name, key_ty, value_ty
                                ))
                            },
                        )
                        .line(&format!("b.target.{}[key] = value", field.name))
                        .line("return b")
                    },
                )
                .build()
        }

        FieldKind::Map(ElemKind::Nested(decl)) => {
            ensure_known(decl, field, spec, ctx)?;
            let (key_ty, _) = map_types(field, spec, ctx)?;
            let value_ty = nested_elem_type(decl, field, ctx);
            let sub_builder = builder_name(decl);
            CodeBuilder::new()
                .comment(&format!(
                    "{} builds the sub-builder and sets one entry of the {} map, allocating it on first use.",
                    field.setter, field.name
                ))
                .block(
                    &format!(
                        "{}(key {}, value *{}) *{} {{",
                        recv, key_ty, sub_builder, builder_ty
                    ),
                    "}",
                    |b| {
                        b.block(
                            &format!("if b.target.{} == nil {{", field.name),
                            "}",
                            |b| {
                                b.line(&format!(
                                    "b.target.{} = map[{}]{}{{}}",
                                    field.name, key_ty, value_ty
                                ))
                            },
                        )
                        .line(&format!(
                            "b.target.{}[key] = {}",
                            field.name,
                            built_map_value(field.elem_pointer)
                        ))
                        .line("return b")
                    },
                )
                .build()
        }

        FieldKind::Nested(decl) => {
            ensure_known(decl, field, spec, ctx)?;
            let sub_builder = builder_name(decl);
            CodeBuilder::new()
                .comment(&format!(
                    "{} builds the sub-builder and sets the {} field.",
                    field.setter, field.name
                ))
                .block(
                    &format!("{}(builder *{}) *{} {{", recv, sub_builder, builder_ty),
                    "}",
                    |b| {
                        b.line(&format!("b.target.{} = *builder.BuildTyped()", field.name))
                            .line("return b")
                    },
                )
                .build()
        }

        FieldKind::Pointer(ElemKind::Nested(decl)) => {
            ensure_known(decl, field, spec, ctx)?;
            let sub_builder = builder_name(decl);
            CodeBuilder::new()
                .comment(&format!(
                    "{} builds the sub-builder and sets the {} pointer.",
                    field.setter, field.name
                ))
                .block(
                    &format!("{}(builder *{}) *{} {{", recv, sub_builder, builder_ty),
                    "}",
                    |b| {
                        b.line(&format!("b.target.{} = builder.BuildTyped()", field.name))
                            .line("return b")
                    },
                )
                .build()
        }
    };
    Ok(code)
}

fn emit_appender(field: &FieldSpec, ctx: &EmitContext, builder_ty: &str) -> Result<String> {
    let Some(appender) = &field.appender else {
        bail!(
            "internal: appender pass reached field '{}' without an appender name",
            field.name
        );
    };
    let code = CodeBuilder::new()
        .comment(&format!(
            "{} builds one sub-builder and appends it to the {} slice.",
            appender, field.name
        ))
        .block(
            &format!(
                "func (b *{}) {}(builder *{}) *{} {{",
                builder_ty,
                appender,
                sub_builder_for(field, ctx)?,
                builder_ty
            ),
            "}",
            |b| {
                b.line(&format!(
                    "b.target.{} = append(b.target.{}, {})",
                    field.name,
                    field.name,
                    built_value(field.elem_pointer)
                ))
                .line("return b")
            },
        )
        .build();
    Ok(code)
}

fn emit_protocol(builder_ty: &str, target_ty: &str) -> String {
    CodeBuilder::new()
        .comment("WithValidation registers a custom validator, run by BuildAndValidate in")
        .comment("registration order.")
        .block(
            &format!(
                "func (b *{}) WithValidation(fn ValidatorFunc) *{} {{",
                builder_ty, builder_ty
            ),
            "}",
            |b| {
                b.line("b.validators = append(b.validators, fn)")
                    .line("return b")
            },
        )
        .blank()
        .comment("Build returns the accumulated target as an untyped handle.")
        .block(
            &format!("func (b *{}) Build() interface{{}} {{", builder_ty),
            "}",
            |b| b.line("return b.target"),
        )
        .blank()
        .comment("BuildTyped returns the accumulated target.")
        .block(
            &format!("func (b *{}) BuildTyped() *{} {{", builder_ty, target_ty),
            "}",
            |b| b.line("return b.target"),
        )
        .blank()
        .comment("BuildAndValidate runs the registered validators in registration order,")
        .comment("stopping at the first failure, then the target's own Validate method")
        .comment("when it implements Validatable.")
        .block(
            &format!(
                "func (b *{}) BuildAndValidate() (*{}, error) {{",
                builder_ty, target_ty
            ),
            "}",
            |b| {
                b.block("for _, fn := range b.validators {", "}", |b| {
                    b.block("if err := fn(b.target); err != nil {", "}", |b| {
                        b.line("return nil, err")
                    })
                })
                .block(
                    "if v, ok := interface{}(b.target).(Validatable); ok {",
                    "}",
                    |b| {
                        b.block("if err := v.Validate(); err != nil {", "}", |b| {
                            b.line("return nil, err")
                        })
                    },
                )
                .line("return b.target, nil")
            },
        )
        .blank()
        .comment("MustBuild is BuildAndValidate with any failure escalated to a panic.")
        .block(
            &format!("func (b *{}) MustBuild() *{} {{", builder_ty, target_ty),
            "}",
            |b| {
                b.line("target, err := b.BuildAndValidate()")
                    .block("if err != nil {", "}", |b| {
                        b.line(&format!(
                            "panic(fmt.Sprintf(\"{}: %v\", err))",
                            builder_ty
                        ))
                    })
                    .line("return target")
            },
        )
        .blank()
        .comment("Clone returns a new builder wrapping a shallow copy of the target and")
        .comment("an independent copy of the validator list. Nested pointers and")
        .comment("collections stay shared with the original.")
        .block(
            &format!("func (b *{}) Clone() *{} {{", builder_ty, builder_ty),
            "}",
            |b| {
                b.line("target := *b.target")
                    .line("validators := make([]ValidatorFunc, len(b.validators))")
                    .line("copy(validators, b.validators)")
                    .line(&format!(
                        "return &{}{{target: &target, validators: validators}}",
                        builder_ty
                    ))
            },
        )
        .build()
}

/// The Go expression that turns a sub-builder into a stored element.
fn built_value(elem_pointer: bool) -> &'static str {
    if elem_pointer {
        "builder.BuildTyped()"
    } else {
        "*builder.BuildTyped()"
    }
}

fn built_map_value(elem_pointer: bool) -> &'static str {
    if elem_pointer {
        "value.BuildTyped()"
    } else {
        "*value.BuildTyped()"
    }
}

/// Element type as stored in the target slice or map.
fn nested_elem_type(decl: &str, field: &FieldSpec, ctx: &EmitContext) -> String {
    if field.elem_pointer {
        format!("*{}", ctx.decl_type(decl))
    } else {
        ctx.decl_type(decl)
    }
}

fn sub_builder_for(field: &FieldSpec, _ctx: &EmitContext) -> Result<String> {
    match field.kind.nested_decl() {
        Some(decl) => Ok(builder_name(decl)),
        None => bail!(
            "internal: field '{}' has an appender but no nested declaration",
            field.name
        ),
    }
}

fn slice_elem<'a>(field: &'a FieldSpec, spec: &BuilderSpec) -> Result<&'a TypeExpr> {
    match &field.ty {
        TypeExpr::Slice(elem) => Ok(elem),
        other => bail!(
            "internal: field '{}.{}' classified as slice but declared as '{}'",
            spec.decl_name,
            field.name,
            other
        ),
    }
}

fn map_types(field: &FieldSpec, spec: &BuilderSpec, ctx: &EmitContext) -> Result<(String, String)> {
    match &field.ty {
        TypeExpr::Map { key, value } => Ok((ctx.go_type(key), ctx.go_type(value))),
        other => bail!(
            "internal: field '{}.{}' classified as map but declared as '{}'",
            spec.decl_name,
            field.name,
            other
        ),
    }
}

/// A classified nested reference must exist in the symbol table; a miss
/// signals a generator defect, not bad input.
fn ensure_known(
    decl: &str,
    field: &FieldSpec,
    spec: &BuilderSpec,
    ctx: &EmitContext,
) -> Result<()> {
    if ctx.symbols.contains(decl) {
        Ok(())
    } else {
        bail!(
            "internal: field '{}.{}' references declaration '{}' missing from the symbol table",
            spec.decl_name,
            field.name,
            decl
        )
    }
}
