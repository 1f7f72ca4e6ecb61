//! Shared registry unit: a name-to-constructor table over every
//! generated builder.

use crate::emit::EmitContext;
use crate::naming::constructor_name;
use crate::{CodeBuilder, GoFile};

/// Emit the registry unit. Default registration follows declaration
/// order so repeated runs produce identical files.
pub fn emit_registry(ctx: &EmitContext) -> String {
    let mut file = GoFile::new(ctx.package);
    file.imports_mut().add("fmt");
    file.imports_mut().add("sync");

    file.push(
        CodeBuilder::new()
            .comment("BuilderConstructor creates a fresh builder and returns its untyped")
            .comment("handle.")
            .line("type BuilderConstructor func() interface{}")
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("Registry maps type names to builder constructors. All methods are")
            .comment("safe for concurrent use.")
            .block("type Registry struct {", "}", |b| {
                b.line("mu sync.RWMutex")
                    .line("constructors map[string]BuilderConstructor")
            })
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("NewRegistry returns an empty registry.")
            .block("func NewRegistry() *Registry {", "}", |b| {
                b.line("return &Registry{constructors: map[string]BuilderConstructor{}}")
            })
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("Register stores the constructor under the given name, replacing any")
            .comment("previous entry.")
            .block(
                "func (r *Registry) Register(name string, fn BuilderConstructor) {",
                "}",
                |b| {
                    b.line("r.mu.Lock()")
                        .line("defer r.mu.Unlock()")
                        .line("r.constructors[name] = fn")
                },
            )
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("Get returns the constructor registered under the given name.")
            .block(
                "func (r *Registry) Get(name string) (BuilderConstructor, bool) {",
                "}",
                |b| {
                    b.line("r.mu.RLock()")
                        .line("defer r.mu.RUnlock()")
                        .line("fn, ok := r.constructors[name]")
                        .line("return fn, ok")
                },
            )
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("GetAll returns a copy of the constructor table; mutating it does not")
            .comment("affect the registry.")
            .block(
                "func (r *Registry) GetAll() map[string]BuilderConstructor {",
                "}",
                |b| {
                    b.line("r.mu.RLock()")
                        .line("defer r.mu.RUnlock()")
                        .line("all := make(map[string]BuilderConstructor, len(r.constructors))")
                        .block("for name, fn := range r.constructors {", "}", |b| {
                            b.line("all[name] = fn")
                        })
                        .line("return all")
                },
            )
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("Create instantiates a builder for the given name.")
            .block(
                "func (r *Registry) Create(name string) (interface{}, error) {",
                "}",
                |b| {
                    b.line("fn, ok := r.Get(name)")
                        .block("if !ok {", "}", |b| {
                            b.line("return nil, fmt.Errorf(\"no builder registered for type %q\", name)")
                        })
                        .line("return fn(), nil")
                },
            )
            .build(),
    );

    file.push(
        CodeBuilder::new()
            .comment("NewDefaultRegistry returns a registry with every generated builder")
            .comment("pre-registered.")
            .block("func NewDefaultRegistry() *Registry {", "}", |b| {
                b.line("r := NewRegistry()")
                    .each(ctx.symbols.iter(), |b, decl| {
                        b.line(&format!(
                            "r.Register(\"{}\", func() interface{{}} {{ return {}() }})",
                            decl.name,
                            constructor_name(&decl.name)
                        ))
                    })
                    .line("return r")
            })
            .build(),
    );

    file.render()
}
