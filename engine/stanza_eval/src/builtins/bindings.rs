//! Binding forms and introspection.
//!
//! These builtins take quoted arguments so they can control evaluation:
//! binding expressions run in the enclosing scope, bodies run under a
//! freshly pushed frame. [`FrameGuard`] keeps the scope stack balanced even
//! when a body evaluation fails.

use rustc_hash::FxHashMap;

use stanza_ir::{
    invalid_argument, unbound_name, CallContext, Entity, EntityType, EvalResult, FunctionType,
    FunctionValue, Name, NamePattern, Overload,
};

use super::{native, RegistryBuilder};

pub(super) fn install(builder: &mut RegistryBuilder<'_>) {
    builder.define(
        "var",
        "The value bound to a name: (var &x).",
        vec![Overload::new(
            FunctionType::fixed(vec![quoted_name()], EntityType::Any),
            native(|ctx, args| {
                let name = single_quoted_name(args, "var")?;
                ctx.lookup_binding(name)
                    .ok_or_else(|| unbound_name(ctx.interner().lookup(name)))
            }),
        )],
    );

    // Two forms. ((let &(x 1) &(y 2)) &body) binds several names at once
    // and takes its body curried; (let &x value &body) binds one name to an
    // already-evaluated value. The curried form registers first; a quoted
    // bare name does not match its binding pattern, so the three-argument
    // form still resolves.
    builder.define(
        "let",
        "Local bindings: ((let &(x 1)) &body) or (let &x value &body).",
        vec![
            Overload::new(
                FunctionType::variadic(
                    vec![],
                    EntityType::quoted(EntityType::call_pattern(
                        EntityType::Name(NamePattern::Any),
                        vec![EntityType::Any],
                    )),
                    EntityType::function(FunctionType::fixed(
                        vec![EntityType::quoted(EntityType::Any)],
                        EntityType::Any,
                    )),
                ),
                native(|_, args| {
                    let mut pairs = Vec::with_capacity(args.len());
                    for arg in args {
                        pairs.push(binding_pair(arg)?);
                    }
                    Ok(Entity::function(FunctionValue::new(vec![Overload::new(
                        FunctionType::fixed(
                            vec![EntityType::quoted(EntityType::Any)],
                            EntityType::Any,
                        ),
                        native(move |ctx, args| {
                            let [Entity::Quoted(body)] = args else {
                                return Err(invalid_argument("let expects a quoted body"));
                            };
                            // Binding expressions run in the enclosing
                            // scope, before the new frame exists.
                            let mut frame = FxHashMap::default();
                            for (name, expr) in &pairs {
                                frame.insert(*name, ctx.eval(expr)?);
                            }
                            FrameGuard::new(&mut *ctx, frame).eval(body)
                        }),
                    )])))
                }),
            ),
            Overload::new(
                FunctionType::fixed(
                    vec![quoted_name(), EntityType::Any, EntityType::quoted(EntityType::Any)],
                    EntityType::Any,
                ),
                native(|ctx, args| {
                    let [Entity::Quoted(quoted), value, Entity::Quoted(body)] = args else {
                        return Err(invalid_argument("let expects a name, a value, and a body"));
                    };
                    let Entity::Name(name) = &**quoted else {
                        return Err(invalid_argument("let expects a quoted name"));
                    };
                    let mut frame = FxHashMap::default();
                    frame.insert(*name, value.clone());
                    FrameGuard::new(&mut *ctx, frame).eval(body)
                }),
            ),
        ],
    );

    let group = builder.name("$");
    let nil = builder.name("nil");
    builder.define(
        "foreach",
        "Evaluate a body once per element: (foreach &x &(1 2 3) &body).",
        vec![Overload::new(
            FunctionType::fixed(
                vec![
                    quoted_name(),
                    EntityType::quoted(EntityType::Any),
                    EntityType::quoted(EntityType::Any),
                ],
                EntityType::Any,
            ),
            native(move |ctx, args| {
                let [Entity::Quoted(quoted), Entity::Quoted(seq), Entity::Quoted(body)] = args
                else {
                    return Err(invalid_argument(
                        "foreach expects a name, a sequence, and a body",
                    ));
                };
                let Entity::Name(name) = &**quoted else {
                    return Err(invalid_argument("foreach expects a quoted name"));
                };
                let elements: Vec<Entity> = match &**seq {
                    Entity::Name(n) if *n == nil => Vec::new(),
                    Entity::Call(call) => std::iter::once(call.func.clone())
                        .chain(call.args.iter().cloned())
                        .collect(),
                    _ => {
                        return Err(invalid_argument(
                            "foreach expects &nil or a quoted sequence",
                        ))
                    }
                };
                let mut results = Vec::with_capacity(elements.len());
                for element in elements {
                    // Elements evaluate in the enclosing scope; only the
                    // body sees the binding.
                    let value = ctx.eval(&element)?;
                    let mut frame = FxHashMap::default();
                    frame.insert(*name, value);
                    results.push(FrameGuard::new(&mut *ctx, frame).eval(body)?);
                }
                Ok(Entity::call(Entity::name(group), results))
            }),
        )],
    );

    builder.define(
        "unquote",
        "Strip one level of quoting; the result is evaluated.",
        vec![Overload::new(
            FunctionType::fixed(
                vec![EntityType::quoted(EntityType::Any)],
                EntityType::Any,
            ),
            native(|_, args| {
                let [Entity::Quoted(inner)] = args else {
                    return Err(invalid_argument("unquote expects a quoted entity"));
                };
                Ok((**inner).clone())
            }),
        )],
    );

    builder.define(
        "extract-name",
        "The text of a quoted name: (extract-name &x) is \"x\".",
        vec![Overload::new(
            FunctionType::fixed(vec![quoted_name()], EntityType::Str),
            native(|ctx, args| {
                let name = single_quoted_name(args, "extract-name")?;
                Ok(Entity::text(ctx.interner().lookup(name)))
            }),
        )],
    );

    let nil = builder.name("nil");
    builder.define(
        "documented-names",
        "A quoted sequence of every documented name in the registry.",
        vec![Overload::new(
            FunctionType::fixed(vec![], EntityType::quoted(EntityType::Any)),
            native(move |ctx, _| {
                let mut names = ctx
                    .documented_names()
                    .into_iter()
                    .map(|name| Entity::quoted(Entity::name(name)));
                let Some(first) = names.next() else {
                    return Ok(Entity::quoted(Entity::name(nil)));
                };
                Ok(Entity::quoted(Entity::call(first, names.collect())))
            }),
        )],
    );

    builder.define(
        "type",
        "The type of its argument, as text.",
        vec![Overload::new(
            FunctionType::fixed(vec![EntityType::Any], EntityType::Inline),
            native(|ctx, args| {
                let [value] = args else {
                    return Err(invalid_argument("type expects one argument"));
                };
                Ok(Entity::text(value.ty().signature(ctx.interner())))
            }),
        )],
    );
}

fn quoted_name() -> EntityType {
    EntityType::quoted(EntityType::Name(NamePattern::Any))
}

/// Destructure a `[&name]` argument list.
fn single_quoted_name(args: &[Entity], form: &str) -> Result<Name, stanza_ir::EvalError> {
    let [Entity::Quoted(inner)] = args else {
        return Err(invalid_argument(format!("{form} expects a quoted name")));
    };
    let Entity::Name(name) = &**inner else {
        return Err(invalid_argument(format!("{form} expects a quoted name")));
    };
    Ok(*name)
}

/// Destructure one `&(name expr)` binding.
fn binding_pair(arg: &Entity) -> Result<(Name, Entity), stanza_ir::EvalError> {
    let Entity::Quoted(inner) = arg else {
        return Err(invalid_argument("let bindings must be quoted"));
    };
    let Entity::Call(call) = &**inner else {
        return Err(invalid_argument("let bindings look like &(name value)"));
    };
    let Entity::Name(name) = &call.func else {
        return Err(invalid_argument("let bindings start with a name"));
    };
    let [expr] = call.args.as_slice() else {
        return Err(invalid_argument("let bindings take exactly one value"));
    };
    Ok((*name, expr.clone()))
}

/// Pops its frame when dropped, keeping the scope stack balanced across
/// body evaluation failures.
struct FrameGuard<'a> {
    ctx: &'a mut dyn CallContext,
}

impl<'a> FrameGuard<'a> {
    fn new(ctx: &'a mut dyn CallContext, frame: FxHashMap<Name, Entity>) -> Self {
        ctx.push_frame(frame);
        FrameGuard { ctx }
    }

    fn eval(mut self, entity: &Entity) -> EvalResult {
        self.ctx.eval(entity)
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.ctx.pop_frame();
    }
}
