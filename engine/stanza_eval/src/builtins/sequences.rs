//! Sequence combinators.

use stanza_ir::{
    invalid_argument, Entity, EntityType, FunctionType, FunctionValue, NativeFn, Overload,
};

use super::{native, renderable, RegistryBuilder};

pub(super) fn install(builder: &mut RegistryBuilder<'_>) {
    // All-inline groups stay inline; anything containing a block becomes
    // a block. The inline overload must come first.
    builder.define(
        "$",
        "Group adjacent entities into one.",
        vec![
            Overload::new(
                inline_variadic(),
                native(|_, args| Ok(Entity::inline_concat(args.to_vec()))),
            ),
            Overload::new(
                FunctionType::variadic(vec![], renderable(), EntityType::Block),
                native(|_, args| Ok(Entity::mixed_concat(args.to_vec()))),
            ),
        ],
    );

    builder.define(
        "sep",
        "(sep s) is a function interleaving s between its arguments.",
        vec![Overload::new(
            FunctionType::fixed(
                vec![EntityType::Inline],
                EntityType::function(inline_variadic()),
            ),
            native(|_, args| {
                let [separator] = args else {
                    return Err(invalid_argument("sep expects a separator"));
                };
                let separator = separator.clone();
                Ok(Entity::function(FunctionValue::new(vec![Overload::new(
                    inline_variadic(),
                    native(move |_, args| {
                        let mut out = Vec::with_capacity(args.len() * 2);
                        for (i, item) in args.iter().enumerate() {
                            if i > 0 {
                                out.push(separator.clone());
                            }
                            out.push(item.clone());
                        }
                        Ok(Entity::inline_concat(out))
                    }),
                )])))
            }),
        )],
    );

    // (map f) is a function applying f to each of its arguments. The
    // overloads pair f's signature with the item type the returned
    // function accepts; inline-producing functions yield an inline group,
    // block-producing ones a block group.
    builder.define(
        "map",
        "(map f) is a function applying f to each of its arguments.",
        vec![
            Overload::new(
                map_signature(
                    fn_fixed(EntityType::Inline, EntityType::Inline),
                    EntityType::Inline,
                    EntityType::Inline,
                ),
                mapper(EntityType::Inline, EntityType::Inline, Entity::inline_concat),
            ),
            Overload::new(
                map_signature(
                    fn_variadic(EntityType::Inline, EntityType::Inline),
                    EntityType::Inline,
                    EntityType::Inline,
                ),
                mapper(EntityType::Inline, EntityType::Inline, Entity::inline_concat),
            ),
            Overload::new(
                map_signature(
                    fn_fixed(EntityType::Str, EntityType::Inline),
                    EntityType::Str,
                    EntityType::Inline,
                ),
                mapper(EntityType::Str, EntityType::Inline, Entity::inline_concat),
            ),
            Overload::new(
                map_signature(
                    fn_variadic(EntityType::Str, EntityType::Inline),
                    EntityType::Str,
                    EntityType::Inline,
                ),
                mapper(EntityType::Str, EntityType::Inline, Entity::inline_concat),
            ),
            Overload::new(
                map_signature(
                    fn_fixed(renderable(), EntityType::Block),
                    renderable(),
                    EntityType::Block,
                ),
                mapper(renderable(), EntityType::Block, Entity::mixed_concat),
            ),
            Overload::new(
                map_signature(
                    fn_variadic(renderable(), EntityType::Block),
                    renderable(),
                    EntityType::Block,
                ),
                mapper(renderable(), EntityType::Block, Entity::mixed_concat),
            ),
        ],
    );

    // (sepmap s f) composes sep with map: applied to items, it expands to
    // ((sep s) (f a) (f b) ...) for the evaluator to reduce. The returned
    // function keeps both the inline and the string item signatures.
    let sep = builder.name("sep");
    let sepmap_impl = native(move |_, args| {
        let [separator, func] = args else {
            return Err(invalid_argument("sepmap expects a separator and a function"));
        };
        let separator = separator.clone();
        let func = func.clone();
        let apply = native(move |_, args| {
            let mapped = args
                .iter()
                .map(|item| Entity::call(func.clone(), vec![item.clone()]))
                .collect();
            Ok(Entity::call(
                Entity::call(Entity::name(sep), vec![separator.clone()]),
                mapped,
            ))
        });
        Ok(Entity::function(FunctionValue::new(vec![
            Overload::new(
                FunctionType::variadic(vec![], EntityType::Inline, EntityType::Inline),
                apply.clone(),
            ),
            Overload::new(
                FunctionType::variadic(vec![], EntityType::Str, EntityType::Inline),
                apply,
            ),
        ])))
    });
    builder.define(
        "sepmap",
        "(sepmap s f) is (map f) with s interleaved between the results.",
        vec![
            Overload::new(
                sepmap_signature(
                    EntityType::Inline,
                    fn_fixed(EntityType::Inline, EntityType::Inline),
                ),
                sepmap_impl.clone(),
            ),
            Overload::new(
                sepmap_signature(
                    EntityType::Inline,
                    fn_variadic(EntityType::Inline, EntityType::Inline),
                ),
                sepmap_impl.clone(),
            ),
            Overload::new(
                sepmap_signature(
                    EntityType::Str,
                    fn_fixed(EntityType::Str, EntityType::Inline),
                ),
                sepmap_impl.clone(),
            ),
            Overload::new(
                sepmap_signature(
                    EntityType::Str,
                    fn_variadic(EntityType::Str, EntityType::Inline),
                ),
                sepmap_impl,
            ),
        ],
    );
}

fn inline_variadic() -> FunctionType {
    FunctionType::variadic(vec![], EntityType::Inline, EntityType::Inline)
}

fn fn_fixed(param: EntityType, ret: EntityType) -> EntityType {
    EntityType::function(FunctionType::fixed(vec![param], ret))
}

fn fn_variadic(param: EntityType, ret: EntityType) -> EntityType {
    EntityType::function(FunctionType::variadic(vec![], param, ret))
}

fn map_signature(func: EntityType, item: EntityType, ret: EntityType) -> FunctionType {
    FunctionType::fixed(vec![func], fn_variadic(item, ret))
}

fn sepmap_signature(item: EntityType, func: EntityType) -> FunctionType {
    FunctionType::fixed(
        vec![item.clone(), func],
        fn_variadic(item, EntityType::Inline),
    )
}

/// Build the function `(map f)` evaluates to.
fn mapper(item: EntityType, ret: EntityType, wrap: fn(Vec<Entity>) -> Entity) -> NativeFn {
    native(move |_, args| {
        let [func] = args else {
            return Err(invalid_argument("map expects a function"));
        };
        let func = func.clone();
        let item = item.clone();
        let ret = ret.clone();
        Ok(Entity::function(FunctionValue::new(vec![Overload::new(
            FunctionType::variadic(vec![], item, ret),
            native(move |_, args| {
                Ok(wrap(
                    args.iter()
                        .map(|arg| Entity::call(func.clone(), vec![arg.clone()]))
                        .collect(),
                ))
            }),
        )])))
    })
}
