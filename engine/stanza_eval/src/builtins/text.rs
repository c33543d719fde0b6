//! Inline text builtins.

use std::rc::Rc;

use stanza_ir::{invalid_argument, Entity, EntityType, FunctionType, FunctionValue, Overload};
use stanza_render::{escape_html, TextTransform};

use super::{native, RegistryBuilder};

pub(super) fn install(builder: &mut RegistryBuilder<'_>) {
    inline_wrapper(builder, "bf", "b", "Bold text.");
    inline_wrapper(builder, "it", "i", "Italic text.");
    inline_wrapper(builder, "tt", "tt", "Monospace text.");

    // (mono ...) expands to (nobr (tt ...)). The expansion carries no
    // source position; errors inside it surface at the original call site.
    let nobr = builder.name("nobr");
    let tt = builder.name("tt");
    builder.define(
        "mono",
        "Monospace text, kept on one line.",
        vec![Overload::new(
            inline_to_inline(),
            native(move |_, args| {
                Ok(Entity::call(
                    Entity::name(nobr),
                    vec![Entity::call(Entity::name(tt), args.to_vec())],
                ))
            }),
        )],
    );

    builder.define(
        "e",
        "A named HTML entity: (e \"mdash\") renders an em dash.",
        vec![Overload::new(
            FunctionType::fixed(vec![EntityType::Str], EntityType::Inline),
            native(|_, args| {
                let [Entity::Str(name)] = args else {
                    return Err(invalid_argument("e expects an entity name"));
                };
                Ok(Entity::raw_inline(format!("&{name};")))
            }),
        )],
    );

    builder.define(
        "style",
        "Inline CSS: (style \"color: red\") is a function wrapping its arguments in a styled span.",
        vec![Overload::new(
            FunctionType::fixed(
                vec![EntityType::Str],
                EntityType::function(inline_to_inline()),
            ),
            native(|_, args| {
                let [Entity::Str(css)] = args else {
                    return Err(invalid_argument("style expects a CSS string"));
                };
                let attrs: Rc<str> = format!("style=\"{}\"", escape_html(css)).into();
                Ok(Entity::function(FunctionValue::new(vec![Overload::new(
                    inline_to_inline(),
                    native(move |_, args| {
                        Ok(Entity::inline_tag("span", attrs.clone(), args.to_vec()))
                    }),
                )])))
            }),
        )],
    );

    builder.define(
        "nobr",
        "Replace spaces in the rendered text with non-breaking spaces.",
        vec![
            Overload::new(
                FunctionType::fixed(vec![EntityType::Inline], EntityType::Inline),
                non_breaking(),
            ),
            Overload::new(
                FunctionType::fixed(vec![EntityType::Block], EntityType::Block),
                non_breaking(),
            ),
        ],
    );

    nullary_raw(builder, "--", "An em dash.", "&mdash;");
    nullary_raw(builder, "nl", "A literal newline in the output.", "\n");
}

fn nullary_raw(builder: &mut RegistryBuilder<'_>, name: &str, doc: &str, fragment: &'static str) {
    builder.define(
        name,
        doc,
        vec![Overload::new(
            FunctionType::fixed(vec![], EntityType::Inline),
            native(move |_, _| Ok(Entity::raw_inline(fragment))),
        )],
    );
}

fn inline_to_inline() -> FunctionType {
    FunctionType::variadic(vec![], EntityType::Inline, EntityType::Inline)
}

fn inline_wrapper(builder: &mut RegistryBuilder<'_>, name: &str, tag: &'static str, doc: &str) {
    builder.define(
        name,
        doc,
        vec![Overload::new(
            inline_to_inline(),
            native(move |_, args| Ok(Entity::inline_tag(tag, "", args.to_vec()))),
        )],
    );
}

fn non_breaking() -> stanza_ir::NativeFn {
    native(|_, args| {
        let [content] = args else {
            return Err(invalid_argument("nobr expects one argument"));
        };
        Ok(Entity::transformed(
            content.clone(),
            TextTransform::new(|s| s.replace(' ', "&nbsp;")),
        ))
    })
}
