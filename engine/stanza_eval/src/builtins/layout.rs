//! Block layout builtins.

use stanza_ir::{invalid_argument, Entity, EntityType, FunctionType, FunctionValue, Overload};
use stanza_render::escape_html;

use super::{native, renderable, RegistryBuilder};

pub(super) fn install(builder: &mut RegistryBuilder<'_>) {
    builder.define(
        "h",
        "A heading: ((h 1) \"Title\") renders <h1>.",
        vec![Overload::new(
            FunctionType::fixed(
                vec![EntityType::Int],
                EntityType::function(FunctionType::variadic(
                    vec![],
                    EntityType::Inline,
                    EntityType::Block,
                )),
            ),
            native(|_, args| {
                let [Entity::Int(level)] = args else {
                    return Err(invalid_argument("h expects a heading level"));
                };
                if !(1..=6).contains(level) {
                    return Err(invalid_argument(format!(
                        "heading level must be between 1 and 6, got {level}"
                    )));
                }
                let tag: std::rc::Rc<str> = format!("h{level}").into();
                Ok(Entity::function(FunctionValue::new(vec![Overload::new(
                    FunctionType::variadic(vec![], EntityType::Inline, EntityType::Block),
                    native(move |_, args| Ok(Entity::block_tag(tag.clone(), "", args.to_vec()))),
                )])))
            }),
        )],
    );

    builder.define(
        "p",
        "A paragraph.",
        vec![Overload::new(
            FunctionType::variadic(vec![], renderable(), EntityType::Block),
            native(|_, args| Ok(Entity::block_tag("p", "", args.to_vec()))),
        )],
    );

    builder.define(
        "a",
        "A hyperlink: (a \"https://...\" content).",
        vec![Overload::new(
            FunctionType::fixed(
                vec![EntityType::Str, EntityType::Inline],
                EntityType::Inline,
            ),
            native(|_, args| {
                let [Entity::Str(href), content] = args else {
                    return Err(invalid_argument("a expects a URL and inline content"));
                };
                Ok(Entity::inline_tag(
                    "a",
                    format!("href=\"{}\"", escape_html(href)),
                    vec![content.clone()],
                ))
            }),
        )],
    );

    list(builder, "list-unordered", "ul", "A bullet list, one argument per item.");
    list(builder, "list-ordered", "ol", "A numbered list, one argument per item.");

    builder.define(
        "horizontal-rule",
        "A thematic break.",
        vec![Overload::new(
            FunctionType::fixed(vec![], EntityType::Block),
            native(|_, _| Ok(Entity::raw_block("<hr/>"))),
        )],
    );

    builder.define(
        "pre",
        "Preformatted text, one string per line.",
        vec![Overload::new(
            FunctionType::variadic(vec![], EntityType::Str, EntityType::Block),
            native(|_, args| {
                // Every line ends with a newline, the last one included.
                let mut children = Vec::with_capacity(args.len() * 2);
                for line in args {
                    children.push(line.clone());
                    children.push(Entity::raw_inline("\n"));
                }
                Ok(Entity::block_tag("pre", "", children))
            }),
        )],
    );
}

fn list(builder: &mut RegistryBuilder<'_>, name: &str, tag: &'static str, doc: &str) {
    builder.define(
        name,
        doc,
        vec![Overload::new(
            FunctionType::variadic(vec![], EntityType::Inline, EntityType::Block),
            native(move |_, args| {
                let items = args
                    .iter()
                    .map(|item| Entity::block_tag("li", "", vec![item.clone()]))
                    .collect();
                Ok(Entity::block_tag(tag, "", items))
            }),
        )],
    );
}
