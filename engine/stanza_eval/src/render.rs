//! Lowering evaluated entities into the render tree.
//!
//! An entity renders inline if it can, as a block otherwise. Inline
//! containers require inline children; block containers accept either.
//! Anything that offers neither rendering is reported, not skipped.

use stanza_ir::{not_renderable, Entity, EvalError, StringInterner};
use stanza_render::RenderNode;

/// Lower a fully-evaluated entity, preferring inline rendering.
pub fn render(entity: &Entity, interner: &StringInterner) -> Result<RenderNode, EvalError> {
    if entity.renders_inline() {
        render_inline(entity, interner)
    } else if entity.renders_block() {
        render_block(entity, interner)
    } else {
        Err(not_renderable(entity.ty().signature(interner)))
    }
}

fn render_inline(entity: &Entity, interner: &StringInterner) -> Result<RenderNode, EvalError> {
    match entity {
        Entity::Int(value) => Ok(RenderNode::raw(value.to_string())),
        Entity::Str(text) => Ok(RenderNode::escaped(text.clone())),
        Entity::RawInline(markup) => Ok(RenderNode::raw(markup.clone())),
        Entity::InlineTag(body) => {
            let children = body
                .children
                .iter()
                .map(|child| render_inline(child, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderNode::tag(body.tag.clone(), body.attrs.clone(), children))
        }
        Entity::ClosedInlineTag(tag) => Ok(RenderNode::closed_tag(
            tag.tag.clone(),
            tag.attrs.clone(),
            tag.self_closing,
        )),
        Entity::InlineConcat(items) => {
            let children = items
                .iter()
                .map(|item| render_inline(item, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderNode::sequence(children))
        }
        Entity::Transformed(node) => {
            let inner = render_inline(&node.inner, interner)?;
            Ok(inner.transform(&node.transform))
        }
        other => Err(not_renderable(other.ty().signature(interner))),
    }
}

fn render_block(entity: &Entity, interner: &StringInterner) -> Result<RenderNode, EvalError> {
    match entity {
        Entity::RawBlock(markup) => Ok(RenderNode::raw(markup.clone())),
        Entity::BlockTag(body) => {
            let children = body
                .children
                .iter()
                .map(|child| render(child, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderNode::tag(body.tag.clone(), body.attrs.clone(), children))
        }
        Entity::ClosedBlockTag(tag) => Ok(RenderNode::closed_tag(
            tag.tag.clone(),
            tag.attrs.clone(),
            tag.self_closing,
        )),
        Entity::MixedConcat(items) => {
            let children = items
                .iter()
                .map(|item| render(item, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderNode::sequence(children))
        }
        Entity::Transformed(node) => {
            let inner = render_block(&node.inner, interner)?;
            Ok(inner.transform(&node.transform))
        }
        other => Err(not_renderable(other.ty().signature(interner))),
    }
}
