//! The unified entity model.
//!
//! Everything the evaluator touches is an [`Entity`]: unevaluated syntax
//! (names, calls, quoted forms), literals, rendered markup fragments, and
//! callable values. Entities are immutable; evaluation builds new trees and
//! shares unchanged subtrees through `Rc`.

use std::fmt;
use std::rc::Rc;

use stanza_render::TextTransform;

use crate::error::{no_overload, EvalError, EvalResult};
use crate::ty::{CallPattern, EntityType, FunctionType, NamePattern};
use crate::{CallContext, Name, Position, StringInterner};

/// A call node: a function expression applied to arguments.
///
/// The position is attached by the parser and consumed once, when an error
/// escaping this call is finalized. Equality ignores it.
#[derive(Clone, Debug)]
pub struct CallNode {
    pub func: Entity,
    pub args: Vec<Entity>,
    pub position: Option<Position>,
}

/// Body of an HTML element with children.
#[derive(Clone, Debug, PartialEq)]
pub struct TagBody {
    pub tag: Rc<str>,
    /// Pre-rendered attribute text, without the leading space. Empty when
    /// the element has no attributes.
    pub attrs: Rc<str>,
    pub children: Vec<Entity>,
}

/// A childless HTML element, e.g. `<hr />` or `<br>`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoidTag {
    pub tag: Rc<str>,
    pub attrs: Rc<str>,
    pub self_closing: bool,
}

/// An entity carrying a deferred post-render text transform.
///
/// The transform applies to rendered *text* content only; markup produced
/// inside the subtree passes through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformNode {
    pub inner: Entity,
    pub transform: TextTransform,
}

/// The single value type of the engine.
#[derive(Clone, Debug)]
pub enum Entity {
    /// An identifier, unevaluated until looked up.
    Name(Name),
    /// Integer literal.
    Int(i64),
    /// String literal. Escaped when rendered.
    Str(Rc<str>),
    /// An unevaluated call.
    Call(Rc<CallNode>),
    /// A quoted entity: evaluation stops at the quote.
    Quoted(Rc<Entity>),
    /// An inline HTML element with children.
    InlineTag(Rc<TagBody>),
    /// A block HTML element with children.
    BlockTag(Rc<TagBody>),
    /// A childless inline element.
    ClosedInlineTag(Rc<VoidTag>),
    /// A childless block element.
    ClosedBlockTag(Rc<VoidTag>),
    /// Inline markup emitted verbatim, bypassing escaping.
    RawInline(Rc<str>),
    /// Block markup emitted verbatim, bypassing escaping.
    RawBlock(Rc<str>),
    /// A sequence of inline entities, itself inline.
    InlineConcat(Rc<[Entity]>),
    /// A sequence mixing inline and block entities, itself block.
    MixedConcat(Rc<[Entity]>),
    /// A callable value with one or more overloads.
    Function(FunctionValue),
    /// An entity wrapped with a deferred text transform.
    Transformed(Rc<TransformNode>),
}

impl Entity {
    pub fn name(name: Name) -> Self {
        Entity::Name(name)
    }

    pub fn int(value: i64) -> Self {
        Entity::Int(value)
    }

    pub fn text(value: impl Into<Rc<str>>) -> Self {
        Entity::Str(value.into())
    }

    /// A call with no source position.
    pub fn call(func: Entity, args: Vec<Entity>) -> Self {
        Entity::Call(Rc::new(CallNode {
            func,
            args,
            position: None,
        }))
    }

    /// A call attributed to a source position.
    pub fn call_at(func: Entity, args: Vec<Entity>, position: Position) -> Self {
        Entity::Call(Rc::new(CallNode {
            func,
            args,
            position: Some(position),
        }))
    }

    pub fn quoted(inner: Entity) -> Self {
        Entity::Quoted(Rc::new(inner))
    }

    pub fn inline_tag(
        tag: impl Into<Rc<str>>,
        attrs: impl Into<Rc<str>>,
        children: Vec<Entity>,
    ) -> Self {
        Entity::InlineTag(Rc::new(TagBody {
            tag: tag.into(),
            attrs: attrs.into(),
            children,
        }))
    }

    pub fn block_tag(
        tag: impl Into<Rc<str>>,
        attrs: impl Into<Rc<str>>,
        children: Vec<Entity>,
    ) -> Self {
        Entity::BlockTag(Rc::new(TagBody {
            tag: tag.into(),
            attrs: attrs.into(),
            children,
        }))
    }

    pub fn closed_inline(
        tag: impl Into<Rc<str>>,
        attrs: impl Into<Rc<str>>,
        self_closing: bool,
    ) -> Self {
        Entity::ClosedInlineTag(Rc::new(VoidTag {
            tag: tag.into(),
            attrs: attrs.into(),
            self_closing,
        }))
    }

    pub fn closed_block(
        tag: impl Into<Rc<str>>,
        attrs: impl Into<Rc<str>>,
        self_closing: bool,
    ) -> Self {
        Entity::ClosedBlockTag(Rc::new(VoidTag {
            tag: tag.into(),
            attrs: attrs.into(),
            self_closing,
        }))
    }

    pub fn raw_inline(markup: impl Into<Rc<str>>) -> Self {
        Entity::RawInline(markup.into())
    }

    pub fn raw_block(markup: impl Into<Rc<str>>) -> Self {
        Entity::RawBlock(markup.into())
    }

    pub fn inline_concat(items: Vec<Entity>) -> Self {
        Entity::InlineConcat(items.into())
    }

    pub fn mixed_concat(items: Vec<Entity>) -> Self {
        Entity::MixedConcat(items.into())
    }

    pub fn function(value: FunctionValue) -> Self {
        Entity::Function(value)
    }

    pub fn transformed(inner: Entity, transform: TextTransform) -> Self {
        Entity::Transformed(Rc::new(TransformNode { inner, transform }))
    }

    /// Is this entity capable of inline rendering?
    pub fn renders_inline(&self) -> bool {
        match self {
            Entity::Int(_)
            | Entity::Str(_)
            | Entity::InlineTag(_)
            | Entity::ClosedInlineTag(_)
            | Entity::RawInline(_)
            | Entity::InlineConcat(_) => true,
            Entity::Transformed(node) => node.inner.renders_inline(),
            _ => false,
        }
    }

    /// Is this entity capable of block rendering?
    pub fn renders_block(&self) -> bool {
        match self {
            Entity::BlockTag(_)
            | Entity::ClosedBlockTag(_)
            | Entity::RawBlock(_)
            | Entity::MixedConcat(_) => true,
            Entity::Transformed(node) => node.inner.renders_block(),
            _ => false,
        }
    }

    /// Derive the intrinsic type of this entity.
    pub fn ty(&self) -> EntityType {
        match self {
            Entity::Name(_) => EntityType::Name(NamePattern::Any),
            Entity::Int(_) => EntityType::Int,
            Entity::Str(_) => EntityType::Str,
            Entity::Call(call) => EntityType::Call(Box::new(CallPattern {
                function: call.func.ty(),
                args: call.args.iter().map(Entity::ty).collect(),
            })),
            Entity::Quoted(inner) => EntityType::Quoted(Box::new(inner.ty())),
            Entity::InlineTag(_)
            | Entity::ClosedInlineTag(_)
            | Entity::RawInline(_)
            | Entity::InlineConcat(_) => EntityType::Inline,
            Entity::BlockTag(_)
            | Entity::ClosedBlockTag(_)
            | Entity::RawBlock(_)
            | Entity::MixedConcat(_) => EntityType::Block,
            Entity::Function(value) => value.ty(),
            Entity::Transformed(node) => node.inner.ty(),
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Entity::Name(a), Entity::Name(b)) => a == b,
            (Entity::Int(a), Entity::Int(b)) => a == b,
            (Entity::Str(a), Entity::Str(b)) => a == b,
            (Entity::Call(a), Entity::Call(b)) => a.func == b.func && a.args == b.args,
            (Entity::Quoted(a), Entity::Quoted(b)) => a == b,
            (Entity::InlineTag(a), Entity::InlineTag(b))
            | (Entity::BlockTag(a), Entity::BlockTag(b)) => a == b,
            (Entity::ClosedInlineTag(a), Entity::ClosedInlineTag(b))
            | (Entity::ClosedBlockTag(a), Entity::ClosedBlockTag(b)) => a == b,
            (Entity::RawInline(a), Entity::RawInline(b))
            | (Entity::RawBlock(a), Entity::RawBlock(b)) => a == b,
            (Entity::InlineConcat(a), Entity::InlineConcat(b))
            | (Entity::MixedConcat(a), Entity::MixedConcat(b)) => a == b,
            (Entity::Function(a), Entity::Function(b)) => a == b,
            (Entity::Transformed(a), Entity::Transformed(b)) => a == b,
            _ => false,
        }
    }
}

/// Native implementation of one overload.
///
/// Implementations receive the evaluation context (to evaluate quoted
/// arguments, look up bindings, and push scope frames) and the already
/// type-checked argument list.
pub type NativeFn = Rc<dyn Fn(&mut dyn CallContext, &[Entity]) -> EvalResult>;

/// One overload of a callable: a signature and its implementation.
#[derive(Clone)]
pub struct Overload {
    pub signature: FunctionType,
    pub implementation: NativeFn,
}

impl Overload {
    pub fn new(signature: FunctionType, implementation: NativeFn) -> Self {
        Overload {
            signature,
            implementation,
        }
    }
}

impl fmt::Debug for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overload")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A callable entity: an ordered list of overloads, optionally documented.
///
/// Overloads resolve in registration order and the first signature that
/// admits the argument list wins, even if a later one fits better. Callers
/// registering ambiguous overloads must order the more specific first.
#[derive(Clone)]
pub struct FunctionValue {
    overloads: Rc<[Overload]>,
    doc: Option<Rc<str>>,
}

impl FunctionValue {
    pub fn new(overloads: Vec<Overload>) -> Self {
        FunctionValue {
            overloads: overloads.into(),
            doc: None,
        }
    }

    pub fn with_doc(overloads: Vec<Overload>, doc: impl Into<Rc<str>>) -> Self {
        FunctionValue {
            overloads: overloads.into(),
            doc: Some(doc.into()),
        }
    }

    /// Documentation string, if the callable carries one.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Resolve the first overload (in registration order) admitting `args`.
    pub fn resolve(
        &self,
        args: &[Entity],
        interner: &StringInterner,
    ) -> Result<&NativeFn, EvalError> {
        for overload in self.overloads.iter() {
            if overload.signature.admits(args) {
                return Ok(&overload.implementation);
            }
        }
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| arg.ty().signature(interner))
            .collect();
        Err(no_overload(
            self.ty().signature(interner),
            format!("({})", rendered.join(", ")),
        ))
    }

    /// Return type of the overload with exactly this parameter shape, if
    /// one is registered.
    pub fn return_type_for(
        &self,
        params: &[EntityType],
        rest: Option<&EntityType>,
    ) -> Option<&EntityType> {
        self.overloads
            .iter()
            .find(|overload| {
                overload.signature.params == params
                    && overload.signature.rest.as_deref() == rest
            })
            .map(|overload| &*overload.signature.ret)
    }

    /// The type of this callable: its signature, or a union of signatures
    /// when overloaded.
    pub fn ty(&self) -> EntityType {
        if let [single] = self.overloads.as_ref() {
            return EntityType::Function(Box::new(single.signature.clone()));
        }
        EntityType::Union(
            self.overloads
                .iter()
                .map(|overload| EntityType::Function(Box::new(overload.signature.clone())))
                .collect(),
        )
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.overloads, &other.overloads)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("overloads", &self.overloads)
            .field("doc", &self.doc)
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::SharedInterner;
    use pretty_assertions::assert_eq;

    fn constant(value: Entity) -> NativeFn {
        Rc::new(move |_, _| Ok(value.clone()))
    }

    #[test]
    fn call_equality_ignores_position() {
        let interner = SharedInterner::new();
        let f = interner.intern("f");

        let bare = Entity::call(Entity::name(f), vec![Entity::int(1)]);
        let placed = Entity::call_at(Entity::name(f), vec![Entity::int(1)], Position::new(2, 5));
        assert_eq!(bare, placed);
    }

    #[test]
    fn transformed_keeps_the_inner_shape() {
        let inner = Entity::inline_tag("b", "", vec![Entity::text("x")]);
        let wrapped = Entity::transformed(inner.clone(), TextTransform::identity());

        assert!(wrapped.renders_inline());
        assert!(!wrapped.renders_block());
        assert_eq!(wrapped.ty(), inner.ty());
    }

    #[test]
    fn resolve_picks_first_admitting_overload() {
        let interner = SharedInterner::new();
        let callable = FunctionValue::new(vec![
            Overload::new(
                FunctionType::fixed(vec![EntityType::Int], EntityType::Int),
                constant(Entity::int(1)),
            ),
            Overload::new(
                FunctionType::variadic(vec![], EntityType::Any, EntityType::Int),
                constant(Entity::int(2)),
            ),
        ]);

        struct NoContext;
        impl CallContext for NoContext {
            fn interner(&self) -> &StringInterner {
                unreachable!("constant implementations ignore the context")
            }
            fn eval(&mut self, _: &Entity) -> EvalResult {
                unreachable!("constant implementations ignore the context")
            }
            fn lookup_global(&self, _: Name) -> Option<Entity> {
                None
            }
            fn lookup_binding(&self, _: Name) -> Option<Entity> {
                None
            }
            fn push_frame(&mut self, _: rustc_hash::FxHashMap<Name, Entity>) {}
            fn pop_frame(&mut self) {}
            fn documented_names(&self) -> Vec<Name> {
                Vec::new()
            }
        }
        let mut ctx = NoContext;

        let first = callable.resolve(&[Entity::int(5)], &interner).unwrap();
        assert_eq!(first(&mut ctx, &[Entity::int(5)]).unwrap(), Entity::int(1));

        let fallback = callable.resolve(&[Entity::text("s")], &interner).unwrap();
        assert_eq!(
            fallback(&mut ctx, &[Entity::text("s")]).unwrap(),
            Entity::int(2)
        );
    }

    #[test]
    fn resolve_failure_lists_callee_and_arguments() {
        let interner = SharedInterner::new();
        let callable = FunctionValue::new(vec![Overload::new(
            FunctionType::fixed(vec![EntityType::Int, EntityType::Int], EntityType::Int),
            constant(Entity::int(0)),
        )]);

        let Err(err) = callable.resolve(&[Entity::int(5), Entity::text("a")], &interner) else {
            panic!("resolution should fail for (int, str)");
        };
        assert_eq!(
            format!("{err}"),
            "cannot call (λ int int . int) with (int, str)"
        );
    }

    #[test]
    fn function_type_is_a_union_when_overloaded() {
        let int_sig = FunctionType::fixed(vec![EntityType::Int], EntityType::Int);
        let str_sig = FunctionType::fixed(vec![EntityType::Str], EntityType::Str);
        let callable = FunctionValue::new(vec![
            Overload::new(int_sig.clone(), constant(Entity::int(0))),
            Overload::new(str_sig.clone(), constant(Entity::text(""))),
        ]);

        assert_eq!(
            callable.ty(),
            EntityType::union(vec![
                EntityType::function(int_sig),
                EntityType::function(str_sig),
            ])
        );
    }

    #[test]
    fn documented_callable_exposes_its_doc() {
        let callable = FunctionValue::with_doc(
            vec![Overload::new(
                FunctionType::fixed(vec![], EntityType::Inline),
                constant(Entity::text("")),
            )],
            "a constant",
        );
        assert_eq!(callable.doc(), Some("a constant"));
    }
}
