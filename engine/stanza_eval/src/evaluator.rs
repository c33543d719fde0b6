//! The evaluator.
//!
//! Evaluation rewrites an entity tree to a fixed point: names resolve
//! through the scope stack and registry, calls dispatch through overload
//! resolution and their results are evaluated again, markup containers are
//! rebuilt around their evaluated children, and everything else evaluates
//! to itself. Quoted entities stop evaluation; the binding forms decide
//! when (and under which scope) their quoted arguments run.

use rustc_hash::FxHashMap;

use stanza_ir::{
    not_callable, unbound_name, CallContext, CallNode, Entity, EvalError, EvalResult, Name,
    Position, StringInterner,
};

use crate::registry::Registry;
use crate::scope::ScopeStack;

/// Evaluates entity trees against one registry and interner.
///
/// The evaluator owns the scope stack; the registry and interner are
/// borrowed and never mutated.
pub struct Evaluator<'a> {
    registry: &'a Registry,
    interner: &'a StringInterner,
    scopes: ScopeStack,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a Registry, interner: &'a StringInterner) -> Self {
        Evaluator {
            registry,
            interner,
            scopes: ScopeStack::new(),
        }
    }

    /// Evaluate an entity to a fully-reduced entity.
    pub fn eval(&mut self, entity: &Entity) -> EvalResult {
        match entity {
            Entity::Name(name) => {
                let Some(bound) = self.lookup_binding(*name) else {
                    return Err(unbound_name(self.interner.lookup(*name)));
                };
                self.eval(&bound)
            }
            Entity::Call(call) => self.eval_call(call),
            Entity::InlineTag(body) => Ok(Entity::inline_tag(
                body.tag.clone(),
                body.attrs.clone(),
                self.eval_all(&body.children)?,
            )),
            Entity::BlockTag(body) => Ok(Entity::block_tag(
                body.tag.clone(),
                body.attrs.clone(),
                self.eval_all(&body.children)?,
            )),
            Entity::InlineConcat(items) => Ok(Entity::inline_concat(self.eval_all(items)?)),
            Entity::MixedConcat(items) => Ok(Entity::mixed_concat(self.eval_all(items)?)),
            Entity::Transformed(node) => Ok(Entity::transformed(
                self.eval(&node.inner)?,
                node.transform.clone(),
            )),
            // Literals, quoted forms, callables, and raw markup evaluate
            // to themselves.
            other => Ok(other.clone()),
        }
    }

    fn eval_all(&mut self, items: &[Entity]) -> Result<Vec<Entity>, EvalError> {
        items.iter().map(|item| self.eval(item)).collect()
    }

    /// Evaluate a call: function expression, then arguments left to right,
    /// then overload resolution, then the native implementation, then the
    /// implementation's result.
    #[tracing::instrument(level = "debug", skip_all)]
    fn eval_call(&mut self, call: &CallNode) -> EvalResult {
        let result = self.eval_call_inner(call);
        finalize(result, call.position)
    }

    fn eval_call_inner(&mut self, call: &CallNode) -> EvalResult {
        let func = self.eval(&call.func)?;
        let Entity::Function(callable) = &func else {
            return Err(not_callable(func.ty().signature(self.interner)));
        };
        let args = self.eval_all(&call.args)?;
        let implementation = callable.resolve(&args, self.interner)?.clone();
        let result = implementation(&mut *self, &args)?;
        self.eval(&result)
    }
}

/// Attribute a propagating error to this call's position, if it has one.
/// Already-finalized errors pass through untouched, so the innermost call
/// that knows where it is wins.
fn finalize(result: EvalResult, position: Option<Position>) -> EvalResult {
    match (result, position) {
        (Err(err), Some(position)) if !err.is_finalized() => Err(err.finalize_at(position)),
        (other, _) => other,
    }
}

impl CallContext for Evaluator<'_> {
    fn interner(&self) -> &StringInterner {
        self.interner
    }

    fn eval(&mut self, entity: &Entity) -> EvalResult {
        Evaluator::eval(self, entity)
    }

    fn lookup_global(&self, name: Name) -> Option<Entity> {
        self.registry.get(name)
    }

    fn lookup_binding(&self, name: Name) -> Option<Entity> {
        if let Some(local) = self.scopes.lookup(name) {
            return Some(local.clone());
        }
        self.registry.get(name)
    }

    fn push_frame(&mut self, frame: FxHashMap<Name, Entity>) {
        self.scopes.push(frame);
    }

    fn pop_frame(&mut self) {
        self.scopes.pop();
    }

    fn documented_names(&self) -> Vec<Name> {
        self.registry.documented_names(self.interner)
    }
}
