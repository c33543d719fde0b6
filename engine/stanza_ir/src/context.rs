//! The seam between native implementations and the evaluator.

use rustc_hash::FxHashMap;

use crate::{Entity, EvalResult, Name, StringInterner};

/// Evaluation services available to native implementations.
///
/// Natives that take quoted parameters use [`eval`](CallContext::eval) to
/// evaluate them on demand, and the frame operations to establish local
/// bindings around that evaluation. Frames pushed by a native must be popped
/// by the same native; the scope stack is balanced per call.
pub trait CallContext {
    /// The interner names in the entity tree were produced by.
    fn interner(&self) -> &StringInterner;

    /// Evaluate an entity under the current scope stack.
    fn eval(&mut self, entity: &Entity) -> EvalResult;

    /// Look up a name in the global registry only.
    fn lookup_global(&self, name: Name) -> Option<Entity>;

    /// Look up a name in the scope stack (innermost first), falling back to
    /// the global registry.
    fn lookup_binding(&self, name: Name) -> Option<Entity>;

    /// Push a frame of local bindings.
    fn push_frame(&mut self, frame: FxHashMap<Name, Entity>);

    /// Pop the innermost frame.
    fn pop_frame(&mut self);

    /// Names of every documented callable in the global registry, sorted by
    /// identifier text.
    fn documented_names(&self) -> Vec<Name>;
}
