//! The builtin registry.
//!
//! Builtins are grouped by concern: inline text styling, block layout,
//! sequence combinators, and the binding forms. Each module installs its
//! names into a [`RegistryBuilder`]; the assembled map becomes the base
//! [`Registry`](crate::Registry).
//!
//! Overload order is significant. Resolution takes the first signature that
//! admits the arguments, so every definition here registers its more
//! specific signatures before the more general ones.

mod bindings;
mod layout;
mod sequences;
mod text;

use std::rc::Rc;

use rustc_hash::FxHashMap;

use stanza_ir::{
    CallContext, Entity, EntityType, EvalResult, FunctionValue, Name, NativeFn, Overload,
    StringInterner,
};

/// Assemble the builtin bindings.
pub(crate) fn install(interner: &StringInterner) -> FxHashMap<Name, Entity> {
    let mut builder = RegistryBuilder {
        interner,
        bindings: FxHashMap::default(),
    };
    text::install(&mut builder);
    layout::install(&mut builder);
    sequences::install(&mut builder);
    bindings::install(&mut builder);
    builder.bindings
}

/// Accumulates builtin definitions against one interner.
pub(crate) struct RegistryBuilder<'a> {
    interner: &'a StringInterner,
    bindings: FxHashMap<Name, Entity>,
}

impl RegistryBuilder<'_> {
    /// Intern an identifier, for implementations that need to reference
    /// other builtins by name.
    pub(crate) fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Register a documented callable.
    pub(crate) fn define(&mut self, name: &str, doc: &str, overloads: Vec<Overload>) {
        let name = self.interner.intern(name);
        self.bindings
            .insert(name, Entity::function(FunctionValue::with_doc(overloads, doc)));
    }
}

/// Wrap a closure as a native implementation.
pub(crate) fn native(
    f: impl Fn(&mut dyn CallContext, &[Entity]) -> EvalResult + 'static,
) -> NativeFn {
    Rc::new(f)
}

/// `inline|block`: anything that can be rendered.
pub(crate) fn renderable() -> EntityType {
    EntityType::union(vec![EntityType::Inline, EntityType::Block])
}
