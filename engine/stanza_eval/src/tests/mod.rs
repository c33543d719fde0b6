//! End-to-end tests for the evaluation and rendering pipeline.
#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod error_tests;

use stanza_ir::{Entity, Name, SharedInterner};

/// Render an entity tree with no extensions.
fn html(interner: &SharedInterner, entity: &Entity) -> String {
    crate::render_document(entity, std::iter::empty::<(Name, Entity)>(), interner).unwrap()
}

/// Render an entity tree expected to fail, returning the message.
fn html_err(interner: &SharedInterner, entity: &Entity) -> String {
    crate::render_document(entity, std::iter::empty::<(Name, Entity)>(), interner)
        .unwrap_err()
        .message
}

/// A positionless call to a named global.
fn call(interner: &SharedInterner, name: &str, args: Vec<Entity>) -> Entity {
    Entity::call(Entity::name(interner.intern(name)), args)
}

/// A quoted bare name.
fn quoted_name(interner: &SharedInterner, name: &str) -> Entity {
    Entity::quoted(Entity::name(interner.intern(name)))
}
