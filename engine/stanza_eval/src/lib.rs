//! Evaluator, builtin registry, and HTML pipeline for the Stanza markup
//! engine.
//!
//! The entry point is [`render_document`]: assemble the builtin registry
//! (plus caller extensions), evaluate the entity tree to a fixed point,
//! lower the result into a render tree, and serialize it to HTML.

mod builtins;
mod evaluator;
mod registry;
mod render;
mod scope;

#[cfg(test)]
mod tests;

use stanza_ir::{Entity, EvalError, Name, SharedInterner};

pub use evaluator::Evaluator;
pub use registry::Registry;
pub use render::render;

/// Error reported by the document pipeline.
///
/// Internal errors carry structured kinds and propagation state; this type
/// flattens them to the finished message, position included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl From<EvalError> for EngineError {
    fn from(err: EvalError) -> Self {
        EngineError {
            message: err.to_string(),
        }
    }
}

/// Evaluate an entity tree and render it to HTML.
///
/// `extensions` are additional global bindings, shadowing builtins of the
/// same name. The interner must be the one the tree's names were interned
/// with.
pub fn render_document(
    entity: &Entity,
    extensions: impl IntoIterator<Item = (Name, Entity)>,
    interner: &SharedInterner,
) -> Result<String, EngineError> {
    tracing::debug!("rendering document");
    let registry = Registry::builtins(interner).with_extensions(extensions);
    let mut evaluator = Evaluator::new(&registry, interner);
    let evaluated = evaluator.eval(entity)?;
    let tree = render(&evaluated, interner)?;
    Ok(tree.as_text())
}
