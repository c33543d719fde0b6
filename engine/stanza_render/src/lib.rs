//! Lazy HTML render tree for the Stanza markup engine.
//!
//! Serialization is deferred: evaluation produces a [`RenderNode`] tree,
//! deferred [`TextTransform`]s accumulate on its text leaves, and a final
//! pass writes the HTML string. Text is escaped exactly once, at that final
//! pass, with transforms running on the escaped result.

mod escape;
mod node;
mod transform;

pub use escape::escape_html;
pub use node::RenderNode;
pub use transform::TextTransform;
