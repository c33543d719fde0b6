//! Entity model and type system for the Stanza markup engine.
//!
//! This crate defines the data the engine operates on:
//!
//! - [`Entity`], the unified value type covering unevaluated syntax,
//!   literals, markup fragments, and callables
//! - [`EntityType`], the structural type system overload resolution
//!   dispatches on
//! - [`Name`] / [`StringInterner`], interned identifiers
//! - [`EvalError`], the error type evaluation propagates and finalizes
//!
//! Evaluation itself lives in `stanza_eval`; rendering in `stanza_render`.

mod context;
mod entity;
mod error;
mod interner;
mod name;
mod position;
mod ty;

pub use context::CallContext;
pub use entity::{
    CallNode, Entity, FunctionValue, NativeFn, Overload, TagBody, TransformNode, VoidTag,
};
pub use error::{
    invalid_argument, no_overload, not_callable, not_renderable, unbound_name, EvalError,
    EvalErrorKind, EvalResult,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use position::Position;
pub use ty::{CallPattern, EntityType, FunctionType, NamePattern};
