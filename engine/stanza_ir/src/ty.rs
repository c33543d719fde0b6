//! The entity type system.
//!
//! Types exist for dispatch, not storage: every entity has a derivable
//! [`EntityType`](crate::Entity::ty), and overload resolution asks each
//! declared parameter type whether a concrete value [`matches`] it.
//!
//! The builtin set is closed and only open through unions. `inline` and
//! `block` are structural: they match any value *capable* of the
//! corresponding rendering, independent of its declared type tag.
//!
//! [`matches`]: EntityType::matches

use std::fmt::Write as _;

use crate::{Entity, Name, StringInterner};

/// Restriction on the identifier of a [`Name`](crate::Entity::Name) entity.
///
/// The signature mini-language spells this `name` (any identifier) or
/// `name[alt|alt]` (a closed set of alternatives).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamePattern {
    /// Any identifier.
    Any,
    /// One of a fixed set of identifiers.
    OneOf(Vec<Name>),
}

impl NamePattern {
    /// Check whether `name` satisfies the pattern.
    pub fn admits(&self, name: Name) -> bool {
        match self {
            NamePattern::Any => true,
            NamePattern::OneOf(alternatives) => alternatives.contains(&name),
        }
    }
}

/// Structural pattern over a call node. Only meaningful nested inside
/// `Quoted`, where the call is still unevaluated syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallPattern {
    /// Type the function expression must match.
    pub function: EntityType,
    /// Types the arguments must match pairwise.
    pub args: Vec<EntityType>,
}

/// A function signature: fixed parameter types, an optional rest type that
/// every trailing argument must match, and a return type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionType {
    pub params: Vec<EntityType>,
    pub rest: Option<Box<EntityType>>,
    pub ret: Box<EntityType>,
}

impl FunctionType {
    /// A fixed-arity signature.
    pub fn fixed(params: Vec<EntityType>, ret: EntityType) -> Self {
        FunctionType {
            params,
            rest: None,
            ret: Box::new(ret),
        }
    }

    /// A variadic signature: `params` followed by any number of `rest`.
    pub fn variadic(params: Vec<EntityType>, rest: EntityType, ret: EntityType) -> Self {
        FunctionType {
            params,
            rest: Some(Box::new(rest)),
            ret: Box::new(ret),
        }
    }

    /// Check whether a concrete argument list is admitted by this signature.
    ///
    /// Fixed arity: the counts must agree and each argument must match its
    /// parameter type pairwise. With a rest type: the head must cover every
    /// fixed parameter pairwise, and every trailing argument must match the
    /// rest type.
    pub fn admits(&self, args: &[Entity]) -> bool {
        let pairwise = |values: &[Entity]| {
            values
                .iter()
                .zip(&self.params)
                .all(|(value, param)| param.matches(value))
        };
        match &self.rest {
            None => args.len() == self.params.len() && pairwise(args),
            Some(rest) => {
                if args.len() < self.params.len() {
                    return false;
                }
                let (head, tail) = args.split_at(self.params.len());
                pairwise(head) && tail.iter().all(|arg| rest.matches(arg))
            }
        }
    }

    /// Render the signature in the mini-language: `(λ a b ...r . ret)`.
    pub fn signature(&self, interner: &StringInterner) -> String {
        let mut out = String::from("(λ");
        for param in &self.params {
            let _ = write!(out, " {}", param.signature(interner));
        }
        if let Some(rest) = &self.rest {
            let _ = write!(out, " ...{}", rest.signature(interner));
        }
        let _ = write!(out, " . {})", self.ret.signature(interner));
        out
    }
}

/// The type of an entity.
#[derive(Clone, Debug)]
pub enum EntityType {
    /// Matches anything.
    Any,
    /// Integer literal type.
    Int,
    /// String literal type.
    Str,
    /// Anything capable of inline rendering (structural).
    Inline,
    /// Anything capable of block rendering (structural).
    Block,
    /// A quoted entity whose inner entity matches the parameter.
    Quoted(Box<EntityType>),
    /// An unevaluated name, optionally restricted to a set of identifiers.
    Name(NamePattern),
    /// An unevaluated call matching a structural pattern.
    Call(Box<CallPattern>),
    /// A function signature.
    Function(Box<FunctionType>),
    /// Any of the variants. Compares as a set.
    Union(Vec<EntityType>),
}

impl EntityType {
    /// Convenience constructor for `Quoted(T)`.
    pub fn quoted(parameter: EntityType) -> Self {
        EntityType::Quoted(Box::new(parameter))
    }

    /// Convenience constructor for a union type.
    pub fn union(variants: Vec<EntityType>) -> Self {
        EntityType::Union(variants)
    }

    /// Convenience constructor for a call pattern.
    pub fn call_pattern(function: EntityType, args: Vec<EntityType>) -> Self {
        EntityType::Call(Box::new(CallPattern { function, args }))
    }

    /// Convenience constructor for a function type.
    pub fn function(signature: FunctionType) -> Self {
        EntityType::Function(Box::new(signature))
    }

    /// The default rule shared by every type: a value matches if its
    /// intrinsic type equals this type, or equals `any`.
    fn intrinsically(&self, value: &Entity) -> bool {
        let ty = value.ty();
        ty == *self || ty == EntityType::Any
    }

    /// Can `value` be used where this type is expected?
    pub fn matches(&self, value: &Entity) -> bool {
        match self {
            EntityType::Any => true,
            EntityType::Int | EntityType::Str => self.intrinsically(value),
            EntityType::Inline => self.intrinsically(value) || value.renders_inline(),
            EntityType::Block => self.intrinsically(value) || value.renders_block(),
            EntityType::Quoted(parameter) => {
                if self.intrinsically(value) {
                    return true;
                }
                match value {
                    Entity::Quoted(inner) => parameter.matches(inner),
                    _ => false,
                }
            }
            EntityType::Name(pattern) => match value {
                Entity::Name(name) => pattern.admits(*name),
                _ => false,
            },
            EntityType::Call(pattern) => match value {
                Entity::Call(call) => {
                    pattern.function.matches(&call.func)
                        && pattern.args.len() == call.args.len()
                        && pattern
                            .args
                            .iter()
                            .zip(&call.args)
                            .all(|(ty, arg)| ty.matches(arg))
                }
                _ => false,
            },
            EntityType::Function(signature) => {
                if self.intrinsically(value) {
                    return true;
                }
                // Exact signature lookup, not a subtyping check.
                match value {
                    Entity::Function(callable) => {
                        callable.return_type_for(&signature.params, signature.rest.as_deref())
                            == Some(&*signature.ret)
                    }
                    _ => false,
                }
            }
            EntityType::Union(variants) => {
                self.intrinsically(value) || variants.iter().any(|ty| ty.matches(value))
            }
        }
    }

    /// Render the type in the signature mini-language, for diagnostics.
    pub fn signature(&self, interner: &StringInterner) -> String {
        match self {
            EntityType::Any => "any".to_owned(),
            EntityType::Int => "int".to_owned(),
            EntityType::Str => "str".to_owned(),
            EntityType::Inline => "inline".to_owned(),
            EntityType::Block => "block".to_owned(),
            EntityType::Quoted(parameter) => format!("&[{}]", parameter.signature(interner)),
            EntityType::Name(NamePattern::Any) => "name".to_owned(),
            EntityType::Name(NamePattern::OneOf(alternatives)) => {
                let alts: Vec<&str> = alternatives
                    .iter()
                    .map(|name| interner.lookup(*name))
                    .collect();
                format!("name[{}]", alts.join("|"))
            }
            EntityType::Call(pattern) => {
                let mut out = format!("({}", pattern.function.signature(interner));
                for arg in &pattern.args {
                    let _ = write!(out, " {}", arg.signature(interner));
                }
                out.push(')');
                out
            }
            EntityType::Function(signature) => signature.signature(interner),
            EntityType::Union(variants) => {
                if variants.is_empty() {
                    return "never".to_owned();
                }
                let parts: Vec<String> = variants
                    .iter()
                    .map(|ty| ty.signature(interner))
                    .collect();
                parts.join("|")
            }
        }
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntityType::Any, EntityType::Any)
            | (EntityType::Int, EntityType::Int)
            | (EntityType::Str, EntityType::Str)
            | (EntityType::Inline, EntityType::Inline)
            | (EntityType::Block, EntityType::Block) => true,
            (EntityType::Quoted(a), EntityType::Quoted(b)) => a == b,
            (EntityType::Name(a), EntityType::Name(b)) => a == b,
            (EntityType::Call(a), EntityType::Call(b)) => a == b,
            (EntityType::Function(a), EntityType::Function(b)) => a == b,
            // Unions are equal as sets, independent of variant order.
            (EntityType::Union(a), EntityType::Union(b)) => {
                a.iter().all(|ty| b.contains(ty)) && b.iter().all(|ty| a.contains(ty))
            }
            _ => false,
        }
    }
}

impl Eq for EntityType {}
