//! Evaluation errors.
//!
//! A single internal error type flows through evaluation. Errors start out
//! *propagating*; the outermost call node with a known source position
//! attaches its position and marks the error *finalized*, which stops any
//! further position tagging. The top-level entry point converts whatever
//! arrives into the public error type, dropping the propagation state.

use std::fmt;

use crate::Position;

/// Result of evaluating an entity.
pub type EvalResult = Result<crate::Entity, EvalError>;

/// Typed error category.
///
/// Each variant carries the already-rendered signatures it needs for its
/// message; rendering happens at construction time, where the interner is
/// at hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Evaluating a call whose function expression is not callable.
    NotCallable { signature: String },
    /// No registered overload matches the argument types.
    NoOverload { callee: String, args: String },
    /// Name lookup failed in both the scope stack and the global registry.
    UnboundName { name: String },
    /// A fully-evaluated entity offers neither inline nor block rendering.
    NotRenderable { signature: String },
    /// A native implementation rejected its (type-matched) arguments.
    InvalidArgument { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCallable { signature } => write!(f, "trying to call {signature}"),
            Self::NoOverload { callee, args } => {
                write!(f, "cannot call {callee} with {args}")
            }
            Self::UnboundName { name } => write!(f, "name {name} not found"),
            Self::NotRenderable { signature } => write!(f, "cannot render {signature}"),
            Self::InvalidArgument { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Source position, set once when the error is finalized.
    pub position: Option<Position>,
    /// A finalized error has been attributed to a source position and is
    /// not re-tagged by enclosing calls.
    pub finalized: bool,
}

impl EvalError {
    /// Create a propagating error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            position: None,
            finalized: false,
        }
    }

    /// Attribute this error to a source position and stop propagation.
    #[must_use]
    pub fn finalize_at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self.finalized = true;
        self
    }

    /// Check whether this error has already been attributed to a position.
    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(position) = self.position {
            write!(f, " ({position})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factory functions, one per kind.

/// The function expression of a call evaluated to a non-callable value.
pub fn not_callable(signature: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        signature: signature.into(),
    })
}

/// No overload of `callee` admits the rendered argument signature `args`.
pub fn no_overload(callee: impl Into<String>, args: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoOverload {
        callee: callee.into(),
        args: args.into(),
    })
}

/// `name` is bound neither in a scope frame nor in the global registry.
pub fn unbound_name(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundName { name: name.into() })
}

/// The evaluated entity cannot be rendered inline or as a block.
pub fn not_renderable(signature: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotRenderable {
        signature: signature.into(),
    })
}

/// A native implementation received arguments it cannot use.
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        message: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_position() {
        let err = unbound_name("x");
        assert_eq!(format!("{err}"), "name x not found");
        assert!(!err.is_finalized());
    }

    #[test]
    fn finalize_appends_position() {
        let err = not_callable("int").finalize_at(Position::new(3, 7));
        assert_eq!(format!("{err}"), "trying to call int (line 3, column 7)");
        assert!(err.is_finalized());
    }

    #[test]
    fn no_overload_message_lists_both_signatures() {
        let err = no_overload("(λ int int . int)", "(str, str)");
        assert_eq!(
            format!("{err}"),
            "cannot call (λ int int . int) with (str, str)"
        );
    }
}
