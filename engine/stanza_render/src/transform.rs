//! Deferred text transforms.

use std::fmt;
use std::rc::Rc;

type TransformFn = Rc<dyn Fn(String) -> String>;

/// A post-render transform over text content.
///
/// Transforms compose left to right with [`then`](TextTransform::then) and
/// apply to escaped text only; raw markup and tag structure pass through
/// untouched. The identity transform is free to apply and to compose.
///
/// Equality is identity-based: two transforms are equal when they share the
/// same underlying closure (or are both the identity).
#[derive(Clone)]
pub struct TextTransform(Option<TransformFn>);

impl TextTransform {
    /// The transform that leaves text unchanged.
    pub fn identity() -> Self {
        TextTransform(None)
    }

    /// Wrap a text-to-text function.
    pub fn new(f: impl Fn(String) -> String + 'static) -> Self {
        TextTransform(Some(Rc::new(f)))
    }

    /// Apply to a piece of rendered text.
    pub fn apply(&self, text: String) -> String {
        match &self.0 {
            None => text,
            Some(f) => f(text),
        }
    }

    /// Compose: apply `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &TextTransform) -> TextTransform {
        match (&self.0, &next.0) {
            (None, _) => next.clone(),
            (_, None) => self.clone(),
            (Some(first), Some(second)) => {
                let first = Rc::clone(first);
                let second = Rc::clone(second);
                TextTransform(Some(Rc::new(move |text| second(first(text)))))
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for TextTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for TextTransform {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for TextTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("TextTransform::identity")
        } else {
            f.write_str("TextTransform(..)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identity_leaves_text_alone() {
        let id = TextTransform::identity();
        assert!(id.is_identity());
        assert_eq!(id.apply("abc".to_owned()), "abc");
    }

    #[test]
    fn transforms_compose_in_order() {
        let wrap = TextTransform::new(|s| format!("[{s}]"));
        let bang = TextTransform::new(|s| format!("{s}!"));

        assert_eq!(wrap.then(&bang).apply("hi".to_owned()), "[hi]!");
        assert_eq!(bang.then(&wrap).apply("hi".to_owned()), "[hi!]");
    }

    #[test]
    fn composing_with_identity_shares_the_closure() {
        let shout = TextTransform::new(|s| s.to_uppercase());
        let id = TextTransform::identity();

        assert_eq!(shout.then(&id), shout);
        assert_eq!(id.then(&shout), shout);
        assert_eq!(id.then(&id), id);
    }
}
