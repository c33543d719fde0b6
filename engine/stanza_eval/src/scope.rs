//! Local binding scopes.

use rustc_hash::FxHashMap;

use stanza_ir::{Entity, Name};

/// A stack of local binding frames.
///
/// Binding forms push a frame for the duration of a body evaluation and pop
/// it afterwards; lookup walks the frames innermost first. The global
/// registry is not part of the stack; the evaluator consults it separately
/// when the stack has no binding.
#[derive(Default)]
pub struct ScopeStack {
    frames: Vec<FxHashMap<Name, Entity>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: FxHashMap<Name, Entity>) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Innermost binding for `name`, if any frame holds one.
    pub fn lookup(&self, name: Name) -> Option<&Entity> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inner_frames_shadow_outer_ones() {
        let mut scopes = ScopeStack::new();
        let x = Name::from_raw(1);
        let y = Name::from_raw(2);

        let mut outer = FxHashMap::default();
        outer.insert(x, Entity::int(1));
        outer.insert(y, Entity::int(2));
        scopes.push(outer);

        let mut inner = FxHashMap::default();
        inner.insert(x, Entity::int(10));
        scopes.push(inner);

        assert_eq!(scopes.lookup(x), Some(&Entity::int(10)));
        assert_eq!(scopes.lookup(y), Some(&Entity::int(2)));

        scopes.pop();
        assert_eq!(scopes.lookup(x), Some(&Entity::int(1)));

        scopes.pop();
        assert_eq!(scopes.lookup(x), None);
        assert_eq!(scopes.depth(), 0);
    }
}
