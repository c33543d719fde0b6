//! The global name registry.

use rustc_hash::FxHashMap;

use stanza_ir::{Entity, Name, StringInterner};

/// Immutable mapping from global names to entities.
///
/// A registry is assembled once per document: the builtin set, extended with
/// caller-supplied bindings. Extensions shadow builtins of the same name.
/// Nothing mutates a registry after assembly; the evaluator only reads it.
pub struct Registry {
    bindings: FxHashMap<Name, Entity>,
}

impl Registry {
    /// The builtin registry.
    pub fn builtins(interner: &StringInterner) -> Self {
        Registry {
            bindings: crate::builtins::install(interner),
        }
    }

    /// Extend with caller-supplied bindings, later entries shadowing
    /// earlier ones (and builtins).
    #[must_use]
    pub fn with_extensions(
        mut self,
        extensions: impl IntoIterator<Item = (Name, Entity)>,
    ) -> Self {
        for (name, entity) in extensions {
            self.bindings.insert(name, entity);
        }
        self
    }

    /// Look up a global binding.
    pub fn get(&self, name: Name) -> Option<Entity> {
        self.bindings.get(&name).cloned()
    }

    /// Names of all documented callables, sorted by identifier text so the
    /// listing is deterministic.
    pub fn documented_names(&self, interner: &StringInterner) -> Vec<Name> {
        let mut names: Vec<Name> = self
            .bindings
            .iter()
            .filter(|(_, entity)| matches!(entity, Entity::Function(f) if f.doc().is_some()))
            .map(|(name, _)| *name)
            .collect();
        names.sort_by_key(|name| interner.lookup(*name));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stanza_ir::SharedInterner;

    #[test]
    fn extensions_shadow_builtins() {
        let interner = SharedInterner::new();
        let bf = interner.intern("bf");

        let registry = Registry::builtins(&interner);
        assert!(matches!(registry.get(bf), Some(Entity::Function(_))));

        let registry = registry.with_extensions([(bf, Entity::text("shadowed"))]);
        assert_eq!(registry.get(bf), Some(Entity::text("shadowed")));
    }

    #[test]
    fn documented_names_are_sorted() {
        let interner = SharedInterner::new();
        let registry = Registry::builtins(&interner);

        let names = registry.documented_names(&interner);
        assert!(!names.is_empty());
        let texts: Vec<&str> = names.iter().map(|n| interner.lookup(*n)).collect();
        let mut sorted = texts.clone();
        sorted.sort_unstable();
        assert_eq!(texts, sorted);

        // Nullary builtins are documented callables too.
        let dashes = interner.intern("--");
        assert!(names.contains(&dashes));
    }
}
