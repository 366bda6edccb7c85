use rustc_hash::FxHashMap;

/// A deduplicated handle into an [`Interner`].
///
/// `Symbol` is the concrete "InternedString" of the host interface: cheap to
/// copy, compare, and hash, so name slices (variable names, field names,
/// object-literal keys, ...) never borrow into the source buffer and can
/// outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

/// Deduplicating string table.
///
/// Every name encountered while scanning or parsing a source unit is interned
/// once here; subsequent occurrences of the same text reuse the existing
/// `Symbol`. One `Interner` belongs to one source unit and is never shared
/// across concurrent compilations.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string slice, returning its `Symbol`.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(text) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, sym);
        sym
    }

    /// Resolve a `Symbol` back to its text.
    ///
    /// # Panics
    ///
    /// Panics if `sym` was not produced by this `Interner`.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_dedupes() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let sym = interner.intern("hello");
        assert_eq!(interner.resolve(sym), "hello");
    }
}
