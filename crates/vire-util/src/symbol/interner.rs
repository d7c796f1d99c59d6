//! String interning.
//!
//! `Symbol` is a small `Copy` handle into a [`SymbolTable`]; equality and
//! hashing on a `Symbol` are a `u32` compare, not a string compare. Unlike a
//! process-wide interner, a `SymbolTable` is an ordinary owned value: the
//! lexer and parser each hold one (or share one by reference) for the
//! lifetime of a single compile, and nothing here is `static` or behind a
//! lock.

use rustc_hash::FxHashMap;

crate::define_idx!(Symbol);

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns the interned strings for one compilation. Not `Sync`, not global.
#[derive(Debug, Default)]
pub struct SymbolTable {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing symbol if it was seen before.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(text) {
            return sym;
        }
        let boxed: Box<str> = text.into();
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, sym);
        sym
    }

    /// Interns the concatenation of `namespace` and `short_name` as
    /// `"namespace.short_name"`.
    pub fn intern_qualified(&mut self, namespace: &str, short_name: &str) -> Symbol {
        let mut qualified = String::with_capacity(namespace.len() + 1 + short_name.len());
        qualified.push_str(namespace);
        qualified.push('.');
        qualified.push_str(short_name);
        self.intern(&qualified)
    }

    /// Resolves a symbol back to its string. Panics if `sym` was not
    /// produced by this table.
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
    fn interning_same_text_yields_same_symbol() {
        let mut table = SymbolTable::new();
        let a = table.intern("foo");
        let b = table.intern("foo");
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn interning_distinct_text_yields_distinct_symbols() {
        let mut table = SymbolTable::new();
        let a = table.intern("foo");
        let b = table.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut table = SymbolTable::new();
        let sym = table.intern("hello");
        assert_eq!(table.resolve(sym), "hello");
    }

    #[test]
    fn qualified_names_match_manual_concatenation() {
        let mut table = SymbolTable::new();
        let a = table.intern_qualified("N", "x");
        let b = table.intern("N.x");
        assert_eq!(a, b);
    }

    #[test]
    fn two_independent_tables_do_not_share_state() {
        let mut t1 = SymbolTable::new();
        let mut t2 = SymbolTable::new();
        let s1 = t1.intern("only_in_t1");
        let s2 = t2.intern("different_text");
        assert_eq!(s1.0, 0);
        assert_eq!(s2.0, 0);
    }

    // Property-based tests over arbitrary strings, mirroring the shape of
    // the tokenizer's own proptest coverage for arbitrary identifier text.
    #[quickcheck_macros::quickcheck]
    fn interning_any_string_twice_yields_the_same_symbol(text: String) -> bool {
        let mut table = SymbolTable::new();
        let a = table.intern(&text);
        let b = table.intern(&text);
        a == b
    }

    #[quickcheck_macros::quickcheck]
    fn resolve_after_intern_recovers_the_original_text(text: String) -> bool {
        let mut table = SymbolTable::new();
        let sym = table.intern(&text);
        table.resolve(sym) == text
    }
}
