//! Scope / symbol table: a stack of frames, each an ordered sequence of
//! `VarId` handles into the program's `Var` arena, keyed by fully-qualified
//! name.
//!
//! Lookup starts at the innermost frame and searches outward; `add` scans
//! every live frame (not just the top) so a shadow redeclaration in an
//! outer frame is still caught, matching the component design's "every
//! frame" wording for duplicate detection.

use rustc_hash::FxHashMap;
use vire_util::Symbol;

use crate::ast::VarId;

#[derive(Debug, Default)]
struct Frame {
    order: Vec<VarId>,
    by_name: FxHashMap<Symbol, VarId>,
}

/// Stack of scope frames threaded through the recursive-descent parser.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn pop_scope(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Adds `var` (keyed by `name`) to the top frame. Returns `false` if
    /// `name` is already bound in *any* currently-live frame — the caller
    /// turns that into a "duplicate variable" diagnostic.
    pub fn add(&mut self, name: Symbol, var: VarId) -> bool {
        if self.frames.iter().any(|f| f.by_name.contains_key(&name)) {
            return false;
        }
        let top = self.frames.last_mut().expect("add called with no open scope");
        top.order.push(var);
        top.by_name.insert(name, var);
        true
    }

    /// Searches frames innermost-first for `name`, returning the first hit.
    /// Qualified-name fallback (current namespace, then `using` prefixes)
    /// is the parser's job — this is a single exact-key lookup.
    pub fn lookup(&self, name: Symbol) -> Option<VarId> {
        self.frames.iter().rev().find_map(|f| f.by_name.get(&name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vire_util::SymbolTable;

    fn id(n: u32) -> VarId {
        use vire_util::index_vec::Idx;
        VarId::from_usize(n as usize)
    }

    #[test]
    fn lookup_finds_innermost_binding_first() {
        let mut symbols = SymbolTable::new();
        let x = symbols.intern("N.x");
        let mut scopes = ScopeStack::new();
        scopes.push_scope();
        scopes.add(x, id(0));
        scopes.push_scope();
        scopes.add(x, id(1));
        assert_eq!(scopes.lookup(x), Some(id(1)));
        scopes.pop_scope();
        assert_eq!(scopes.lookup(x), Some(id(0)));
    }

    #[test]
    fn add_rejects_duplicate_across_any_live_frame() {
        let mut symbols = SymbolTable::new();
        let x = symbols.intern("N.x");
        let mut scopes = ScopeStack::new();
        scopes.push_scope();
        assert!(scopes.add(x, id(0)));
        scopes.push_scope();
        assert!(!scopes.add(x, id(1)));
    }

    #[test]
    fn popped_frame_bindings_are_unreachable() {
        let mut symbols = SymbolTable::new();
        let y = symbols.intern("N.y");
        let mut scopes = ScopeStack::new();
        scopes.push_scope();
        scopes.add(y, id(0));
        scopes.pop_scope();
        assert_eq!(scopes.lookup(y), None);
    }

    #[test]
    fn unknown_name_misses() {
        let mut symbols = SymbolTable::new();
        let z = symbols.intern("N.z");
        let mut scopes = ScopeStack::new();
        scopes.push_scope();
        assert_eq!(scopes.lookup(z), None);
    }
}
