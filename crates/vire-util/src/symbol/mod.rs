//! Interned identifiers.
//!
//! See [`interner`] for the actual table; this module just wires it up.

mod interner;

pub use interner::{Symbol, SymbolTable};
