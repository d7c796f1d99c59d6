//! Shared foundation types for the Vire compiler frontend.
//!
//! Nothing in this crate is specific to lexing or parsing: interned
//! identifiers, source maps and spans, diagnostic reporting, and the
//! `IndexVec`/`Idx` arena pattern live here so that `vire-lex` and
//! `vire-par` can both depend on a single, small, well-tested base.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{DiagnosticError, IndexVecError, SourceMapError, SymbolError};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::{Symbol, SymbolTable};
