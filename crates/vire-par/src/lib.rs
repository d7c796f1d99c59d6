//! `vire-par` — recursive-descent and shunting-yard parser for the Vire
//! language frontend.
//!
//! [`Parser::parse`] drives a [`vire_lex::Lexer`] token-at-a-time and builds
//! a [`ast::Program`]: one [`ast::Namespace`] per `nspace` block, with every
//! `Var` declared anywhere in the program living in a single arena
//! (`Program::vars`) addressed by [`ast::VarId`] handles rather than direct
//! references, so a function body can refer to its own declaring `Var`
//! (recursion) without a cyclic ownership graph.
//!
//! Like the tokenizer beneath it, this is a fatal-error-only frontend: the
//! first malformed construct returns a single [`vire_util::Diagnostic`] and
//! parsing stops. There is no error recovery and no partial AST.

pub mod ast;
mod parser;
pub mod scope;

pub use ast::{
    ArrayLeaf, BinOp, ConstLeaf, FnCall, IfStatement, Lambda, Namespace, Node, Program, Range,
    RangeFlags, StrLeaf, UnOp, Var, VarId, VarLeaf, WhileLoop,
};
pub use parser::Parser;
pub use scope::ScopeStack;

/// Result alias for parser operations: `Ok` carries the produced value,
/// `Err` a single fatal diagnostic (mirrors `vire_lex::LexResult`).
pub type ParseResult<T> = Result<T, vire_util::Diagnostic>;

#[cfg(test)]
mod edge_cases;
