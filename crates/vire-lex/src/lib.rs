//! `vire-lex` — the streaming tokenizer for the Vire language frontend.
//!
//! [`Lexer::next`] pulls one token at a time from a source buffer, with a
//! single token of put-back lookahead (see [`Lexer::put_back`]). It is
//! pull-based and single-threaded: the lexer owns the source text it was
//! constructed with, and the parser (`vire-par`) drives it.
//!
//! Errors are not recovered from — a malformed literal, an unterminated
//! string, or a read past `EoF` produces a fatal [`vire_util::Diagnostic`]
//! that the caller propagates with `?` all the way back to the driver, per
//! the frontend's "no recovery, no partial AST" error model.

pub mod classify;
pub mod cursor;
mod edge_cases;
mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{
    is_assignment, is_binary, is_number_kw, is_number_token, is_signed, keyword_from_str,
    make_signed, make_unsigned, max_value_for, negate_logical, precedence, revert_sign,
    size_of_type, width_suffix_kind, Keyword, Token, TokenKind,
};

/// Result alias for tokenizer operations: `Ok` carries the produced value,
/// `Err` a single fatal diagnostic.
pub type LexResult<T> = Result<T, vire_util::Diagnostic>;
