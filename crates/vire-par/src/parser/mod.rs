//! Recursive-descent driver.
//!
//! `Parser` owns the [`vire_lex::Lexer`] and the one token of lookahead it
//! keeps in `cur` (the component design's `cur_tok`); the lexer's own
//! put-back slot backs the parser's few spots that need to undo a bump
//! (the `_asm` raw-capture resync in `parser::stmt`). The three
//! sub-parser concerns split across sibling files the same way the
//! component design's share table splits them: declarations (`decl`),
//! statements/control-flow (`stmt`), and the shunting-yard expression
//! grammar (`expr`).

mod decl;
mod expr;
mod stmt;

use vire_lex::{Keyword, Lexer, Token, TokenKind};
use vire_util::{Diagnostic, Span, Symbol};

use crate::ast::Program;
use crate::scope::ScopeStack;
use crate::ParseResult;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    scopes: ScopeStack,
    program: Program,
    /// Dotted text of the namespace currently being parsed, if any. Kept as
    /// raw text (not a pre-interned symbol) since it is concatenated with
    /// every local declaration's short name.
    current_namespace: Option<String>,
    current_uses: Vec<Symbol>,
    /// One-shot `unsafe` flag set by a `#!( unsafe )!` section; cleared
    /// after the next statement is parsed, whatever it turns out to be.
    unsafe_once: bool,
    /// True while parsing a parameter list: lambda parameters are declared
    /// bare (no namespace prefix), per the data model's `Var.name`
    /// invariant.
    in_param_scope: bool,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let cur = lexer.next()?;
        Ok(Parser {
            lexer,
            cur,
            scopes: ScopeStack::new(),
            program: Program::new(),
            current_namespace: None,
            current_uses: Vec::new(),
            unsafe_once: false,
            in_param_scope: false,
        })
    }

    /// Parses a complete translation unit into a [`Program`].
    pub fn parse(source: &'a str) -> ParseResult<Program> {
        let mut parser = Parser::new(source)?;
        parser.parse_program()?;
        Ok(parser.program)
    }

    fn parse_program(&mut self) -> ParseResult<()> {
        while self.cur.kind != TokenKind::EoF {
            if self.at_keyword(Keyword::Using) {
                self.parse_using()?;
            } else if self.at_keyword(Keyword::Nspace) {
                self.parse_namespace()?;
            } else if self.is_import() {
                self.parse_import()?;
            } else {
                return Err(self.unexpected("expected 'using', 'nspace', or 'import' at top level"));
            }
        }
        Ok(())
    }

    fn is_import(&self) -> bool {
        self.cur.kind == TokenKind::Name && self.cur.keyword.is_none() && self.cur.data == "import"
    }

    // -- token-stream plumbing -------------------------------------------------

    pub(crate) fn bump(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next()?;
        Ok(std::mem::replace(&mut self.cur, next))
    }

    pub(crate) fn at_keyword(&self, kw: Keyword) -> bool {
        self.cur.keyword == Some(kw)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, msg: &str) -> ParseResult<Token> {
        if self.cur.kind != kind {
            return Err(self.unexpected(msg));
        }
        self.bump()
    }

    pub(crate) fn unexpected(&self, msg: impl Into<String>) -> Diagnostic {
        self.lexer.unexpected(msg)
    }

    pub(crate) fn synthetic_keyword_token(&self, kw: Keyword, span: Span) -> Token {
        let mut tok = Token::new(TokenKind::Name, "", span);
        tok.keyword = Some(kw);
        tok
    }
}
