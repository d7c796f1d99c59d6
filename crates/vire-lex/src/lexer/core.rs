//! Core lexer implementation: position tracking, whitespace/comment
//! skipping, and the top-level `next`/`put_back`/`parse_raw_until`
//! dispatch described by the component design.

use vire_util::{Diagnostic, Span, Symbol, SymbolTable};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::LexResult;

/// Streaming tokenizer with one-token put-back.
///
/// `next` is pull-based: each call advances the cursor exactly past one
/// token. The end-of-file latch (`eof_emitted`) survives across calls so a
/// second call after `EoF` has been returned raises, matching the
/// component design's "unexpected end of file" behavior.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    put_back: Option<Token>,
    eof_emitted: bool,
    /// Position latched just before the token currently being returned;
    /// used by `unexpected` so errors point at the token that triggered
    /// them rather than wherever the cursor has since wandered. Visible to
    /// sibling lexer submodules so they can latch a tighter span on error.
    pub(crate) prev_span: Span,
    /// Owns the interning table for `Name` tokens' identifier text. Not a
    /// process-wide table — each `Lexer` (and therefore each compile) gets
    /// its own.
    pub(crate) symbols: SymbolTable,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            put_back: None,
            eof_emitted: false,
            prev_span: Span::DUMMY,
            symbols: SymbolTable::new(),
        }
    }

    /// Gives access to the identifier interning table built up while
    /// lexing, so the parser can resolve `Token::name` symbols back to
    /// text (e.g. to build fully-qualified scope keys).
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Consumes the lexer, handing its interning table to the caller.
    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    /// Interns `text` against this lexer's table. Lets the parser build and
    /// resolve namespace-qualified names (e.g. `current_namespace.field`)
    /// against the same table `Name` tokens were interned into, without
    /// exposing the table itself for direct mutation.
    pub fn intern(&mut self, text: &str) -> Symbol {
        self.symbols.intern(text)
    }

    /// Interns `"{namespace}.{short_name}"` against this lexer's table.
    pub fn intern_qualified(&mut self, namespace: &str, short_name: &str) -> Symbol {
        self.symbols.intern_qualified(namespace, short_name)
    }

    /// Resolves a symbol produced by this lexer's table back to text.
    pub fn resolve_symbol(&self, sym: Symbol) -> &str {
        self.symbols.resolve(sym)
    }

    /// Pushes `token` back so the next call to [`Lexer::next`] returns it
    /// instead of reading from the cursor. Only one token of put-back
    /// lookahead is supported; a second call overwrites the first.
    pub fn put_back(&mut self, token: Token) {
        self.put_back = Some(token);
    }

    pub(crate) fn start_span(&self) -> Span {
        let pos = self.cursor.position();
        Span::new(pos, pos, self.cursor.line(), self.cursor.column())
    }

    pub(crate) fn end_span(&self, start: Span) -> Span {
        Span::new(start.start, self.cursor.position(), start.line, start.column)
    }

    /// Builds an "unexpected token" diagnostic referencing the last
    /// latched position and that position's source line.
    pub fn unexpected(&self, msg: impl Into<String>) -> Diagnostic {
        let line_text = self.line_text_at(self.prev_span.start);
        Diagnostic::error(msg.into(), self.prev_span).with_snippet(
            vire_util::diagnostic::SourceSnippet::point(
                line_text,
                self.prev_span.line as usize,
                self.prev_span.column as usize,
            ),
        )
    }

    /// Returns the full text of the source line containing byte offset
    /// `pos`: from the character after the previous newline (or the start
    /// of the source) to the next newline (or the end of the source).
    ///
    /// Exposed (not just used by `unexpected`) so the parser, which wraps
    /// this lexer and reports its own grammar-violation diagnostics against
    /// the same source buffer, can quote the same line text.
    pub fn line_text_at(&self, pos: usize) -> &'a str {
        let source = self.cursor.source();
        let pos = pos.min(source.len());
        let start = source[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = source[pos..].find('\n').map(|i| pos + i).unwrap_or(source.len());
        &source[start..end]
    }

    /// Returns the next token. Once `EoF` has been returned, a further
    /// call raises "unexpected end of file".
    pub fn next(&mut self) -> LexResult<Token> {
        if let Some(tok) = self.put_back.take() {
            return Ok(tok);
        }

        self.skip_blanks_and_comments()?;

        let start = self.start_span();

        if self.cursor.is_at_end() {
            if self.eof_emitted {
                self.prev_span = start;
                return Err(self.unexpected("unexpected end of file"));
            }
            self.eof_emitted = true;
            self.prev_span = start;
            return Ok(Token::new(TokenKind::EoF, "", start));
        }

        let c = self.cursor.current_char();
        let token = if c == '"' {
            self.lex_string(start)?
        } else if c == '@' && self.cursor.peek(1) == '"' && self.cursor.peek(2) == '(' {
            self.lex_raw_string(start)?
        } else if c.is_ascii_digit() {
            self.lex_number(start)?
        } else if crate::classify::is_ident_start(c) {
            self.lex_identifier(start)
        } else {
            self.lex_operator(start)?
        };

        self.prev_span = token.span;
        Ok(token)
    }

    /// Returns a `String`-typed token containing all characters up to but
    /// not including the next occurrence of `ch`. Used to capture inline
    /// assembly bodies verbatim (the caller consumes `ch` itself).
    pub fn parse_raw_until(&mut self, ch: char) -> LexResult<Token> {
        let start = self.start_span();
        while !self.cursor.is_at_end() && self.cursor.current_char() != ch {
            self.cursor.advance();
        }
        if self.cursor.is_at_end() {
            self.prev_span = start;
            return Err(self.unexpected(format!("unterminated inline assembly block, expected '{ch}'")));
        }
        let text = self.cursor.slice_from(start.start).to_string();
        let span = self.end_span(start);
        self.prev_span = span;
        Ok(Token::new(TokenKind::String, text, span))
    }

}
