//! Identifier and keyword lexing.

use vire_util::Span;

use crate::token::{keyword_from_str, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Consumes an alnum/`_` run starting at `start` (the cursor is already
    /// positioned on the first character, already known to satisfy
    /// [`crate::classify::is_ident_start`]). Sets [`Token::keyword`] when
    /// the run spells a reserved word.
    pub(crate) fn lex_identifier(&mut self, start: Span) -> Token {
        while crate::classify::is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start.start);
        let span = self.end_span(start);
        let keyword = keyword_from_str(text);
        let mut token = Token::new(TokenKind::Name, text, span);
        token.keyword = keyword;
        if keyword.is_none() {
            token.name = Some(self.symbols.intern(text));
        }
        token
    }
}
