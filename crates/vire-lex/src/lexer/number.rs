//! Numeric literal lexing: digit runs with `_` separators, an optional
//! width suffix, and in-place validation that the literal round-trips
//! through its declared width.

use vire_util::Span;

use crate::token::{max_value_for, width_suffix_kind, Token, TokenKind};
use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    /// Consumes a digit run (with `_` separators) and an optional
    /// `[iu](8|16|32|64)` width suffix; default is 32-bit signed. Raises
    /// `NumericOutOfRange` if the parsed value doesn't fit the declared
    /// width.
    pub(crate) fn lex_number(&mut self, start: Span) -> LexResult<Token> {
        let mut digits = String::new();
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_digit() {
                digits.push(c);
                self.cursor.advance();
            } else if c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let suffix_start = self.cursor.position();
        while crate::classify::is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let suffix = self.cursor.slice_from(suffix_start);

        let kind = if suffix.is_empty() {
            TokenKind::Int32L
        } else {
            match width_suffix_kind(suffix) {
                Some(k) => k,
                None => {
                    self.prev_span = self.end_span(start);
                    return Err(self.unexpected(format!("invalid numeric literal suffix '{suffix}'")));
                },
            }
        };

        let value: u64 = match digits.parse() {
            Ok(v) => v,
            Err(_) => {
                self.prev_span = self.end_span(start);
                return Err(self.unexpected("integer literal doesn't fit the given number of bits"));
            },
        };

        if value > max_value_for(kind) {
            self.prev_span = self.end_span(start);
            return Err(self.unexpected("integer literal doesn't fit the given number of bits"));
        }

        let span = self.end_span(start);
        let text = self.cursor.slice_from(start.start).to_string();
        let mut token = Token::new(kind, text, span);
        token.int_value = Some(value);
        Ok(token)
    }
}
