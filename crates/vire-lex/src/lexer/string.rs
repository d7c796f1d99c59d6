//! String literal lexing: regular `"…"` strings with escape decoding, and
//! raw `@"(…)"` strings with no escape processing.

use vire_util::Span;

use crate::token::{Token, TokenKind};
use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    /// Consumes a regular string literal. The cursor is positioned on the
    /// opening `"`. Decodes `\\ \' \" \r \f \v \n \t \b \a \0`; any other
    /// character after `\` raises, as does a newline inside the string.
    pub(crate) fn lex_string(&mut self, start: Span) -> LexResult<Token> {
        self.cursor.advance(); // opening `"`
        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                self.prev_span = self.end_span(start);
                return Err(self.unexpected("unterminated string literal"));
            }
            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                break;
            }
            if c == '\n' {
                self.prev_span = self.end_span(start);
                return Err(self.unexpected("newline inside string literal"));
            }
            if c == '\\' {
                self.cursor.advance();
                content.push(self.decode_escape(start)?);
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }
        let span = self.end_span(start);
        Ok(Token::new(TokenKind::String, content, span))
    }

    fn decode_escape(&mut self, start: Span) -> LexResult<char> {
        if self.cursor.is_at_end() {
            self.prev_span = self.end_span(start);
            return Err(self.unexpected("unterminated escape sequence"));
        }
        let c = self.cursor.current_char();
        self.cursor.advance();
        Ok(match c {
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'r' => '\r',
            'f' => '\x0C',
            'v' => '\x0B',
            'n' => '\n',
            't' => '\t',
            'b' => '\x08',
            'a' => '\x07',
            '0' => '\0',
            other => {
                self.prev_span = self.end_span(start);
                return Err(self.unexpected(format!("unknown escape character '\\{other}'")));
            },
        })
    }

    /// Consumes a raw string literal `@"( … )"`. The cursor is positioned
    /// on the leading `@`; the body is copied verbatim up to (excluding)
    /// the closing `)"`.
    pub(crate) fn lex_raw_string(&mut self, start: Span) -> LexResult<Token> {
        self.cursor.advance(); // `@`
        self.cursor.advance(); // `"`
        self.cursor.advance(); // `(`
        let body_start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                self.prev_span = self.end_span(start);
                return Err(self.unexpected("unterminated raw string literal, expected ')\"'"));
            }
            if self.cursor.current_char() == ')' && self.cursor.peek(1) == '"' {
                let content = self.cursor.slice_from(body_start).to_string();
                self.cursor.advance();
                self.cursor.advance();
                let span = self.end_span(start);
                return Ok(Token::new(TokenKind::String, content, span));
            }
            self.cursor.advance();
        }
    }
}
