//! Whitespace and comment skipping.
//!
//! Line comments (`// …`) consume to end-of-line; block comments
//! (`/* … */`) are non-nesting and consume to the first `*/`. Blanks and
//! comments alternate freely — the loop keeps going until neither applies.

use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    pub(crate) fn skip_blanks_and_comments(&mut self) -> LexResult<()> {
        loop {
            while !self.cursor.is_at_end() && crate::classify::is_blank(self.cursor.current_char()) {
                self.cursor.advance();
            }

            if self.cursor.current_char() == '/' && self.cursor.peek(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }

            if self.cursor.current_char() == '/' && self.cursor.peek(1) == '*' {
                let start = self.start_span();
                self.cursor.advance();
                self.cursor.advance();
                loop {
                    if self.cursor.is_at_end() {
                        self.prev_span = start;
                        return Err(self.unexpected("unterminated block comment"));
                    }
                    if self.cursor.current_char() == '*' && self.cursor.peek(1) == '/' {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
        Ok(())
    }
}
