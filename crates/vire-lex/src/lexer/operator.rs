//! Operator and punctuation lexing via maximal munch.

use vire_util::Span;

use crate::token::{Token, TokenKind};
use crate::{LexResult, Lexer};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_operator(&mut self, start: Span) -> LexResult<Token> {
        use TokenKind::*;
        let c = self.cursor.current_char();
        self.cursor.advance();

        let kind = match c {
            ';' => Semi,
            ',' => Comma,
            '.' => Dot,
            ':' => Colon,
            '?' => Quest,
            '(' => LParen,
            ')' => {
                if self.cursor.current_char() == '!' {
                    self.cursor.advance();
                    PPEnd
                } else {
                    RParen
                }
            },
            '{' => LBrace,
            '}' => RBrace,
            '[' => LBracket,
            ']' => RBracket,
            '#' => {
                if self.cursor.current_char() == '!' && self.cursor.peek(1) == '(' {
                    self.cursor.advance();
                    self.cursor.advance();
                    PPBegin
                } else {
                    self.prev_span = self.end_span(start);
                    return Err(self.unexpected("expected '#!(' to open a preprocessor section"));
                }
            },
            '+' => {
                if self.cursor.current_char() == '+' {
                    self.cursor.advance();
                    OperInc
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignPlus
                } else {
                    OperPlus
                }
            },
            '-' => {
                if self.cursor.current_char() == '>' {
                    self.cursor.advance();
                    Arrow
                } else if self.cursor.current_char() == '-' {
                    self.cursor.advance();
                    OperDec
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignMin
                } else {
                    OperMin
                }
            },
            '*' => {
                if self.cursor.current_char() == '*' {
                    self.cursor.advance();
                    if self.cursor.current_char() == '=' {
                        self.cursor.advance();
                        AssignPow
                    } else {
                        OperPow
                    }
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignMul
                } else {
                    OperMul
                }
            },
            '/' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignDiv
                } else {
                    OperDiv
                }
            },
            '%' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignPCent
                } else {
                    OperPCent
                }
            },
            '<' => {
                if self.cursor.current_char() == '<' {
                    self.cursor.advance();
                    if self.cursor.current_char() == '=' {
                        self.cursor.advance();
                        AssignLShift
                    } else {
                        OperLShift
                    }
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    OperLEqual
                } else {
                    OperLess
                }
            },
            '>' => {
                if self.cursor.current_char() == '>' {
                    self.cursor.advance();
                    if self.cursor.current_char() == '=' {
                        self.cursor.advance();
                        AssignRShift
                    } else {
                        OperRShift
                    }
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    OperGEqual
                } else {
                    OperGreater
                }
            },
            '&' => {
                if self.cursor.current_char() == '&' {
                    self.cursor.advance();
                    OperLAnd
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignBWAnd
                } else {
                    OperBWAnd
                }
            },
            '|' => {
                if self.cursor.current_char() == '|' {
                    self.cursor.advance();
                    OperLOr
                } else if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignBWOr
                } else {
                    OperBWOr
                }
            },
            '^' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    AssignXor
                } else {
                    OperXor
                }
            },
            '~' => OperNot,
            '!' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    OperNEqual
                } else {
                    OperLNot
                }
            },
            '=' => {
                if self.cursor.current_char() == '=' {
                    self.cursor.advance();
                    OperEqual
                } else {
                    Assign
                }
            },
            other => {
                self.prev_span = self.end_span(start);
                return Err(self.unexpected(format!("unexpected character '{other}'")));
            },
        };

        let text = self.cursor.slice_from(start.start).to_string();
        let span = self.end_span(start);
        Ok(Token::new(kind, text, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(src: &str) -> Token {
        let mut lexer = Lexer::new(src);
        lexer.next().unwrap()
    }

    #[test]
    fn maximal_munch_prefers_two_char_operators() {
        assert_eq!(lex_one("++").kind, TokenKind::OperInc);
        assert_eq!(lex_one("+=").kind, TokenKind::AssignPlus);
        assert_eq!(lex_one("+").kind, TokenKind::OperPlus);
    }

    #[test]
    fn pow_and_pow_assign() {
        assert_eq!(lex_one("**").kind, TokenKind::OperPow);
        assert_eq!(lex_one("**=").kind, TokenKind::AssignPow);
    }

    #[test]
    fn shift_and_shift_assign() {
        assert_eq!(lex_one("<<").kind, TokenKind::OperLShift);
        assert_eq!(lex_one("<<=").kind, TokenKind::AssignLShift);
        assert_eq!(lex_one(">>").kind, TokenKind::OperRShift);
        assert_eq!(lex_one(">>=").kind, TokenKind::AssignRShift);
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(lex_one("<").kind, TokenKind::OperLess);
        assert_eq!(lex_one("<=").kind, TokenKind::OperLEqual);
        assert_eq!(lex_one(">").kind, TokenKind::OperGreater);
        assert_eq!(lex_one(">=").kind, TokenKind::OperGEqual);
        assert_eq!(lex_one("==").kind, TokenKind::OperEqual);
        assert_eq!(lex_one("!=").kind, TokenKind::OperNEqual);
    }

    #[test]
    fn logical_vs_bitwise_and_or() {
        assert_eq!(lex_one("&").kind, TokenKind::OperBWAnd);
        assert_eq!(lex_one("&&").kind, TokenKind::OperLAnd);
        assert_eq!(lex_one("&=").kind, TokenKind::AssignBWAnd);
        assert_eq!(lex_one("|").kind, TokenKind::OperBWOr);
        assert_eq!(lex_one("||").kind, TokenKind::OperLOr);
        assert_eq!(lex_one("|=").kind, TokenKind::AssignBWOr);
    }

    #[test]
    fn unary_not_vs_bitwise_not() {
        assert_eq!(lex_one("!").kind, TokenKind::OperLNot);
        assert_eq!(lex_one("~").kind, TokenKind::OperNot);
    }

    #[test]
    fn preprocessor_delimiters() {
        assert_eq!(lex_one("#!(").kind, TokenKind::PPBegin);
        assert_eq!(lex_one(")!").kind, TokenKind::PPEnd);
    }

    #[test]
    fn bare_hash_without_bang_paren_is_an_error() {
        let mut lexer = Lexer::new("#x");
        assert!(lexer.next().is_err());
    }

    #[test]
    fn arrow_and_minus() {
        assert_eq!(lex_one("->").kind, TokenKind::Arrow);
        assert_eq!(lex_one("-").kind, TokenKind::OperMin);
        assert_eq!(lex_one("--").kind, TokenKind::OperDec);
    }
}
