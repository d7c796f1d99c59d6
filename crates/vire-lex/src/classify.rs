//! ASCII character classification used by the tokenizer.
//!
//! Identifiers are ASCII-alpha plus digit plus `_`, starting with alpha or
//! `_` — there is no Unicode identifier category support at this layer.

/// True for `a-z`, `A-Z`.
#[inline]
pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True for `0-9`.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// True for characters that may start an identifier: alpha or `_`.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    is_alpha(c) || c == '_'
}

/// True for characters that may continue an identifier: alnum or `_`.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    is_alpha(c) || is_digit(c) || c == '_'
}

/// True for the blank characters the tokenizer skips outside of string and
/// comment bodies: space, tab, newline, vertical tab, carriage return.
#[inline]
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_start_excludes_digits() {
        assert!(is_ident_start('_'));
        assert!(is_ident_start('a'));
        assert!(is_ident_start('Z'));
        assert!(!is_ident_start('3'));
    }

    #[test]
    fn ident_continue_includes_digits() {
        assert!(is_ident_continue('3'));
        assert!(is_ident_continue('_'));
    }

    #[test]
    fn blank_includes_vertical_tab() {
        assert!(is_blank('\x0B'));
        assert!(is_blank(' '));
        assert!(!is_blank('a'));
    }
}
