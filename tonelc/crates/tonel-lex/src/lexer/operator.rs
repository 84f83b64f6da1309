//! Binary selectors and the colon-driven tokens (`:=`, `COLON_PARAM`).

use tonel_util::TonelResult;

use super::core::{is_binary_char, is_ident_start, is_ident_continue, Lexer};
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// `:=` (assignment), `:ident` (`COLON_PARAM`, block-parameter
    /// position), or an error — a bare `:` has no other legal meaning in
    /// this grammar (keyword-selector colons are consumed as part of the
    /// preceding identifier by [`Lexer::lex_identifier`]).
    pub(crate) fn lex_colon(&mut self) -> TonelResult<Token> {
        let start = self.token_start;
        if self.cursor.peek_char(1) == '=' {
            self.cursor.advance();
            self.cursor.advance();
            return Ok(self.make_token(TokenKind::Assign, ":=", start));
        }

        self.cursor.advance(); // ':'
        if is_ident_start(self.cursor.current_char()) {
            while is_ident_continue(self.cursor.current_char()) {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start).to_string();
            return Ok(self.make_token(TokenKind::ColonParam, text, start));
        }

        Err(self.error(tonel_util::ErrorKind::InvalidCharacter, "unexpected ':'"))
    }

    /// Greedy run of binary-selector characters. Never
    /// absorbs a `|`: that character is always dispatched through
    /// [`Lexer::lex_pipe`] first, so a binary selector that happens to
    /// start at `|` is impossible to reach from here, and a `|` appearing
    /// mid-run simply ends the current selector.
    pub(crate) fn lex_binary_selector(&mut self) -> TonelResult<Token> {
        let start = self.token_start;
        while is_binary_char(self.cursor.current_char()) && self.cursor.current_char() != '|' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).to_string();
        let kind = match text.as_str() {
            "<" => TokenKind::Lt,
            ">" => TokenKind::Gt,
            _ => TokenKind::BinarySelector,
        };
        Ok(self.make_token(kind, text, start))
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn assign_is_greedy_over_colon_param() {
        assert_eq!(kinds(":=")[0], TokenKind::Assign);
    }

    #[test]
    fn colon_param() {
        assert_eq!(kinds(":x")[0], TokenKind::ColonParam);
    }

    #[test]
    fn multi_char_binary_selectors() {
        for (src, text) in [("<=", "<="), (">=", ">="), ("~=", "~="), ("+", "+")] {
            let t = Lexer::tokenize(src).unwrap().into_iter().next().unwrap();
            assert_eq!(t.text, text);
        }
    }

    #[test]
    fn lone_lt_and_gt_get_distinct_kinds() {
        assert_eq!(kinds("<")[0], TokenKind::Lt);
        assert_eq!(kinds(">")[0], TokenKind::Gt);
    }

    #[test]
    fn multi_char_lt_is_plain_binary_selector() {
        assert_eq!(kinds("<=")[0], TokenKind::BinarySelector);
    }
}
