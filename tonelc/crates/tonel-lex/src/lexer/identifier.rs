//! Identifier and keyword-selector-part lexing.

use tonel_util::TonelResult;

use super::core::{is_ident_continue, Lexer};
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes an identifier, or — if immediately followed by `:` and that
    /// colon is not itself the start of `:=` — a single keyword-selector
    /// part (e.g. the `at:` in `at:put:`, emitted one part at a time).
    pub(crate) fn lex_identifier(&mut self) -> TonelResult<Token> {
        let start = self.token_start;
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        if self.cursor.current_char() == ':' && self.cursor.char_at(1) != '=' {
            self.cursor.advance();
            let text = self.cursor.slice_from(start).to_string();
            return Ok(self.make_token(TokenKind::Keyword, text, start));
        }

        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::Identifier, text, start))
    }
}
