//! String, character, and symbol literal lexing.

use tonel_util::{ErrorKind, TonelResult};

use super::core::{is_ident_start, is_symbol_continue, is_binary_char, Lexer};
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// `'...'`, with `''` as an escaped quote.
    pub(crate) fn lex_string(&mut self) -> TonelResult<Token> {
        let start = self.token_start;
        self.scan_quoted_body('\'', ErrorKind::UnterminatedString)?;
        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::String, text, start))
    }

    /// `$x` — the character immediately after `$`, verbatim, whatever it is.
    pub(crate) fn lex_char(&mut self) -> TonelResult<Token> {
        let start = self.token_start;
        self.cursor.advance(); // '$'
        if self.cursor.is_at_end() {
            return Err(self.error(ErrorKind::InvalidCharacter, "'$' at end of input with no literal character"));
        }
        self.cursor.advance();
        let text = self.cursor.slice_from(start).to_string();
        Ok(self.make_token(TokenKind::Char, text, start))
    }

    /// `#` followed by `(`, `[`, a quoted generic symbol, a simple/keyword
    /// symbol, or a binary symbol.
    pub(crate) fn lex_hash(&mut self) -> TonelResult<Token> {
        let start = self.token_start;
        self.cursor.advance(); // '#'

        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                self.push_array_frame(true);
                Ok(self.make_token(TokenKind::HashLParen, "#(", start))
            },
            '[' => {
                self.cursor.advance();
                self.push_byte_array_bracket_frame();
                Ok(self.make_token(TokenKind::HashLBracket, "#[", start))
            },
            '\'' => {
                self.scan_quoted_body('\'', ErrorKind::UnterminatedString)?;
                let text = self.cursor.slice_from(start).to_string();
                Ok(self.make_token(TokenKind::Symbol, text, start))
            },
            c if is_ident_start(c) => {
                loop {
                    while is_symbol_continue(self.cursor.current_char()) {
                        self.cursor.advance();
                    }
                    if self.cursor.current_char() == ':' {
                        self.cursor.advance();
                        if is_ident_start(self.cursor.current_char()) {
                            continue;
                        }
                    }
                    break;
                }
                let text = self.cursor.slice_from(start).to_string();
                Ok(self.make_token(TokenKind::Symbol, text, start))
            },
            c if is_binary_char(c) => {
                while is_binary_char(self.cursor.current_char()) {
                    self.cursor.advance();
                }
                let text = self.cursor.slice_from(start).to_string();
                Ok(self.make_token(TokenKind::Symbol, text, start))
            },
            _ => Err(self.error(ErrorKind::InvalidCharacter, "'#' not followed by a valid symbol")),
        }
    }

    /// Shared scanner for `'...'`-delimited bodies (plain strings and
    /// `#'...'` generic symbols), doubling `quote` as its own escape.
    fn scan_quoted_body(&mut self, quote: char, unterminated: ErrorKind) -> TonelResult<()> {
        self.cursor.advance(); // opening quote
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(unterminated, "unterminated quoted literal"));
            }
            if self.cursor.current_char() == quote {
                if self.cursor.char_at(1) == quote {
                    self.cursor.advance();
                    self.cursor.advance();
                } else {
                    self.cursor.advance();
                    return Ok(());
                }
            } else {
                self.cursor.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::TokenKind;

    fn lex_first(source: &str) -> crate::token::Token {
        Lexer::tokenize(source).unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn plain_string() {
        let t = lex_first("'hello'");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text, "'hello'");
    }

    #[test]
    fn string_with_doubled_quote() {
        let t = lex_first("'it''s'");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text, "'it''s'");
    }

    #[test]
    fn char_literal_accepts_any_character() {
        for src in ["$]", "$[", "$'", "$|", "$a"] {
            let t = lex_first(src);
            assert_eq!(t.kind, TokenKind::Char);
            assert_eq!(t.text, src);
        }
    }

    #[test]
    fn simple_symbol() {
        let t = lex_first("#foo");
        assert_eq!(t.kind, TokenKind::Symbol);
        assert_eq!(t.text, "#foo");
    }

    #[test]
    fn keyword_symbol() {
        let t = lex_first("#at:put:");
        assert_eq!(t.kind, TokenKind::Symbol);
        assert_eq!(t.text, "#at:put:");
    }

    #[test]
    fn binary_symbol() {
        let t = lex_first("#<=");
        assert_eq!(t.kind, TokenKind::Symbol);
        assert_eq!(t.text, "#<=");
    }

    #[test]
    fn generic_symbol_via_string_rule() {
        let t = lex_first("#'hello world'");
        assert_eq!(t.kind, TokenKind::Symbol);
        assert_eq!(t.text, "#'hello world'");
    }

    #[test]
    fn hash_lparen_and_hash_lbracket() {
        assert_eq!(lex_first("#(1)").kind, TokenKind::HashLParen);
        assert_eq!(lex_first("#[1]").kind, TokenKind::HashLBracket);
    }
}
